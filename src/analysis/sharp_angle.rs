use crate::geometry::Polygon;

/// A vertex whose interior angle fell below the analysis threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpAngleRecord {
  pub polygon_id: u64,
  pub vertex_index: usize,
  pub angle_degrees: f64,
}

/// For each polygon, every vertex whose interior angle is strictly less
/// than `threshold_degrees` and strictly greater than `0`.
///
/// O(n) per polygon, O(1) additional space beyond the result vector.
/// Polygons with fewer than 3 vertices contribute nothing, the same as a
/// degenerate incident edge at a single vertex contributes nothing — both
/// are absorbed by [`Polygon::vertex_angle`]'s `None` sentinel rather than
/// raised here.
pub fn find_sharp_angles(polygons: &[Polygon], threshold_degrees: f64) -> Vec<SharpAngleRecord> {
  let mut out = Vec::new();
  for polygon in polygons {
    for i in 0..polygon.vertex_count() {
      if let Some(angle) = polygon.vertex_angle(i) {
        if angle > 0.0 && angle < threshold_degrees {
          out.push(SharpAngleRecord {
            polygon_id: polygon.id(),
            vertex_index: i,
            angle_degrees: angle,
          });
        }
      }
    }
  }
  out
}
