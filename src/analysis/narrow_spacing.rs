use std::collections::HashMap;

use crate::geometry::{segment_intersection, LineSegment, Point, Polygon};
use crate::index::SpatialIndex;

/// A pair of polygon edges that came within the spacing threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingRecord {
  pub polygon_id_1: u64,
  pub polygon_id_2: u64,
  pub point_1: Point,
  pub point_2: Point,
  pub distance: f64,
}

/// Every unordered pair of distinct polygons whose edges come within
/// `threshold` of each other, with at least one witness pair of closest
/// points per reported record.
///
/// `index` must already hold one entry per polygon, keyed by polygon id,
/// whose bounds are that polygon's bounding box expanded by `threshold` on
/// every side — building that index is the caller's job, since which index
/// type it uses is a configuration knob that must not change the result
/// set. Overlapping polygons are reported at distance `0`; this analysis
/// does not distinguish "touching" from "overlapping" (that is what
/// [`crate::analysis::find_intersections`] is for). Duplicate witnesses on
/// the same polygon pair are not deduplicated.
pub fn find_narrow_spacing<I: SpatialIndex<u64>>(
  polygons: &[Polygon],
  threshold: f64,
  index: &I,
) -> Vec<SpacingRecord> {
  let by_id: HashMap<u64, &Polygon> = polygons.iter().map(|p| (p.id(), p)).collect();
  let mut out = Vec::new();

  for p in polygons {
    let query_rect = p.bounding_rect().expand(threshold * 1.5);
    for candidate in index.query_range(&query_rect) {
      if candidate.payload <= p.id() {
        continue;
      }
      let q = match by_id.get(&candidate.payload) {
        Some(q) => *q,
        None => continue,
      };
      if p.bounding_rect().distance_to(&q.bounding_rect()) >= threshold {
        continue;
      }
      for e1 in p.edges() {
        let s1 = e1.as_segment();
        for e2 in q.edges() {
          let s2 = e2.as_segment();
          let distance = s1.distance_to(&s2);
          if distance < threshold {
            let (point_1, point_2) = closest_pair(&s1, &s2);
            out.push(SpacingRecord {
              polygon_id_1: p.id(),
              polygon_id_2: q.id(),
              point_1,
              point_2,
              distance,
            });
          }
        }
      }
    }
  }
  out
}

/// A witness pair of points realising the minimum distance between two
/// segments; both equal the intersection point when the segments touch.
fn closest_pair(a: &LineSegment, b: &LineSegment) -> (Point, Point) {
  if let Some(p) = segment_intersection(&a.start, &a.end, &b.start, &b.end).point() {
    return (p, p);
  }
  let (b_for_a_start, d1) = b.closest_point(&a.start);
  let (b_for_a_end, d2) = b.closest_point(&a.end);
  let (a_for_b_start, d3) = a.closest_point(&b.start);
  let (a_for_b_end, d4) = a.closest_point(&b.end);

  let candidates = [
    (a.start, b_for_a_start, d1),
    (a.end, b_for_a_end, d2),
    (a_for_b_start, b.start, d3),
    (a_for_b_end, b.end, d4),
  ];
  let (p1, p2, _) = candidates
    .into_iter()
    .min_by(|x, y| x.2.partial_cmp(&y.2).unwrap())
    .unwrap();
  (p1, p2)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Rectangle;
  use crate::index::{Entry, Quadtree, QuadtreeConfig};

  fn rect_polygon(id: u64, r: Rectangle) -> Polygon {
    Polygon::new(
      id,
      vec![
        Point::new(r.min_x(), r.min_y()),
        Point::new(r.max_x(), r.min_y()),
        Point::new(r.max_x(), r.max_y()),
        Point::new(r.min_x(), r.max_y()),
      ],
    )
  }

  fn build_index(polygons: &[Polygon], threshold: f64) -> Quadtree<u64> {
    let world = Rectangle::new(-100.0, -100.0, 500.0, 500.0);
    let index: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for p in polygons {
      index.insert(Entry::new(p.bounding_rect().expand(threshold), p.id()));
    }
    index
  }

  #[test]
  fn parallel_rectangles_narrow_gap() {
    let r1 = rect_polygon(1, Rectangle::new(0.0, 0.0, 10.0, 5.0));
    let r2 = rect_polygon(2, Rectangle::new(10.05, 0.0, 10.0, 5.0));
    let polygons = [r1, r2];
    let index = build_index(&polygons, 0.1);
    let records = find_narrow_spacing(&polygons, 0.1, &index);
    assert!(records.iter().any(|r| (r.distance - 0.05).abs() < 1e-9));
  }

  #[test]
  fn disjoint_rectangles_beyond_threshold_report_nothing() {
    let r1 = rect_polygon(1, Rectangle::new(0.0, 0.0, 5.0, 3.0));
    let r2 = rect_polygon(2, Rectangle::new(6.0, 0.0, 5.0, 3.0));
    let polygons = [r1, r2];
    let index = build_index(&polygons, 0.5);
    assert!(find_narrow_spacing(&polygons, 0.5, &index).is_empty());
  }

  #[test]
  fn overlapping_polygons_report_zero_distance() {
    let r1 = rect_polygon(1, Rectangle::new(0.0, 0.0, 4.0, 4.0));
    let r2 = rect_polygon(2, Rectangle::new(2.0, 2.0, 4.0, 4.0));
    let polygons = [r1, r2];
    let index = build_index(&polygons, 1.0);
    let records = find_narrow_spacing(&polygons, 1.0, &index);
    assert!(records.iter().any(|r| r.distance == 0.0));
  }
}
