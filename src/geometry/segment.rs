use super::point::Point;
use super::vector::Vector;
use crate::EPSILON;

/// A line segment between two endpoints, used as a transient view over
/// polygon edges and as a standalone geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
  pub start: Point,
  pub end: Point,
}

impl LineSegment {
  pub const fn new(start: Point, end: Point) -> LineSegment {
    LineSegment { start, end }
  }

  pub fn vector(&self) -> Vector {
    Vector::from_points(&self.start, &self.end)
  }

  pub fn length(&self) -> f64 {
    self.vector().length()
  }

  pub fn is_degenerate(&self) -> bool {
    self.vector().is_degenerate()
  }

  /// The minimum Euclidean distance between `self` and `other`.
  pub fn distance_to(&self, other: &LineSegment) -> f64 {
    if !matches!(
      segment_intersection(&self.start, &self.end, &other.start, &other.end),
      SegmentIntersection::None
    ) {
      return 0.0;
    }
    let d1 = point_to_segment_distance(&self.start, other);
    let d2 = point_to_segment_distance(&self.end, other);
    let d3 = point_to_segment_distance(&other.start, self);
    let d4 = point_to_segment_distance(&other.end, self);
    d1.min(d2).min(d3).min(d4)
  }

  /// The closest point on `self` to `p`, alongside the distance.
  pub fn closest_point(&self, p: &Point) -> (Point, f64) {
    let d = self.vector();
    let len_sq = d.squared_length();
    if len_sq < EPSILON * EPSILON {
      return (self.start, self.start.distance(p));
    }
    let t = Vector::from_points(&self.start, p).dot(&d) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let closest = Point::new(self.start.x + t * d.dx, self.start.y + t * d.dy);
    let dist = closest.distance(p);
    (closest, dist)
  }
}

fn point_to_segment_distance(p: &Point, seg: &LineSegment) -> f64 {
  seg.closest_point(p).1
}

/// The result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
  /// The segments do not touch.
  None,
  /// The segments cross in both interiors: both parametric values lie
  /// strictly in `(EPSILON, 1 - EPSILON)`.
  Proper { point: Point, t: f64, s: f64 },
  /// The segments touch at an endpoint, or overlap collinearly. For a
  /// collinear overlap, `point` is the midpoint of the overlapping range.
  Improper { point: Point },
}

impl SegmentIntersection {
  pub fn is_none(&self) -> bool {
    matches!(self, SegmentIntersection::None)
  }

  pub fn is_proper(&self) -> bool {
    matches!(self, SegmentIntersection::Proper { .. })
  }

  pub fn point(&self) -> Option<Point> {
    match self {
      SegmentIntersection::None => None,
      SegmentIntersection::Proper { point, .. } => Some(*point),
      SegmentIntersection::Improper { point } => Some(*point),
    }
  }
}

/// Intersects segment `p1`-`p2` with segment `p3`-`p4`.
///
/// The parametric solve follows the spec: `denominator = d1 x d2` where
/// `d1 = p2 - p1` and `d2 = p4 - p3`; if `|denominator| < EPSILON` the
/// segments are treated as parallel. A collinear overlap is always reported
/// as a single [`SegmentIntersection::Improper`] at the overlap midpoint,
/// never as two endpoint touches.
pub fn segment_intersection(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> SegmentIntersection {
  let d1 = Vector::from_points(p1, p2);
  let d2 = Vector::from_points(p3, p4);

  if d1.is_degenerate() && d2.is_degenerate() {
    return if p1.approx_eq(p3) {
      SegmentIntersection::Improper { point: *p1 }
    } else {
      SegmentIntersection::None
    };
  }
  if d1.is_degenerate() {
    return point_on_segment(p1, p3, p4, &d2);
  }
  if d2.is_degenerate() {
    return point_on_segment(p3, p1, p2, &d1);
  }

  let denom = d1.cross(&d2);
  let offset = Vector::from_points(p1, p3);

  if denom.abs() < EPSILON {
    if offset.cross(&d1).abs() >= EPSILON {
      return SegmentIntersection::None; // Parallel, distinct lines.
    }
    return collinear_overlap(p1, p2, p3, p4, &d1);
  }

  let t = offset.cross(&d2) / denom;
  let s = offset.cross(&d1) / denom;

  if t < -EPSILON || t > 1.0 + EPSILON || s < -EPSILON || s > 1.0 + EPSILON {
    return SegmentIntersection::None;
  }

  let point = Point::new(p1.x + t * d1.dx, p1.y + t * d1.dy);
  if t > EPSILON && t < 1.0 - EPSILON && s > EPSILON && s < 1.0 - EPSILON {
    SegmentIntersection::Proper { point, t, s }
  } else {
    SegmentIntersection::Improper { point }
  }
}

/// Handles the case where one of the two "segments" is degenerate to a point.
fn point_on_segment(point: &Point, a: &Point, b: &Point, ab: &Vector) -> SegmentIntersection {
  let offset = Vector::from_points(a, point);
  if offset.cross(ab).abs() >= EPSILON {
    return SegmentIntersection::None;
  }
  let len_sq = ab.squared_length();
  let t = offset.dot(ab) / len_sq;
  if (-EPSILON..=1.0 + EPSILON).contains(&t) {
    SegmentIntersection::Improper { point: *point }
  } else {
    SegmentIntersection::None
  }
}

/// Finds the overlap of two collinear segments (both parallel to `d1`) and
/// reports it as a single improper intersection at the overlap midpoint.
fn collinear_overlap(
  p1: &Point,
  p2: &Point,
  p3: &Point,
  p4: &Point,
  d1: &Vector,
) -> SegmentIntersection {
  let len_sq = d1.squared_length();
  let param = |p: &Point| Vector::from_points(p1, p).dot(d1) / len_sq;
  let (t3, t4) = (param(p3), param(p4));
  let (lo, hi) = if t3 <= t4 { (t3, t4) } else { (t4, t3) };
  let overlap_lo = lo.max(0.0);
  let overlap_hi = hi.min(1.0);
  if overlap_lo > overlap_hi + EPSILON {
    return SegmentIntersection::None;
  }
  let mid = (overlap_lo + overlap_hi) / 2.0;
  let point = Point::new(p1.x + mid * d1.dx, p1.y + mid * d1.dy);
  let _ = p2; // p2 == p1 + d1; kept for symmetry with the call site.
  SegmentIntersection::Improper { point }
}
