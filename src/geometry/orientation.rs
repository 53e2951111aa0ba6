use super::point::Point;
use crate::EPSILON;

/// The turn direction of three consecutive points, `p -> q -> r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
  CounterClockwise,
  Clockwise,
  Collinear,
}

use Orientation::*;

impl Orientation {
  /// How does the path `p -> q -> r` turn?
  ///
  /// Computed from the signed area of the triangle `(p, q, r)`; values whose
  /// magnitude is within [`EPSILON`] of zero are treated as collinear, since
  /// the core does not carry exact arithmetic (see the crate's Non-goals).
  ///
  /// ```rust
  /// # use layout_geom_core::geometry::{Point, Orientation};
  /// let p = Point::new(0.0, 0.0);
  /// let q = Point::new(0.0, 1.0);
  /// assert!(Orientation::new(&p, &q, &Point::new(0.0, 2.0)).is_collinear());
  /// assert!(Orientation::new(&p, &q, &Point::new(-1.0, 2.0)).is_ccw());
  /// assert!(Orientation::new(&p, &q, &Point::new(1.0, 2.0)).is_cw());
  /// ```
  pub fn new(p: &Point, q: &Point, r: &Point) -> Orientation {
    let pq = q.as_vec() - p.as_vec();
    let pr = r.as_vec() - p.as_vec();
    let cross = pq.cross(&pr);
    if cross > EPSILON {
      CounterClockwise
    } else if cross < -EPSILON {
      Clockwise
    } else {
      Collinear
    }
  }

  pub fn is_collinear(self) -> bool {
    self == Collinear
  }

  pub fn is_ccw(self) -> bool {
    self == CounterClockwise
  }

  pub fn is_cw(self) -> bool {
    self == Clockwise
  }

  pub fn reverse(self) -> Orientation {
    match self {
      CounterClockwise => Clockwise,
      Clockwise => CounterClockwise,
      Collinear => Collinear,
    }
  }
}
