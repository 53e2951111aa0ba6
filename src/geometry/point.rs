use std::ops::{Add, Index, Sub};

use super::vector::Vector;
use crate::EPSILON;

/// A point in the plane. Freely copied; equality is exact on the stored bits.
///
/// Use [`Point::approx_eq`] when "the same point" should tolerate the usual
/// floating-point noise instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Point {
    Point { x, y }
  }

  pub fn distance(&self, other: &Point) -> f64 {
    (self.x - other.x).hypot(self.y - other.y)
  }

  pub fn squared_distance(&self, other: &Point) -> f64 {
    let dx = self.x - other.x;
    let dy = self.y - other.y;
    dx * dx + dy * dy
  }

  /// Geometric "same point" within [`EPSILON`], as opposed to bitwise equality.
  pub fn approx_eq(&self, other: &Point) -> bool {
    self.distance(other) < EPSILON
  }

  pub fn as_vec(&self) -> Vector {
    Vector::new(self.x, self.y)
  }

  /// Midpoint of `self` and `other`.
  pub fn midpoint(&self, other: &Point) -> Point {
    Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
  }
}

impl From<(f64, f64)> for Point {
  fn from((x, y): (f64, f64)) -> Point {
    Point::new(x, y)
  }
}

impl Index<usize> for Point {
  type Output = f64;
  fn index(&self, key: usize) -> &f64 {
    match key {
      0 => &self.x,
      1 => &self.y,
      _ => panic!("Point index out of range: {key}"),
    }
  }
}

impl Add<Vector> for Point {
  type Output = Point;
  fn add(self, rhs: Vector) -> Point {
    Point::new(self.x + rhs.dx, self.y + rhs.dy)
  }
}

impl Sub<Point> for Point {
  type Output = Vector;
  fn sub(self, rhs: Point) -> Vector {
    Vector::new(self.x - rhs.x, self.y - rhs.y)
  }
}

impl Sub<&Point> for &Point {
  type Output = Vector;
  fn sub(self, rhs: &Point) -> Vector {
    Vector::new(self.x - rhs.x, self.y - rhs.y)
  }
}
