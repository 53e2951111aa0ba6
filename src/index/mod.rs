//! Spatial indices sharing one query surface: a quadtree, an R-tree, a
//! Z-order (Morton code) linear index, and a hierarchical index that picks
//! among the three per region based on local density.

mod hierarchical;
mod quadtree;
mod rtree;
mod zorder;

pub use hierarchical::{HierarchicalConfig, HierarchicalIndex};
pub use quadtree::{Quadtree, QuadtreeConfig};
pub use rtree::{RTree, RTreeConfig};
pub use zorder::ZOrderIndex;

use crate::geometry::Rectangle;
use crate::GeometryError;

/// An (bounding_rectangle, payload) pair stored in a spatial index. Payload
/// is an opaque identifier — a polygon id or an [`crate::geometry::EdgeId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
  pub bounds: Rectangle,
  pub payload: T,
}

impl<T> Entry<T> {
  pub fn new(bounds: Rectangle, payload: T) -> Entry<T> {
    Entry { bounds, payload }
  }
}

/// The capability set common to every spatial index in this crate.
///
/// Mutating operations (`insert`, `remove`, `clear`) take `&self` and
/// serialise internally under a lock, matching the per-index `RwLock`
/// concurrency model: queries may run concurrently with other queries but
/// not with a mutation.
pub trait SpatialIndex<T: Copy + Eq> {
  /// Inserts `entry`. Returns `false` (a rejected mutation, not an error) if
  /// the entry's bounds fall entirely outside the index's world rectangle.
  fn insert(&self, entry: Entry<T>) -> bool;

  /// Removes any entry whose payload equals `payload`. Returns `false` if no
  /// such entry was found.
  fn remove(&self, payload: T) -> bool;

  /// Removes every entry.
  fn clear(&self);

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Every entry whose bounds intersect `rect`. No ordering is guaranteed.
  fn query_range(&self, rect: &Rectangle) -> Vec<Entry<T>>;

  /// Every entry whose bounds contain `p`.
  fn query_point(&self, p: &crate::geometry::Point) -> Vec<Entry<T>> {
    self
      .query_range(&Rectangle::new(p.x, p.y, 0.0, 0.0))
      .into_iter()
      .filter(|e| e.bounds.contains(p))
      .collect()
  }

  /// `entry`'s bounds expanded by `distance` on every side, delegated to
  /// [`SpatialIndex::query_range`].
  fn query_nearby(&self, entry: &Entry<T>, distance: f64) -> Vec<Entry<T>> {
    self.query_range(&entry.bounds.expand(distance))
  }

  /// A superset of all intersecting entry pairs; callers filter precisely.
  fn find_potential_intersections(&self) -> Vec<(Entry<T>, Entry<T>)>;

  /// Inserts every entry in `entries`, independently. One rejected entry
  /// does not roll back the others already inserted in the same call.
  /// Returns the number of entries actually accepted.
  fn batch_insert(&self, entries: Vec<Entry<T>>) -> usize {
    entries.into_iter().filter(|e| self.insert(*e)).count()
  }
}

/// Checks that a world rectangle has positive width and height, the
/// precondition every index constructor shares.
pub(crate) fn validate_world(world: &Rectangle) -> Result<(), GeometryError> {
  if world.width <= 0.0 || world.height <= 0.0 {
    Err(GeometryError::InvalidBounds)
  } else {
    Ok(())
  }
}
