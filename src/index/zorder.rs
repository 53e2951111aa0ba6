use std::sync::RwLock;

use super::{validate_world, Entry, SpatialIndex};
use crate::geometry::Rectangle;
use crate::GeometryError;

/// Spreads the bits of a 32-bit integer so that each original bit lands on
/// an even bit position, leaving the odd positions free for interleaving
/// with a second coordinate.
fn spread_bits(v: u32) -> u64 {
  let mut x = v as u64;
  x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
  x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
  x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
  x = (x | (x << 2)) & 0x3333_3333_3333_3333;
  x = (x | (x << 1)) & 0x5555_5555_5555_5555;
  x
}

/// Interleaves two 32-bit normalised coordinates into a 64-bit Morton code.
fn morton_code(x: u32, y: u32) -> u64 {
  spread_bits(x) | (spread_bits(y) << 1)
}

struct State<T> {
  entries: Vec<(u64, Entry<T>)>,
  sorted: bool,
}

/// A linear index: every entry is projected to a 64-bit Morton code and kept
/// in a vector sorted by that code. Well suited to bulk load followed by
/// many read-only queries; not to heavy interleaved updates, since every
/// query after an insert pays for a re-sort.
pub struct ZOrderIndex<T> {
  world: Rectangle,
  state: RwLock<State<T>>,
}

impl<T: Copy + Eq> ZOrderIndex<T> {
  pub fn new(world: Rectangle) -> Result<ZOrderIndex<T>, GeometryError> {
    validate_world(&world)?;
    Ok(ZOrderIndex {
      world,
      state: RwLock::new(State {
        entries: Vec::new(),
        sorted: true,
      }),
    })
  }

  pub fn world(&self) -> Rectangle {
    self.world
  }

  /// Normalises a point within the world rectangle to a 32-bit unsigned
  /// integer per axis, per the crate's Z-order normalisation rule.
  fn normalize(&self, x: f64, y: f64) -> (u32, u32) {
    let nx = ((x - self.world.min_x()) / self.world.width * u32::MAX as f64).clamp(0.0, u32::MAX as f64);
    let ny = ((y - self.world.min_y()) / self.world.height * u32::MAX as f64).clamp(0.0, u32::MAX as f64);
    (nx as u32, ny as u32)
  }

  fn morton_of(&self, x: f64, y: f64) -> u64 {
    let (nx, ny) = self.normalize(x, y);
    morton_code(nx, ny)
  }
}

impl<T: Copy + Eq> SpatialIndex<T> for ZOrderIndex<T> {
  fn insert(&self, entry: Entry<T>) -> bool {
    if !self.world.intersects(&entry.bounds) {
      return false;
    }
    let centre = entry.bounds.centre();
    let code = self.morton_of(centre.x, centre.y);
    let mut state = self.state.write().unwrap();
    state.entries.push((code, entry));
    state.sorted = false;
    true
  }

  fn remove(&self, payload: T) -> bool {
    let mut state = self.state.write().unwrap();
    if let Some(pos) = state.entries.iter().position(|(_, e)| e.payload == payload) {
      state.entries.remove(pos);
      true
    } else {
      false
    }
  }

  fn clear(&self) {
    let mut state = self.state.write().unwrap();
    state.entries.clear();
    state.sorted = true;
  }

  fn len(&self) -> usize {
    self.state.read().unwrap().entries.len()
  }

  /// Computes the Morton codes of `rect`'s minimum and maximum corners,
  /// scans the sorted vector between them, and re-tests each candidate
  /// against `rect` — Z-order ranges can include gaps the scan window
  /// doesn't actually belong to, which the re-test filters out.
  ///
  /// Takes the write lock even though this is conceptually a read, because
  /// a dirty index must re-sort before it can be scanned (the "lazy sort"
  /// from the crate's index design notes).
  fn query_range(&self, rect: &Rectangle) -> Vec<Entry<T>> {
    let mut state = self.state.write().unwrap();
    if !state.sorted {
      state.entries.sort_by_key(|(code, _)| *code);
      state.sorted = true;
    }
    let low = self.morton_of(rect.min_x(), rect.min_y());
    let high = self.morton_of(rect.max_x(), rect.max_y());
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let start = state.entries.partition_point(|(code, _)| *code < low);
    state.entries[start..]
      .iter()
      .take_while(|(code, _)| *code <= high)
      .map(|(_, e)| *e)
      .filter(|e| e.bounds.intersects(rect))
      .collect()
  }

  /// A simple, conservative O(n^2) scan. The Z-order index is meant for
  /// bulk-load-then-query workloads; its entries carry no spatial grouping
  /// beyond the sort order, so there is no cheaper superset to compute here
  /// without re-deriving a tree structure.
  fn find_potential_intersections(&self) -> Vec<(Entry<T>, Entry<T>)> {
    let state = self.state.read().unwrap();
    let mut out = Vec::new();
    for i in 0..state.entries.len() {
      for j in (i + 1)..state.entries.len() {
        out.push((state.entries[i].1, state.entries[j].1));
      }
    }
    out
  }
}
