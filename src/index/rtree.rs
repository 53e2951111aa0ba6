use std::sync::RwLock;

use super::{validate_world, Entry, SpatialIndex};
use crate::geometry::Rectangle;
use crate::GeometryError;

/// Construction parameters for [`RTree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RTreeConfig {
  pub min_entries: usize,
  pub max_entries: usize,
}

impl Default for RTreeConfig {
  fn default() -> RTreeConfig {
    RTreeConfig {
      min_entries: 2,
      max_entries: 8,
    }
  }
}

impl RTreeConfig {
  pub(crate) fn validate(&self) -> Result<(), GeometryError> {
    if self.min_entries < 2 {
      return Err(GeometryError::InvalidConfig { field: "min_entries" });
    }
    if self.max_entries < 2 * self.min_entries {
      return Err(GeometryError::InvalidConfig { field: "max_entries" });
    }
    Ok(())
  }
}

trait HasBounds {
  fn bounds(&self) -> Rectangle;
}

enum NodeContent<T> {
  Leaf(Vec<Entry<T>>),
  Internal(Vec<RNode<T>>),
}

struct RNode<T> {
  bounds: Rectangle,
  content: NodeContent<T>,
}

impl<T> HasBounds for Entry<T> {
  fn bounds(&self) -> Rectangle {
    self.bounds
  }
}

impl<T> HasBounds for RNode<T> {
  fn bounds(&self) -> Rectangle {
    self.bounds
  }
}

/// Guttman's quadratic-split heuristic: pick the pair of items whose
/// combined bounds waste the most area as seeds, then assign the rest one
/// at a time to whichever group needs the least enlargement, dumping the
/// remainder into whichever group would otherwise fall below `min_entries`.
fn quadratic_split<I: HasBounds>(mut items: Vec<I>, min_entries: usize) -> (Vec<I>, Vec<I>) {
  let n = items.len();
  let mut best = (0usize, 1usize, f64::NEG_INFINITY);
  for i in 0..n {
    for j in (i + 1)..n {
      let bi = items[i].bounds();
      let bj = items[j].bounds();
      let waste = bi.union(&bj).area() - bi.area() - bj.area();
      if waste > best.2 {
        best = (i, j, waste);
      }
    }
  }
  let (i, j) = (best.0, best.1);
  let (lo, hi) = if i < j { (i, j) } else { (j, i) };
  let second = items.remove(hi);
  let first = items.remove(lo);
  let (seed_a, seed_b) = if i < j { (first, second) } else { (second, first) };

  let mut bounds_a = seed_a.bounds();
  let mut bounds_b = seed_b.bounds();
  let mut group_a = vec![seed_a];
  let mut group_b = vec![seed_b];
  let mut remaining = items;

  while !remaining.is_empty() {
    let need_a = min_entries.saturating_sub(group_a.len());
    let need_b = min_entries.saturating_sub(group_b.len());
    if need_a >= remaining.len() {
      group_a.extend(remaining);
      break;
    }
    if need_b >= remaining.len() {
      group_b.extend(remaining);
      break;
    }
    let mut best_idx = 0;
    let mut best_diff = f64::NEG_INFINITY;
    let mut goes_to_a = true;
    for (idx, item) in remaining.iter().enumerate() {
      let enlarge_a = bounds_a.enlargement(&item.bounds());
      let enlarge_b = bounds_b.enlargement(&item.bounds());
      let diff = (enlarge_a - enlarge_b).abs();
      if diff > best_diff {
        best_diff = diff;
        best_idx = idx;
        goes_to_a = enlarge_a < enlarge_b;
      }
    }
    let item = remaining.remove(best_idx);
    if goes_to_a {
      bounds_a = bounds_a.union(&item.bounds());
      group_a.push(item);
    } else {
      bounds_b = bounds_b.union(&item.bounds());
      group_b.push(item);
    }
  }
  (group_a, group_b)
}

impl<T: Copy + Eq> RNode<T> {
  fn leaf() -> RNode<T> {
    RNode {
      bounds: Rectangle::new(0.0, 0.0, 0.0, 0.0),
      content: NodeContent::Leaf(Vec::new()),
    }
  }

  fn from_entries(entries: Vec<Entry<T>>) -> RNode<T> {
    let bounds = union_of(entries.iter().map(|e| e.bounds));
    RNode {
      bounds,
      content: NodeContent::Leaf(entries),
    }
  }

  fn from_children(children: Vec<RNode<T>>) -> RNode<T> {
    let bounds = union_of(children.iter().map(|c| c.bounds));
    RNode {
      bounds,
      content: NodeContent::Internal(children),
    }
  }

  /// Inserts `entry`, returning a split-off sibling if this node overflowed.
  fn insert(&mut self, entry: Entry<T>, config: &RTreeConfig) -> Option<RNode<T>> {
    self.bounds = if self.is_empty() {
      entry.bounds
    } else {
      self.bounds.union(&entry.bounds)
    };
    match &mut self.content {
      NodeContent::Leaf(entries) => {
        entries.push(entry);
        if entries.len() > config.max_entries {
          let (a, b) = quadratic_split(std::mem::take(entries), config.min_entries);
          *entries = a;
          self.bounds = union_of(entries.iter().map(|e| e.bounds));
          Some(RNode::from_entries(b))
        } else {
          None
        }
      }
      NodeContent::Internal(children) => {
        let idx = choose_subtree(children, &entry.bounds);
        if let Some(sibling) = children[idx].insert(entry, config) {
          children.push(sibling);
          if children.len() > config.max_entries {
            let (a, b) = quadratic_split(std::mem::take(children), config.min_entries);
            *children = a;
            self.bounds = union_of(children.iter().map(|c| c.bounds));
            Some(RNode::from_children(b))
          } else {
            None
          }
        } else {
          None
        }
      }
    }
  }

  fn is_empty(&self) -> bool {
    match &self.content {
      NodeContent::Leaf(entries) => entries.is_empty(),
      NodeContent::Internal(children) => children.is_empty(),
    }
  }

  fn remove(&mut self, payload: T) -> bool
  where
    T: PartialEq,
  {
    let removed = match &mut self.content {
      NodeContent::Leaf(entries) => {
        if let Some(pos) = entries.iter().position(|e| e.payload == payload) {
          entries.remove(pos);
          true
        } else {
          false
        }
      }
      NodeContent::Internal(children) => children.iter_mut().any(|c| c.remove(payload)),
    };
    if removed && !self.is_empty() {
      self.bounds = match &self.content {
        NodeContent::Leaf(entries) => union_of(entries.iter().map(|e| e.bounds)),
        NodeContent::Internal(children) => union_of(children.iter().map(|c| c.bounds)),
      };
    }
    removed
  }

  fn len(&self) -> usize {
    match &self.content {
      NodeContent::Leaf(entries) => entries.len(),
      NodeContent::Internal(children) => children.iter().map(RNode::len).sum(),
    }
  }

  fn query_range(&self, rect: &Rectangle, out: &mut Vec<Entry<T>>) {
    if !self.bounds.intersects(rect) {
      return;
    }
    match &self.content {
      NodeContent::Leaf(entries) => {
        for e in entries {
          if e.bounds.intersects(rect) {
            out.push(*e);
          }
        }
      }
      NodeContent::Internal(children) => {
        for c in children {
          c.query_range(rect, out);
        }
      }
    }
  }

  fn all_entries(&self) -> Vec<Entry<T>> {
    match &self.content {
      NodeContent::Leaf(entries) => entries.clone(),
      NodeContent::Internal(children) => children.iter().flat_map(RNode::all_entries).collect(),
    }
  }

  fn collect_pairs(&self, out: &mut Vec<(Entry<T>, Entry<T>)>) {
    match &self.content {
      NodeContent::Leaf(entries) => {
        for i in 0..entries.len() {
          for j in (i + 1)..entries.len() {
            out.push((entries[i], entries[j]));
          }
        }
      }
      NodeContent::Internal(children) => {
        for c in children {
          c.collect_pairs(out);
        }
        for i in 0..children.len() {
          for j in (i + 1)..children.len() {
            if children[i].bounds.intersects(&children[j].bounds) {
              let left = children[i].all_entries();
              let right = children[j].all_entries();
              for a in &left {
                for b in &right {
                  out.push((*a, *b));
                }
              }
            }
          }
        }
      }
    }
  }

  fn clear(&mut self) {
    self.bounds = Rectangle::new(0.0, 0.0, 0.0, 0.0);
    self.content = NodeContent::Leaf(Vec::new());
  }
}

fn union_of(mut rects: impl Iterator<Item = Rectangle>) -> Rectangle {
  match rects.next() {
    None => Rectangle::new(0.0, 0.0, 0.0, 0.0),
    Some(first) => rects.fold(first, |acc, r| acc.union(&r)),
  }
}

/// The child requiring the least area enlargement to cover `bounds`, ties
/// broken by the smaller resulting area.
fn choose_subtree<T>(children: &[RNode<T>], bounds: &Rectangle) -> usize {
  let mut best_idx = 0;
  let mut best_enlargement = f64::INFINITY;
  let mut best_area = f64::INFINITY;
  for (idx, child) in children.iter().enumerate() {
    let enlargement = child.bounds.enlargement(bounds);
    let resulting_area = child.bounds.union(bounds).area();
    if enlargement < best_enlargement || (enlargement == best_enlargement && resulting_area < best_area) {
      best_idx = idx;
      best_enlargement = enlargement;
      best_area = resulting_area;
    }
  }
  best_idx
}

/// A height-balanced bounding-box tree. See the crate's index design notes
/// for the insertion, split, and removal rules.
pub struct RTree<T> {
  world: Rectangle,
  config: RTreeConfig,
  root: RwLock<RNode<T>>,
}

impl<T: Copy + Eq> RTree<T> {
  pub fn new(world: Rectangle, config: RTreeConfig) -> Result<RTree<T>, GeometryError> {
    validate_world(&world)?;
    config.validate()?;
    Ok(RTree {
      world,
      config,
      root: RwLock::new(RNode::leaf()),
    })
  }

  pub fn world(&self) -> Rectangle {
    self.world
  }
}

impl<T: Copy + Eq> SpatialIndex<T> for RTree<T> {
  fn insert(&self, entry: Entry<T>) -> bool {
    if !self.world.intersects(&entry.bounds) {
      return false;
    }
    let mut root = self.root.write().unwrap();
    if let Some(sibling) = root.insert(entry, &self.config) {
      let old_root = std::mem::replace(&mut *root, RNode::leaf());
      *root = RNode::from_children(vec![old_root, sibling]);
    }
    true
  }

  fn remove(&self, payload: T) -> bool {
    self.root.write().unwrap().remove(payload)
  }

  fn clear(&self) {
    self.root.write().unwrap().clear();
  }

  fn len(&self) -> usize {
    self.root.read().unwrap().len()
  }

  fn query_range(&self, rect: &Rectangle) -> Vec<Entry<T>> {
    let mut out = Vec::new();
    self.root.read().unwrap().query_range(rect, &mut out);
    out
  }

  fn find_potential_intersections(&self) -> Vec<(Entry<T>, Entry<T>)> {
    let mut out = Vec::new();
    self.root.read().unwrap().collect_pairs(&mut out);
    out
  }
}
