use std::sync::RwLock;

use super::{validate_world, Entry, SpatialIndex};
use crate::geometry::Rectangle;
use crate::GeometryError;

/// Construction parameters for [`Quadtree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreeConfig {
  /// Entries a node may hold before it subdivides.
  pub capacity: usize,
  /// Depth at which subdivision stops, regardless of entry count.
  pub max_depth: usize,
}

impl Default for QuadtreeConfig {
  fn default() -> QuadtreeConfig {
    QuadtreeConfig {
      capacity: 10,
      max_depth: 8,
    }
  }
}

struct Node<T> {
  bounds: Rectangle,
  depth: usize,
  entries: Vec<Entry<T>>,
  children: Option<Box<[Node<T>; 4]>>,
}

impl<T: Copy + Eq> Node<T> {
  fn new(bounds: Rectangle, depth: usize) -> Node<T> {
    Node {
      bounds,
      depth,
      entries: Vec::new(),
      children: None,
    }
  }

  /// Inserts into the deepest descendant whose bounds fully contain
  /// `entry.bounds`, subdividing as needed. Assumes `entry` already fits
  /// inside `self.bounds` (the world check happens once, at the root).
  fn insert(&mut self, entry: Entry<T>, config: &QuadtreeConfig) {
    if self.children.is_none() && self.entries.len() >= config.capacity && self.depth < config.max_depth {
      self.subdivide();
    }
    if let Some(children) = &mut self.children {
      for child in children.iter_mut() {
        if child.bounds.contains_rect(&entry.bounds) {
          child.insert(entry, config);
          return;
        }
      }
    }
    self.entries.push(entry);
  }

  /// Splits this node into four quadrants and redistributes its current
  /// entries downward using the "fully contains" rule; entries that
  /// straddle more than one quadrant stay at this node.
  fn subdivide(&mut self) {
    let half_w = self.bounds.width / 2.0;
    let half_h = self.bounds.height / 2.0;
    let x = self.bounds.x;
    let y = self.bounds.y;
    let depth = self.depth + 1;
    let mut children = Box::new([
      Node::new(Rectangle::new(x, y, half_w, half_h), depth),
      Node::new(Rectangle::new(x + half_w, y, half_w, half_h), depth),
      Node::new(Rectangle::new(x, y + half_h, half_w, half_h), depth),
      Node::new(Rectangle::new(x + half_w, y + half_h, half_w, half_h), depth),
    ]);
    let existing = std::mem::take(&mut self.entries);
    for entry in existing {
      let mut placed = false;
      for child in children.iter_mut() {
        if child.bounds.contains_rect(&entry.bounds) {
          child.entries.push(entry);
          placed = true;
          break;
        }
      }
      if !placed {
        self.entries.push(entry);
      }
    }
    self.children = Some(children);
  }

  fn remove(&mut self, payload: T) -> bool
  where
    T: PartialEq,
  {
    if let Some(pos) = self.entries.iter().position(|e| e.payload == payload) {
      self.entries.remove(pos);
      return true;
    }
    if let Some(children) = &mut self.children {
      for child in children.iter_mut() {
        if child.remove(payload) {
          return true;
        }
      }
    }
    false
  }

  fn len(&self) -> usize {
    let own = self.entries.len();
    match &self.children {
      None => own,
      Some(children) => own + children.iter().map(Node::len).sum::<usize>(),
    }
  }

  fn query_range(&self, rect: &Rectangle, out: &mut Vec<Entry<T>>) {
    if !self.bounds.intersects(rect) {
      return;
    }
    for entry in &self.entries {
      if entry.bounds.intersects(rect) {
        out.push(*entry);
      }
    }
    if let Some(children) = &self.children {
      for child in children.iter() {
        child.query_range(rect, out);
      }
    }
  }

  fn collect_pairs(&self, ancestors: &[Entry<T>], out: &mut Vec<(Entry<T>, Entry<T>)>) {
    for i in 0..self.entries.len() {
      for j in (i + 1)..self.entries.len() {
        out.push((self.entries[i], self.entries[j]));
      }
    }
    for e in &self.entries {
      for a in ancestors {
        out.push((*a, *e));
      }
    }
    if let Some(children) = &self.children {
      let mut next_ancestors = ancestors.to_vec();
      next_ancestors.extend(self.entries.iter().copied());
      for child in children.iter() {
        child.collect_pairs(&next_ancestors, out);
      }
    }
  }

  fn clear(&mut self) {
    self.entries.clear();
    self.children = None;
  }
}

/// A recursive 4-way spatial partition over a caller-supplied world
/// rectangle. See the crate's index design notes for the subdivision and
/// straddling-entry placement rules.
pub struct Quadtree<T> {
  world: Rectangle,
  config: QuadtreeConfig,
  root: RwLock<Node<T>>,
}

impl<T: Copy + Eq> Quadtree<T> {
  pub fn new(world: Rectangle, config: QuadtreeConfig) -> Result<Quadtree<T>, GeometryError> {
    validate_world(&world)?;
    Ok(Quadtree {
      world,
      config,
      root: RwLock::new(Node::new(world, 0)),
    })
  }

  pub fn world(&self) -> Rectangle {
    self.world
  }
}

impl<T: Copy + Eq> SpatialIndex<T> for Quadtree<T> {
  fn insert(&self, entry: Entry<T>) -> bool {
    if !self.world.intersects(&entry.bounds) {
      return false;
    }
    let mut root = self.root.write().unwrap();
    root.insert(entry, &self.config);
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
    self.root.read().unwrap().collect_pairs(&[], &mut out);
    out
  }
}
