use std::sync::RwLock;

use super::rtree::{RTree, RTreeConfig};
use super::zorder::ZOrderIndex;
use super::{quadtree::Quadtree, quadtree::QuadtreeConfig, validate_world, Entry, SpatialIndex};
use crate::geometry::{Point, Rectangle};
use crate::GeometryError;

/// Construction parameters for [`HierarchicalIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalConfig {
  /// The world is partitioned into a `grid_size x grid_size` array of
  /// regions, each tracked and promoted independently.
  pub grid_size: usize,
  pub quadtree_config: QuadtreeConfig,
  pub rtree_config: RTreeConfig,
}

impl Default for HierarchicalConfig {
  fn default() -> HierarchicalConfig {
    HierarchicalConfig {
      grid_size: 4,
      quadtree_config: QuadtreeConfig::default(),
      rtree_config: RTreeConfig::default(),
    }
  }
}

const DENSE_THRESHOLD: usize = 100;
const VERY_DENSE_THRESHOLD: usize = 1000;

enum RegionBacking<T> {
  /// Entries for this region live in the shared top-level quadtree.
  Sparse,
  Dense(RTree<T>),
  VeryDense(ZOrderIndex<T>),
}

struct Region<T> {
  bounds: Rectangle,
  count: usize,
  backing: RegionBacking<T>,
}

/// Partitions the world into a grid of regions and assigns each an index
/// type based on its observed entry density: a shared top-level quadtree
/// absorbs sparse regions (< 100 entries), a per-region R-tree takes over
/// once a region passes 100 entries, and a per-region Z-order index once it
/// passes 1000. No analysis depends on which backing answered a query.
pub struct HierarchicalIndex<T> {
  world: Rectangle,
  config: HierarchicalConfig,
  top_level: Quadtree<T>,
  regions: Vec<RwLock<Region<T>>>,
}

impl<T: Copy + Eq> HierarchicalIndex<T> {
  pub fn new(world: Rectangle, config: HierarchicalConfig) -> Result<HierarchicalIndex<T>, GeometryError> {
    validate_world(&world)?;
    if config.grid_size == 0 {
      return Err(GeometryError::InvalidConfig { field: "grid_size" });
    }
    config.rtree_config.validate()?;
    let cell_w = world.width / config.grid_size as f64;
    let cell_h = world.height / config.grid_size as f64;
    let mut regions = Vec::with_capacity(config.grid_size * config.grid_size);
    for row in 0..config.grid_size {
      for col in 0..config.grid_size {
        let bounds = Rectangle::new(
          world.x + col as f64 * cell_w,
          world.y + row as f64 * cell_h,
          cell_w,
          cell_h,
        );
        regions.push(RwLock::new(Region {
          bounds,
          count: 0,
          backing: RegionBacking::Sparse,
        }));
      }
    }
    Ok(HierarchicalIndex {
      world,
      config,
      top_level: Quadtree::new(world, config.quadtree_config)?,
      regions,
    })
  }

  fn region_index_of(&self, p: &Point) -> usize {
    let grid = self.config.grid_size;
    let cell_w = self.world.width / grid as f64;
    let cell_h = self.world.height / grid as f64;
    let col = (((p.x - self.world.min_x()) / cell_w) as usize).min(grid - 1);
    let row = (((p.y - self.world.min_y()) / cell_h) as usize).min(grid - 1);
    row * grid + col
  }

  fn region_for(&self, entry: &Entry<T>) -> usize {
    self.region_index_of(&entry.bounds.centre())
  }
}

impl<T: Copy + Eq> SpatialIndex<T> for HierarchicalIndex<T> {
  fn insert(&self, entry: Entry<T>) -> bool {
    if !self.world.intersects(&entry.bounds) {
      return false;
    }
    let region_idx = self.region_for(&entry);
    let mut region = self.regions[region_idx].write().unwrap();
    region.count += 1;

    match &mut region.backing {
      RegionBacking::Sparse => {
        self.top_level.insert(entry);
        if region.count >= DENSE_THRESHOLD {
          let rtree: RTree<T> =
            RTree::new(region.bounds, self.config.rtree_config).expect("rtree_config validated at construction");
          // query_range matches on bounds overlap, which also catches entries
          // whose own region is a still-Sparse neighbour straddling into this
          // cell; only entries actually assigned here may leave top_level.
          for migrated in self.top_level.query_range(&region.bounds) {
            if self.region_for(&migrated) != region_idx {
              continue;
            }
            rtree.insert(migrated);
            self.top_level.remove(migrated.payload);
          }
          region.backing = RegionBacking::Dense(rtree);
        }
      }
      RegionBacking::Dense(rtree) => {
        rtree.insert(entry);
        if region.count >= VERY_DENSE_THRESHOLD {
          let zorder: ZOrderIndex<T> = ZOrderIndex::new(region.bounds).unwrap();
          for migrated in rtree.query_range(&region.bounds) {
            zorder.insert(migrated);
          }
          region.backing = RegionBacking::VeryDense(zorder);
        }
      }
      RegionBacking::VeryDense(zorder) => {
        zorder.insert(entry);
      }
    }
    true
  }

  fn remove(&self, payload: T) -> bool {
    if self.top_level.remove(payload) {
      return true;
    }
    for region in &self.regions {
      let region = region.read().unwrap();
      let removed = match &region.backing {
        RegionBacking::Sparse => false,
        RegionBacking::Dense(rtree) => rtree.remove(payload),
        RegionBacking::VeryDense(zorder) => zorder.remove(payload),
      };
      if removed {
        return true;
      }
    }
    false
  }

  fn clear(&self) {
    self.top_level.clear();
    for region in &self.regions {
      let mut region = region.write().unwrap();
      region.count = 0;
      region.backing = RegionBacking::Sparse;
    }
  }

  fn len(&self) -> usize {
    let mut total = self.top_level.len();
    for region in &self.regions {
      let region = region.read().unwrap();
      total += match &region.backing {
        RegionBacking::Sparse => 0,
        RegionBacking::Dense(rtree) => rtree.len(),
        RegionBacking::VeryDense(zorder) => zorder.len(),
      };
    }
    total
  }

  fn query_range(&self, rect: &Rectangle) -> Vec<Entry<T>> {
    let mut out = self.top_level.query_range(rect);
    for region in &self.regions {
      let region = region.read().unwrap();
      if !region.bounds.intersects(rect) {
        continue;
      }
      match &region.backing {
        RegionBacking::Sparse => {}
        RegionBacking::Dense(rtree) => out.extend(rtree.query_range(rect)),
        RegionBacking::VeryDense(zorder) => out.extend(zorder.query_range(rect)),
      }
    }
    out
  }

  fn find_potential_intersections(&self) -> Vec<(Entry<T>, Entry<T>)> {
    let mut out = self.top_level.find_potential_intersections();
    for region in &self.regions {
      let region = region.read().unwrap();
      match &region.backing {
        RegionBacking::Sparse => {}
        RegionBacking::Dense(rtree) => out.extend(rtree.find_potential_intersections()),
        RegionBacking::VeryDense(zorder) => out.extend(zorder.find_potential_intersections()),
      }
    }
    out
  }
}
