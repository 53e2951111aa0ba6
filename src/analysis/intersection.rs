use std::collections::{HashMap, HashSet};

use ordered_float::OrderedFloat;

use crate::geometry::{segment_intersection, EdgeId, LineSegment, Point, Polygon};
use crate::index::SpatialIndex;

/// One edge crossing or touch, either within a single polygon
/// (`polygon_id_1 == polygon_id_2`, a self-intersection) or between two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
  pub point: Point,
  pub polygon_id_1: u64,
  pub edge_index_1: u32,
  pub polygon_id_2: u64,
  pub edge_index_2: u32,
  /// `true` iff both parametric intersection values lie strictly in
  /// `(ε, 1 - ε)`. Collinear overlaps are always reported as `false`.
  pub is_proper: bool,
}

fn vertex_count_of(counts: &HashMap<u64, usize>, polygon_id: u64) -> usize {
  counts.get(&polygon_id).copied().unwrap_or(0)
}

/// Two edges of the same polygon that share a vertex are structural, not a
/// violation, and are never reported.
fn is_adjacent(a: EdgeId, b: EdgeId, counts: &HashMap<u64, usize>) -> bool {
  if a.polygon_id != b.polygon_id {
    return false;
  }
  let n = vertex_count_of(counts, a.polygon_id);
  if n == 0 {
    return false;
  }
  let (i, j) = (a.edge_index as usize, b.edge_index as usize);
  if i == j {
    return true;
  }
  let diff = i.max(j) - i.min(j);
  diff == 1 || diff == n - 1
}

fn collect_segments(polygons: &[Polygon]) -> (HashMap<EdgeId, LineSegment>, HashMap<u64, usize>) {
  let mut segments = HashMap::new();
  let mut counts = HashMap::new();
  for p in polygons {
    counts.insert(p.id(), p.vertex_count());
    for e in p.edges() {
      segments.insert(e.id(), e.as_segment());
    }
  }
  (segments, counts)
}

fn record_for(
  lo: EdgeId,
  hi: EdgeId,
  segments: &HashMap<EdgeId, LineSegment>,
  counts: &HashMap<u64, usize>,
  include_touching: bool,
) -> Option<IntersectionRecord> {
  if lo == hi || is_adjacent(lo, hi, counts) {
    return None;
  }
  let a = segments[&lo];
  let b = segments[&hi];
  let isect = segment_intersection(&a.start, &a.end, &b.start, &b.end);
  let point = isect.point()?;
  let is_proper = isect.is_proper();
  if !include_touching && !is_proper {
    return None;
  }
  Some(IntersectionRecord {
    point,
    polygon_id_1: lo.polygon_id,
    edge_index_1: lo.edge_index,
    polygon_id_2: hi.polygon_id,
    edge_index_2: hi.edge_index,
    is_proper,
  })
}

/// Index-pruned edge intersection search. `index` must already hold one
/// entry per edge, keyed by [`EdgeId`], whose bounds are that edge's own
/// bounding rectangle — building it is the caller's job. Passing a single
/// polygon (and an index built only over its edges) finds self-intersections;
/// `polygon_id_1 == polygon_id_2` in the resulting records.
///
/// Each unordered candidate pair is tested exactly once, by enforcing
/// `id_1 < id_2` under [`EdgeId`]'s lexicographic order.
pub fn find_intersections<I: SpatialIndex<EdgeId>>(
  polygons: &[Polygon],
  include_touching: bool,
  index: &I,
) -> Vec<IntersectionRecord> {
  let (segments, counts) = collect_segments(polygons);
  let mut out = Vec::new();
  let mut ids: Vec<EdgeId> = segments.keys().copied().collect();
  ids.sort();

  for &id1 in &ids {
    let seg1 = segments[&id1];
    let bounds = crate::geometry::Rectangle::bounding(&[seg1.start, seg1.end]);
    for candidate in index.query_range(&bounds) {
      let id2 = candidate.payload;
      if id2 <= id1 {
        continue;
      }
      if let Some(record) = record_for(id1, id2, &segments, &counts, include_touching) {
        out.push(record);
      }
    }
  }
  out
}

/// Sweep-line edge intersection search with identical semantics to
/// [`find_intersections`], without requiring a pre-built index.
///
/// Events are edge endpoints sorted by x (ties broken START-before-END).
/// The active set is the edges currently crossing the sweep line; on a
/// START event the new edge is tested against its immediate neighbours by
/// y-at-current-x, and on an END event the edge's former neighbours are
/// tested against each other now that they have become adjacent.
pub fn find_intersections_sweep_line(polygons: &[Polygon], include_touching: bool) -> Vec<IntersectionRecord> {
  #[derive(Clone, Copy, PartialEq)]
  enum Kind {
    Start,
    End,
  }
  struct SweepEvent {
    x: f64,
    kind: Kind,
    id: EdgeId,
  }

  let (segments, counts) = collect_segments(polygons);
  let mut events = Vec::with_capacity(segments.len() * 2);
  for (&id, seg) in &segments {
    let (left_x, right_x) = if seg.start.x <= seg.end.x {
      (seg.start.x, seg.end.x)
    } else {
      (seg.end.x, seg.start.x)
    };
    events.push(SweepEvent { x: left_x, kind: Kind::Start, id });
    events.push(SweepEvent { x: right_x, kind: Kind::End, id });
  }
  events.sort_by(|a, b| {
    a.x.partial_cmp(&b.x).unwrap().then_with(|| match (a.kind, b.kind) {
      (Kind::Start, Kind::End) => std::cmp::Ordering::Less,
      (Kind::End, Kind::Start) => std::cmp::Ordering::Greater,
      _ => std::cmp::Ordering::Equal,
    })
  });

  let y_at = |seg: &LineSegment, x: f64| -> f64 {
    let dx = seg.end.x - seg.start.x;
    if dx.abs() < crate::EPSILON {
      seg.start.y.min(seg.end.y)
    } else {
      let t = ((x - seg.start.x) / dx).clamp(0.0, 1.0);
      seg.start.y + t * (seg.end.y - seg.start.y)
    }
  };

  let neighbors_of = |active: &[EdgeId], x: f64, id: EdgeId| -> (Option<EdgeId>, Option<EdgeId>) {
    let mut ys: Vec<(OrderedFloat<f64>, EdgeId)> = active
      .iter()
      .map(|&a| (OrderedFloat(y_at(&segments[&a], x)), a))
      .collect();
    ys.sort_by_key(|(y, _)| *y);
    match ys.iter().position(|&(_, a)| a == id) {
      None => (None, None),
      Some(p) => {
        let pred = if p > 0 { Some(ys[p - 1].1) } else { None };
        let succ = if p + 1 < ys.len() { Some(ys[p + 1].1) } else { None };
        (pred, succ)
      }
    }
  };

  let mut active: Vec<EdgeId> = Vec::new();
  let mut seen_pairs: HashSet<(EdgeId, EdgeId)> = HashSet::new();
  let mut out = Vec::new();

  let mut emit = |a: EdgeId, b: EdgeId, out: &mut Vec<IntersectionRecord>| {
    if a == b {
      return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    if !seen_pairs.insert((lo, hi)) {
      return;
    }
    if let Some(record) = record_for(lo, hi, &segments, &counts, include_touching) {
      out.push(record);
    }
  };

  for event in events {
    match event.kind {
      Kind::Start => {
        active.push(event.id);
        let (pred, succ) = neighbors_of(&active, event.x, event.id);
        if let Some(p) = pred {
          emit(event.id, p, &mut out);
        }
        if let Some(s) = succ {
          emit(event.id, s, &mut out);
        }
      }
      Kind::End => {
        let (pred, succ) = neighbors_of(&active, event.x, event.id);
        if let (Some(p), Some(s)) = (pred, succ) {
          emit(p, s, &mut out);
        }
        active.retain(|&a| a != event.id);
      }
    }
  }
  out
}
