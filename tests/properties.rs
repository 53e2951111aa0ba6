mod properties {
  use layout_geom_core::analysis::{find_intersections, find_narrow_spacing, find_sharp_angles};
  use layout_geom_core::geometry::{segment_intersection, Point, Polygon, Rectangle};
  use layout_geom_core::index::{Entry, Quadtree, QuadtreeConfig, SpatialIndex};

  use test_strategy::proptest;

  fn rect_from(x: i8, y: i8, w: u8, h: u8) -> Rectangle {
    Rectangle::new(x as f64, y as f64, 1.0 + w as f64, 1.0 + h as f64)
  }

  #[proptest]
  fn rectangle_intersects_is_symmetric(x1: i8, y1: i8, w1: u8, h1: u8, x2: i8, y2: i8, w2: u8, h2: u8) {
    let a = rect_from(x1, y1, w1, h1);
    let b = rect_from(x2, y2, w2, h2);
    assert_eq!(a.intersects(&b), b.intersects(&a));
  }

  #[proptest]
  fn rectangle_distance_is_symmetric(x1: i8, y1: i8, w1: u8, h1: u8, x2: i8, y2: i8, w2: u8, h2: u8) {
    let a = rect_from(x1, y1, w1, h1);
    let b = rect_from(x2, y2, w2, h2);
    assert_eq!(a.distance_to(&b), b.distance_to(&a));
  }

  #[proptest]
  fn rectangle_distance_zero_iff_intersects(x1: i8, y1: i8, w1: u8, h1: u8, x2: i8, y2: i8, w2: u8, h2: u8) {
    let a = rect_from(x1, y1, w1, h1);
    let b = rect_from(x2, y2, w2, h2);
    assert_eq!(a.distance_to(&b) == 0.0, a.intersects(&b));
  }

  #[proptest]
  fn bounding_box_is_idempotent(x1: i8, y1: i8, x2: i8, y2: i8, x3: i8, y3: i8) {
    let p = Polygon::new(
      1,
      vec![
        Point::new(x1 as f64, y1 as f64),
        Point::new(x2 as f64, y2 as f64),
        Point::new(x3 as f64, y3 as f64),
      ],
    );
    assert_eq!(p.bounding_rect(), p.bounding_rect());
  }

  #[proptest]
  fn segment_intersection_is_symmetric(ax: i8, ay: i8, bx: i8, by: i8, cx: i8, cy: i8, dx: i8, dy: i8) {
    let (a, b, c, d) = (
      Point::new(ax as f64, ay as f64),
      Point::new(bx as f64, by as f64),
      Point::new(cx as f64, cy as f64),
      Point::new(dx as f64, dy as f64),
    );
    let forward = segment_intersection(&a, &b, &c, &d);
    let backward = segment_intersection(&c, &d, &a, &b);
    assert_eq!(forward.point().is_some(), backward.point().is_some());
    if let (Some(p), Some(q)) = (forward.point(), backward.point()) {
      assert!(p.approx_eq(&q));
    }
  }

  fn non_degenerate_triangle(ax: i8, ay: i8, bx: i8, by: i8, cx: i8, cy: i8) -> Option<Polygon> {
    let p = Polygon::new(
      1,
      vec![
        Point::new(ax as f64, ay as f64),
        Point::new(bx as f64, by as f64),
        Point::new(cx as f64, cy as f64),
      ],
    );
    if p.area() > 1.0 {
      Some(p)
    } else {
      None
    }
  }

  #[proptest]
  fn angle_sum_matches_n_minus_2_times_180(ax: i8, ay: i8, bx: i8, by: i8, cx: i8, cy: i8) {
    if let Some(p) = non_degenerate_triangle(ax, ay, bx, by, cx, cy) {
      let sum: f64 = (0..p.vertex_count()).filter_map(|i| p.vertex_angle(i)).sum();
      assert!((sum - 180.0).abs() < 1e-6, "sum = {sum}");
    }
  }

  #[proptest]
  fn sharp_angle_soundness(ax: i8, ay: i8, bx: i8, by: i8, cx: i8, cy: i8) {
    if let Some(p) = non_degenerate_triangle(ax, ay, bx, by, cx, cy) {
      for record in find_sharp_angles(&[p.clone()], 60.0) {
        let angle = p.vertex_angle(record.vertex_index).unwrap();
        assert!(angle > 0.0 && angle < 60.0);
        assert_eq!(angle, record.angle_degrees);
      }
    }
  }

  fn world_index(entries: &[(u64, Rectangle)]) -> Quadtree<u64> {
    let world = Rectangle::new(-1000.0, -1000.0, 2000.0, 2000.0);
    let index: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for &(id, bounds) in entries {
      index.insert(Entry::new(bounds, id));
    }
    index
  }

  #[proptest]
  fn index_round_trip(x: i16, y: i16, w: u8, h: u8) {
    let world = Rectangle::new(-10_000.0, -10_000.0, 20_000.0, 20_000.0);
    let index: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    let bounds = Rectangle::new(x as f64, y as f64, 1.0 + w as f64, 1.0 + h as f64);
    let entry = Entry::new(bounds, 1u64);
    assert!(index.insert(entry));
    assert!(index.query_range(&bounds).iter().any(|e| e.payload == 1));
    assert!(index.remove(1));
    assert!(!index.query_range(&bounds).iter().any(|e| e.payload == 1));
  }

  #[proptest]
  fn narrow_spacing_soundness(x1: i8, y1: i8, x2: i8, y2: i8) {
    let r1 = Rectangle::new(x1 as f64, y1 as f64, 5.0, 5.0);
    let r2 = Rectangle::new(x2 as f64, y2 as f64, 5.0, 5.0);
    let mk = |id, r: Rectangle| {
      Polygon::new(
        id,
        vec![
          Point::new(r.min_x(), r.min_y()),
          Point::new(r.max_x(), r.min_y()),
          Point::new(r.max_x(), r.max_y()),
          Point::new(r.min_x(), r.max_y()),
        ],
      )
    };
    let polygons = [mk(1, r1), mk(2, r2)];
    let threshold = 2.0;
    let index = world_index(&[
      (1, polygons[0].bounding_rect().expand(threshold)),
      (2, polygons[1].bounding_rect().expand(threshold)),
    ]);
    for record in find_narrow_spacing(&polygons, threshold, &index) {
      assert!(record.distance < threshold);
    }
  }

  /// Over any small collection of polygons, the index-pruned intersection
  /// search reports exactly the pairs a brute-force O(m^2) scan would, under
  /// the same adjacency rule.
  #[proptest]
  fn intersection_soundness_and_completeness(ax: i8, ay: i8, bx: i8, by: i8, cx: i8, cy: i8, dx: i8, dy: i8) {
    let p = Polygon::new(
      1,
      vec![
        Point::new(ax as f64, ay as f64),
        Point::new(bx as f64, by as f64),
        Point::new(cx as f64, cy as f64),
        Point::new(dx as f64, dy as f64),
      ],
    );
    let world = Rectangle::new(-1000.0, -1000.0, 2000.0, 2000.0);
    let index: Quadtree<_> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for e in p.edges() {
      let seg = e.as_segment();
      index.insert(Entry::new(Rectangle::bounding(&[seg.start, seg.end]), e.id()));
    }

    let indexed: std::collections::HashSet<_> = find_intersections(&[p.clone()], false, &index)
      .into_iter()
      .map(|r| (r.edge_index_1.min(r.edge_index_2), r.edge_index_1.max(r.edge_index_2)))
      .collect();

    let n = p.vertex_count() as u32;
    let edges: Vec<_> = p.edges().collect();
    let mut brute_force = std::collections::HashSet::new();
    for i in 0..edges.len() {
      for j in (i + 1)..edges.len() {
        let diff = (j as u32).abs_diff(i as u32);
        if diff == 1 || diff == n - 1 {
          continue;
        }
        let s1 = edges[i].as_segment();
        let s2 = edges[j].as_segment();
        if segment_intersection(&s1.start, &s1.end, &s2.start, &s2.end).is_proper() {
          brute_force.insert((i as u32, j as u32));
        }
      }
    }
    assert_eq!(indexed, brute_force);

    let with_touching = find_intersections(&[p.clone()], true, &index);
    let without_touching = find_intersections(&[p], false, &index);
    assert!(with_touching.len() >= without_touching.len());
  }
}
