mod scenarios {
  use layout_geom_core::analysis::{find_intersections, find_narrow_spacing, find_sharp_angles};
  use layout_geom_core::geometry::{Point, Polygon, Rectangle};
  use layout_geom_core::index::{Entry, Quadtree, QuadtreeConfig, RTree, RTreeConfig, SpatialIndex};

  use rand::rngs::SmallRng;
  use rand::{Rng, SeedableRng};

  fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
  }

  fn rect_polygon(id: u64, r: Rectangle) -> Polygon {
    Polygon::new(
      id,
      vec![
        pt(r.min_x(), r.min_y()),
        pt(r.max_x(), r.min_y()),
        pt(r.max_x(), r.max_y()),
        pt(r.min_x(), r.max_y()),
      ],
    )
  }

  /// Scenario 1: a bowtie self-intersects exactly once, near (2, 2).
  #[test]
  fn bowtie_self_intersection() {
    let bowtie = Polygon::new(1, vec![pt(0.0, 0.0), pt(4.0, 4.0), pt(4.0, 0.0), pt(0.0, 4.0)]);
    let world = Rectangle::new(-10.0, -10.0, 30.0, 30.0);
    let index: Quadtree<_> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for e in bowtie.edges() {
      let seg = e.as_segment();
      index.insert(Entry::new(Rectangle::bounding(&[seg.start, seg.end]), e.id()));
    }
    let records = find_intersections(&[bowtie], false, &index);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].polygon_id_1, records[0].polygon_id_2);
    assert!(records[0].point.approx_eq(&pt(2.0, 2.0)));
  }

  /// Scenario 2: the sharp vertex of a thin triangle is the only one reported at 45 degrees.
  #[test]
  fn sharp_angle_triangle() {
    let triangle = Polygon::new(1, vec![pt(5.0, 5.0), pt(15.0, 5.1), pt(6.0, 8.0)]);
    let records = find_sharp_angles(&[triangle], 45.0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vertex_index, 1);
  }

  /// Scenario 3: two parallel rectangles 0.05 apart are reported by narrow-spacing at d = 0.1.
  #[test]
  fn parallel_rectangles_narrow_spacing() {
    let r1 = rect_polygon(1, Rectangle::new(0.0, 0.0, 10.0, 5.0));
    let r2 = rect_polygon(2, Rectangle::new(10.05, 0.0, 10.0, 5.0));
    let polygons = [r1, r2];
    let world = Rectangle::new(-50.0, -50.0, 150.0, 150.0);
    let index: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for p in &polygons {
      index.insert(Entry::new(p.bounding_rect().expand(0.1), p.id()));
    }
    let records = find_narrow_spacing(&polygons, 0.1, &index);
    assert!(records.iter().any(|r| (r.distance - 0.05).abs() < 1e-9));
  }

  /// Scenario 4: rectangles 1.0 apart are outside a 0.5 spacing threshold.
  #[test]
  fn disjoint_rectangles_report_nothing() {
    let r1_rect = Rectangle::new(0.0, 0.0, 5.0, 3.0);
    let r2_rect = Rectangle::new(6.0, 0.0, 5.0, 3.0);
    assert!(!r1_rect.intersects(&r2_rect));
    assert!((r1_rect.distance_to(&r2_rect) - 1.0).abs() < 1e-9);

    let polygons = [rect_polygon(1, r1_rect), rect_polygon(2, r2_rect)];
    let world = Rectangle::new(-50.0, -50.0, 150.0, 150.0);
    let index: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for p in &polygons {
      index.insert(Entry::new(p.bounding_rect().expand(0.5), p.id()));
    }
    assert!(find_narrow_spacing(&polygons, 0.5, &index).is_empty());
  }

  /// Scenario 5: an L-shaped polygon is simple, has no sharp angles at 45 degrees, and area 5.
  #[test]
  fn l_shape_is_simple() {
    let l_shape = Polygon::new(
      1,
      vec![
        pt(0.0, 0.0),
        pt(3.0, 0.0),
        pt(3.0, 1.0),
        pt(1.0, 1.0),
        pt(1.0, 3.0),
        pt(0.0, 3.0),
      ],
    );
    assert_eq!(l_shape.area(), 5.0);
    assert!(find_sharp_angles(&[l_shape.clone()], 45.0).is_empty());

    let world = Rectangle::new(-10.0, -10.0, 30.0, 30.0);
    let index: Quadtree<_> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    for e in l_shape.edges() {
      let seg = e.as_segment();
      index.insert(Entry::new(Rectangle::bounding(&[seg.start, seg.end]), e.id()));
    }
    assert!(find_intersections(&[l_shape], true, &index).is_empty());
  }

  /// Scenario 6: a quadtree and an R-tree built over the same 1000 random
  /// rectangles answer 100 random range queries with identical payload sets.
  #[test]
  fn quadtree_and_rtree_agree_on_random_queries() {
    let mut rng = SmallRng::seed_from_u64(42);
    let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
    let quadtree: Quadtree<u64> = Quadtree::new(world, QuadtreeConfig::default()).unwrap();
    let rtree: RTree<u64> = RTree::new(world, RTreeConfig::default()).unwrap();

    for id in 0..1000u64 {
      let x = rng.gen_range(0.0..99.0);
      let y = rng.gen_range(0.0..99.0);
      let entry = Entry::new(Rectangle::new(x, y, 1.0, 1.0), id);
      assert!(quadtree.insert(entry));
      assert!(rtree.insert(entry));
    }

    for _ in 0..100 {
      let x = rng.gen_range(0.0..80.0);
      let y = rng.gen_range(0.0..80.0);
      let query = Rectangle::new(x, y, 20.0, 20.0);

      let mut from_quadtree: Vec<u64> = quadtree.query_range(&query).into_iter().map(|e| e.payload).collect();
      let mut from_rtree: Vec<u64> = rtree.query_range(&query).into_iter().map(|e| e.payload).collect();
      from_quadtree.sort_unstable();
      from_rtree.sort_unstable();
      from_quadtree.dedup();
      from_rtree.dedup();
      assert_eq!(from_quadtree, from_rtree, "mismatch for query {query:?}");
    }
  }
}
