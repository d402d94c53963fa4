//! End-to-end checks of the generation pipeline on small ring layouts.

use cambium_mesh::prelude::*;
use std::f64::consts::{PI, TAU};

/// Two rings, four sectors, no refinement: the reference scenario.
fn two_ring_config() -> MeshConfig {
    MeshConfig {
        ring_count: 2,
        base_radius: 10.0,
        division_counts: vec![4],
        ratios: vec![1.0],
        fusion_distance: 0.5,
        circular_edge_threshold: 1000.0,
        radial_edge_threshold: 1000.0,
        special_point_proximity: 0.5,
        max_refine_iterations: 5,
        angle_tolerance: 1e-3,
    }
}

#[test]
fn two_ring_scenario_geometry() {
    let mesh = generate(&two_ring_config()).unwrap();

    // radius[1] = 10 + 2 sin(pi/4) * 10
    let outer = 10.0 + 2.0 * (PI / 4.0).sin() * 10.0;
    assert!((outer - 24.142135623730951).abs() < 1e-9);

    let nodes = mesh.nodes();
    assert_eq!(nodes.len(), 8);

    let inner: Vec<_> = nodes.iter().filter(|n| (n.r - 10.0).abs() < 1e-9).collect();
    let outer_nodes: Vec<_> = nodes.iter().filter(|n| (n.r - outer).abs() < 1e-9).collect();
    assert_eq!(inner.len(), 4);
    assert_eq!(outer_nodes.len(), 4);

    for node in &inner {
        assert!(node.flags.fixed && node.flags.initial && !node.flags.boundary);
    }
    for node in &outer_nodes {
        assert!(node.flags.boundary && node.flags.initial && !node.flags.fixed);
    }

    // Both rings sit on the same four sector angles.
    for ring in [&inner, &outer_nodes] {
        let mut angles: Vec<f64> = ring.iter().map(|n| n.theta).collect();
        angles.sort_by(f64::total_cmp);
        for (k, angle) in angles.iter().enumerate() {
            assert!((angle - TAU * k as f64 / 4.0).abs() < 1e-9);
        }
    }
}

#[test]
fn two_ring_scenario_cells_and_walls() {
    let mesh = generate(&two_ring_config()).unwrap();

    // One central 4-node cell plus four ring-pair quads.
    assert_eq!(mesh.cells.len(), 5);
    assert_eq!(mesh.cells[0].cell_type, CellType::Central);
    assert_eq!(mesh.cells[0].nodes.len(), 4);
    for cell in &mesh.cells[1..] {
        assert_eq!(cell.nodes.len(), 4);
        assert!(cell.at_boundary);
    }

    // No wall spans two boundary nodes: the outer square edges are absent.
    for wall in &mesh.walls {
        assert_ne!(wall.c1, wall.c2);
        let n1 = mesh.node(wall.n1).unwrap();
        let n2 = mesh.node(wall.n2).unwrap();
        assert!(!(n1.flags.boundary && n2.flags.boundary));
        assert!(n1.flags.initial && n2.flags.initial);
        assert!(wall.length > 0.0);
    }
    // The four radial spokes are walls between adjacent quads.
    let spokes = mesh
        .walls
        .iter()
        .filter(|w| {
            let r1 = mesh.node(w.n1).unwrap().r;
            let r2 = mesh.node(w.n2).unwrap().r;
            (r1 - r2).abs() > 1e-9
        })
        .count();
    assert_eq!(spokes, 4);

    let spoke_len = 2.0 * (PI / 4.0).sin() * 10.0;
    for wall in &mesh.walls {
        let r1 = mesh.node(wall.n1).unwrap().r;
        let r2 = mesh.node(wall.n2).unwrap().r;
        if (r1 - r2).abs() > 1e-9 {
            assert!((wall.length - spoke_len).abs() < 1e-9);
        }
    }
}

#[test]
fn cell_areas_tile_the_boundary_hull() {
    let mesh = generate(&two_ring_config()).unwrap();

    let total: f64 = mesh.cells.iter().map(|c| c.area).sum();
    let outer = 10.0 + 2.0 * (PI / 4.0).sin() * 10.0;
    // Outer hull is the square through the boundary nodes: area 2 r^2.
    let hull = 2.0 * outer * outer;
    assert!((total - hull).abs() < 1e-6 * hull);
    assert!((mesh.base_area - hull / 5.0).abs() < 1e-6 * hull);

    // Central cell is the inner square.
    assert!((mesh.cells[0].area - 200.0).abs() < 1e-9);
}

#[test]
fn refinement_preserves_area_conservation() {
    let config = MeshConfig {
        circular_edge_threshold: 10.0,
        radial_edge_threshold: 10.0,
        ..two_ring_config()
    };
    let mesh = generate(&config).unwrap();

    assert!(mesh.diagnostics.refine.inserted_circular > 0);
    assert!(mesh.diagnostics.refine.inserted_radial > 0);

    // Circular refinement moved the hull outward onto finer chords of the
    // outer ring; the cells still tile it exactly.
    let total: f64 = mesh.cells.iter().map(|c| c.area).sum();
    let hull = mesh.base_area * mesh.cells.len() as f64;
    assert!((total - hull).abs() < 1e-6 * hull);
}

#[test]
fn mismatched_ring_resolutions_fuse_aligned_nodes() {
    // Rings at 6 and 12 divisions share every second angle; the aligned
    // copies on ring 1 (6-set and 12-set) coincide and must fuse.
    let config = MeshConfig {
        ring_count: 3,
        base_radius: 50.0,
        division_counts: vec![6, 12],
        ratios: vec![1.0, 1.0],
        fusion_distance: 1e-6,
        circular_edge_threshold: 1e9,
        radial_edge_threshold: 1e9,
        special_point_proximity: 1e-3,
        max_refine_iterations: 5,
        angle_tolerance: 1e-3,
    };
    let mesh = generate(&config).unwrap();

    // Ring 1 was placed with 6 + 12 nodes; the 6 aligned pairs fused.
    assert_eq!(mesh.diagnostics.fused_pairs, 6);
    assert!(mesh.diagnostics.skipped_sectors.is_empty());
    // 1 central + 6 + 12 sector cells.
    assert_eq!(mesh.cells.len(), 19);

    // Every superseded node resolves through the remap to a live node.
    for (&old, &new) in &mesh.fusion_remap {
        assert!(mesh.node(old).is_some());
        let merged = mesh.node(new).unwrap();
        assert!(merged.flags.initial);
    }

    // Conservation still holds with fused vertices threaded into cells.
    let total: f64 = mesh.cells.iter().map(|c| c.area).sum();
    let hull = mesh.base_area * mesh.cells.len() as f64;
    assert!((total - hull).abs() < 1e-6 * hull);
}

#[test]
fn sequential_cell_ids_in_ring_then_angle_order() {
    let mesh = generate(&MeshConfig::default()).unwrap();
    for (i, cell) in mesh.cells.iter().enumerate() {
        assert_eq!(cell.id.get(), i as u64);
    }
    for pair in mesh.cells.windows(2) {
        assert!(
            pair[0].ring < pair[1].ring
                || (pair[0].ring == pair[1].ring && pair[0].angle <= pair[1].angle)
        );
    }
}
