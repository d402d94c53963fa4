//! Initial node placement on the ring radii.

use crate::topology::arena::NodeArena;
use crate::topology::node::NodeFlags;
use std::f64::consts::TAU;

/// Places the initial nodes on every ring.
///
/// Ring 0 gets `a[0]` fixed nodes at the sector angles. Every intermediate
/// ring gets the union of two angle sets: one aligned with the previous
/// ring's division count (so ring-pair cells meet face to face) and one at
/// its own resolution. The union is concatenated, not deduplicated;
/// coincident nodes at matching angles are resolved later by fusion. The
/// last ring gets `a[n-2]` boundary nodes aligned to the penultimate ring.
pub fn place_initial_nodes(arena: &mut NodeArena, radii: &[f64], division_counts: &[usize]) {
    let ring_count = radii.len();
    for (ring, &radius) in radii.iter().enumerate() {
        if ring == 0 {
            place_ring(arena, ring, radius, division_counts[0], NodeFlags::initial_fixed());
        } else if ring + 1 < ring_count {
            place_ring(arena, ring, radius, division_counts[ring - 1], NodeFlags::initial());
            place_ring(arena, ring, radius, division_counts[ring], NodeFlags::initial());
        } else {
            place_ring(
                arena,
                ring,
                radius,
                division_counts[ring - 1],
                NodeFlags::initial_boundary(),
            );
        }
    }
}

fn place_ring(arena: &mut NodeArena, ring: usize, radius: f64, divisions: usize, flags: NodeFlags) {
    for j in 0..divisions {
        let theta = TAU * j as f64 / divisions as f64;
        let id = arena.alloc(radius, theta, flags);
        arena.attach_to_ring(ring, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::radii::ring_radii;

    #[test]
    fn two_ring_placement_matches_reference_scenario() {
        let radii = ring_radii(2, 10.0, &[4], &[1.0]);
        let mut arena = NodeArena::new(2);
        place_initial_nodes(&mut arena, &radii, &[4]);

        assert_eq!(arena.len(), 8);
        assert_eq!(arena.ring(0).len(), 4);
        assert_eq!(arena.ring(1).len(), 4);
        for &id in arena.ring(0) {
            let node = arena.node(id).unwrap();
            assert!(node.flags.fixed && node.flags.initial && !node.flags.boundary);
            assert!((node.r - 10.0).abs() < 1e-12);
        }
        for &id in arena.ring(1) {
            let node = arena.node(id).unwrap();
            assert!(node.flags.boundary && node.flags.initial && !node.flags.fixed);
            assert!((node.r - radii[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn intermediate_rings_concatenate_both_angle_sets() {
        let radii = ring_radii(3, 10.0, &[4, 6], &[1.0, 1.0]);
        let mut arena = NodeArena::new(3);
        place_initial_nodes(&mut arena, &radii, &[4, 6]);

        // Ring 1 carries 4 aligned + 6 own nodes, duplicates included.
        assert_eq!(arena.ring(1).len(), 10);
        // Last ring aligns to the penultimate resolution.
        assert_eq!(arena.ring(2).len(), 6);
        assert_eq!(arena.len(), 4 + 10 + 6);
    }

    #[test]
    fn ids_are_sequential_across_rings() {
        let radii = ring_radii(2, 5.0, &[3], &[1.0]);
        let mut arena = NodeArena::new(2);
        place_initial_nodes(&mut arena, &radii, &[3]);
        let ids: Vec<u64> = arena.iter().map(|n| n.id.get()).collect();
        assert_eq!(ids, (0..6).collect::<Vec<_>>());
    }
}
