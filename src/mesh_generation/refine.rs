//! Iterative edge refinement.
//!
//! Two fixed-point phases, each bounded by the configured iteration cap so
//! termination is guaranteed even if new edges keep exceeding a threshold:
//!
//! - **circular**: over-long edges between angularly consecutive ring nodes
//!   are split at the angular midpoint, on the ring's exact radius;
//! - **radial**: over-long cell edges whose endpoints sit at different
//!   radii are split at the cartesian midpoint, off-ring.
//!
//! Every inserted node is spliced into each cell polygon that traverses the
//! split edge, so cell loops stay closed throughout.

use crate::config::MeshConfig;
use crate::geometry;
use crate::topology::arena::NodeArena;
use crate::topology::cell::Cell;
use crate::topology::node::{NodeFlags, NodeId};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::{PI, TAU};

/// Endpoint radii closer than this are treated as one ring; beyond it an
/// edge counts as radial.
const RADIAL_RADIUS_EPS: f64 = 1e-3;

/// Counters from one refinement run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefineOutcome {
    /// Circular passes that inserted at least one node.
    pub circular_passes: usize,
    /// Radial passes that inserted at least one node.
    pub radial_passes: usize,
    pub inserted_circular: usize,
    pub inserted_radial: usize,
}

/// Refines circular then radial edges until every edge meets its threshold
/// or the per-phase iteration cap is reached.
pub fn refine_mesh(arena: &mut NodeArena, cells: &mut [Cell], radii: &[f64], config: &MeshConfig) -> RefineOutcome {
    let mut outcome = RefineOutcome::default();

    for _ in 0..config.max_refine_iterations {
        let inserted = circular_pass(arena, cells, radii, config);
        if inserted == 0 {
            break;
        }
        outcome.inserted_circular += inserted;
        outcome.circular_passes += 1;
    }

    for _ in 0..config.max_refine_iterations {
        let inserted = radial_pass(arena, cells, config);
        if inserted == 0 {
            break;
        }
        outcome.inserted_radial += inserted;
        outcome.radial_passes += 1;
    }

    log::debug!(
        "refinement inserted {} circular and {} radial nodes",
        outcome.inserted_circular,
        outcome.inserted_radial
    );
    outcome
}

/// Unordered edge key: endpoint pair with the smaller id first.
fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

fn special_positions(arena: &NodeArena) -> Vec<[f64; 2]> {
    arena
        .iter()
        .filter(|node| node.flags.special)
        .map(|node| node.position())
        .collect()
}

/// One circular pass. Returns the number of nodes inserted.
fn circular_pass(
    arena: &mut NodeArena,
    cells: &mut [Cell],
    radii: &[f64],
    config: &MeshConfig,
) -> usize {
    let specials = special_positions(arena);

    // Candidate midpoints keyed by the split edge; BTreeMap keeps id
    // assignment deterministic.
    let mut candidates: BTreeMap<(NodeId, NodeId), (usize, f64, bool)> = BTreeMap::new();

    for ring in 0..arena.ring_count() {
        let members = arena.ring(ring);
        if members.len() < 2 {
            continue;
        }
        for i in 0..members.len() {
            let id1 = members[i];
            let id2 = members[(i + 1) % members.len()];
            let (Some(n1), Some(n2)) = (arena.node(id1), arena.node(id2)) else {
                continue;
            };
            if n1.distance_to(n2) <= config.circular_edge_threshold {
                continue;
            }

            // Angular midpoint; unwrap the pair when the arc crosses zero.
            let mut t1 = n1.theta;
            let mut t2 = n2.theta;
            if (t1 - t2).abs() > PI {
                if t1 > t2 {
                    t2 += TAU;
                } else {
                    t1 += TAU;
                }
            }
            let theta_new = geometry::normalize_angle((t1 + t2) / 2.0);
            let r_new = radii[ring];

            // Reserved alignment points suppress nearby insertions.
            let p_new = geometry::polar_to_cartesian(r_new, theta_new);
            if specials
                .iter()
                .any(|s| geometry::distance(p_new, *s) < config.special_point_proximity)
            {
                continue;
            }

            let boundary = n1.flags.boundary || n2.flags.boundary;
            candidates.insert(edge_key(id1, id2), (ring, theta_new, boundary));
        }
    }

    let mut inserted: BTreeMap<(NodeId, NodeId), NodeId> = BTreeMap::new();
    for (&key, &(ring, theta, boundary)) in &candidates {
        let flags = NodeFlags {
            boundary,
            ..NodeFlags::default()
        };
        let id = arena.alloc(radii[ring], theta, flags);
        arena.attach_to_ring(ring, id);
        inserted.insert(key, id);
    }
    arena.sort_rings_by_angle();
    splice_cells(cells, &inserted);
    inserted.len()
}

/// One radial pass. Returns the number of nodes inserted.
fn radial_pass(arena: &mut NodeArena, cells: &mut [Cell], config: &MeshConfig) -> usize {
    // A cell edge is radial when its endpoints sit at different radii.
    let mut radial_edges: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();
    for cell in cells.iter() {
        for (a, b) in cell.edges() {
            let (Some(n1), Some(n2)) = (arena.node(a), arena.node(b)) else {
                continue;
            };
            if (n1.r - n2.r).abs() > RADIAL_RADIUS_EPS {
                radial_edges.insert(edge_key(a, b));
            }
        }
    }

    let mut candidates: BTreeMap<(NodeId, NodeId), [f64; 2]> = BTreeMap::new();
    for &(a, b) in &radial_edges {
        let (Some(n1), Some(n2)) = (arena.node(a), arena.node(b)) else {
            continue;
        };
        let p1 = n1.position();
        let p2 = n2.position();
        if geometry::distance(p1, p2) > config.radial_edge_threshold {
            candidates.insert((a, b), [(p1[0] + p2[0]) / 2.0, (p1[1] + p2[1]) / 2.0]);
        }
    }

    let mut inserted: BTreeMap<(NodeId, NodeId), NodeId> = BTreeMap::new();
    for (&key, &midpoint) in &candidates {
        let (r, theta) = geometry::cartesian_to_polar(midpoint);
        // Radial midpoints never carry the boundary flag.
        let id = arena.alloc(r, theta, NodeFlags::default());
        arena.attach_off_ring(id);
        inserted.insert(key, id);
    }
    splice_cells(cells, &inserted);
    inserted.len()
}

/// Splices every inserted node into each cell polygon edge it splits.
fn splice_cells(cells: &mut [Cell], inserted: &BTreeMap<(NodeId, NodeId), NodeId>) {
    if inserted.is_empty() {
        return;
    }
    for cell in cells.iter_mut() {
        let old = &cell.nodes;
        let n = old.len();
        if n == 0 {
            continue;
        }
        let mut updated = Vec::with_capacity(n + inserted.len());
        for i in 0..n {
            let a = old[i];
            let b = old[(i + 1) % n];
            updated.push(a);
            if let Some(&mid) = inserted.get(&edge_key(a, b)) {
                updated.push(mid);
            }
        }
        cell.nodes = updated;
    }
}
