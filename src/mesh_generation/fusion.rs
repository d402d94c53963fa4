//! Pairwise fusion of near-coincident nodes.
//!
//! Mismatched angular resolutions between adjacent rings leave pairs of
//! nodes that are meant to be the same vertex. Fusion merges any two nodes
//! closer than the threshold into one fresh node at their cartesian
//! midpoint and records the id remap for downstream consumers.
//!
//! Merging is strictly pairwise over a snapshot of the pre-fusion nodes:
//! when three nodes are mutually within the threshold, several independent
//! pairwise merges fire and a shared source id keeps the remap entry of the
//! last merge that touched it. This mirrors the reference behavior; it is
//! not a clustering pass.

use crate::geometry;
use crate::topology::arena::NodeArena;
use crate::topology::node::{NodeFlags, NodeId};
use hashbrown::HashMap;
use std::collections::BTreeSet;

/// Result of one fusion pass.
#[derive(Clone, Debug, Default)]
pub struct FusionOutcome {
    /// Superseded source id to merged node id.
    pub remap: HashMap<NodeId, NodeId>,
    /// Number of pairwise merges performed.
    pub merged_pairs: usize,
}

/// Fuses every pair of nodes closer than `threshold`.
///
/// Source nodes are detached from their rings (their ids stay resolvable);
/// each merged node is attached to both source rings when those differ.
pub fn fuse_close_nodes(arena: &mut NodeArena, threshold: f64) -> FusionOutcome {
    arena.sort_rings_by_angle();

    // Snapshot of (id, ring, position) for every ring member, in ring order.
    // New nodes allocated below never join the pair scan.
    let mut snapshot = Vec::new();
    for ring in 0..arena.ring_count() {
        for &id in arena.ring(ring) {
            if let Some(node) = arena.node(id) {
                snapshot.push((id, ring, node.position()));
            }
        }
    }

    let mut pairs = Vec::new();
    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            if geometry::distance(snapshot[i].2, snapshot[j].2) < threshold {
                pairs.push((i, j));
            }
        }
    }

    let mut outcome = FusionOutcome::default();
    let mut superseded: BTreeSet<NodeId> = BTreeSet::new();

    for &(i, j) in &pairs {
        let (id1, ring1, p1) = snapshot[i];
        let (id2, ring2, p2) = snapshot[j];
        let (flags1, flags2) = match (arena.node(id1), arena.node(id2)) {
            (Some(n1), Some(n2)) => (n1.flags, n2.flags),
            _ => continue,
        };

        let midpoint = [(p1[0] + p2[0]) / 2.0, (p1[1] + p2[1]) / 2.0];
        let (r, theta) = geometry::cartesian_to_polar(midpoint);
        let flags = NodeFlags {
            initial: flags1.initial && flags2.initial,
            boundary: flags1.boundary || flags2.boundary,
            sam: false,
            fixed: false,
            special: false,
        };

        let merged = arena.alloc(r, theta, flags);
        arena.attach_to_ring(ring1, merged);
        if ring1 != ring2 {
            arena.attach_to_ring(ring2, merged);
        }

        // A later merge overwrites the entry of a shared source id.
        outcome.remap.insert(id1, merged);
        outcome.remap.insert(id2, merged);
        superseded.insert(id1);
        superseded.insert(id2);
        outcome.merged_pairs += 1;
    }

    for &id in &superseded {
        arena.detach_from_rings(id);
    }
    arena.sort_rings_by_angle();

    log::debug!(
        "fused {} node pairs ({} sources superseded)",
        outcome.merged_pairs,
        superseded.len()
    );
    outcome
}
