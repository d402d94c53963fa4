//! `NodeArena`: dense node storage plus ring membership views.
//!
//! The arena owns the monotone id counter: every allocation returns a fresh
//! `NodeId` equal to the node's slot index, so lookups are O(1) and ids
//! never repeat within a run. Ring membership is bookkeeping only: a node
//! detached from its rings (superseded by fusion) still resolves by id.

use crate::geometry;
use crate::topology::node::{Node, NodeFlags, NodeId};

/// Arena of mesh nodes with per-ring, angle-sorted id vectors.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    rings: Vec<Vec<NodeId>>,
    off_ring: Vec<NodeId>,
}

impl NodeArena {
    /// Creates an empty arena with `ring_count` rings.
    pub fn new(ring_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            rings: vec![Vec::new(); ring_count],
            off_ring: Vec::new(),
        }
    }

    /// Allocates a node with a fresh id. The node belongs to no ring until
    /// attached.
    pub fn alloc(&mut self, r: f64, theta: f64, flags: NodeFlags) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node {
            id,
            r,
            theta: geometry::normalize_angle(theta),
            flags,
        });
        id
    }

    /// Appends an existing node id to a ring's membership list.
    pub fn attach_to_ring(&mut self, ring: usize, id: NodeId) {
        self.rings[ring].push(id);
    }

    /// Records a node that sits between rings (radial refinement product).
    pub fn attach_off_ring(&mut self, id: NodeId) {
        self.off_ring.push(id);
    }

    /// Removes an id from every ring membership list. The node itself stays
    /// resolvable.
    pub fn detach_from_rings(&mut self, id: NodeId) {
        for ring in &mut self.rings {
            ring.retain(|&member| member != id);
        }
    }

    /// Looks up a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable lookup by id.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated (including superseded ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of rings.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Membership of one ring, in the current sort order.
    pub fn ring(&self, ring: usize) -> &[NodeId] {
        &self.rings[ring]
    }

    /// Nodes sitting between rings.
    pub fn off_ring(&self) -> &[NodeId] {
        &self.off_ring
    }

    /// All allocated nodes in id order, superseded ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Ids of live nodes: ring members in (ring, angle) order, then the
    /// off-ring nodes in creation order. Fused nodes shared by two rings
    /// appear once per ring, matching the ring views.
    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rings
            .iter()
            .flatten()
            .copied()
            .chain(self.off_ring.iter().copied())
    }

    /// Live nodes in the same order as [`NodeArena::live_ids`], deduplicated
    /// by id.
    pub fn live_nodes(&self) -> Vec<&Node> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        for id in self.live_ids() {
            if !seen[id.index()] {
                seen[id.index()] = true;
                out.push(&self.nodes[id.index()]);
            }
        }
        out
    }

    /// Re-sorts every ring's membership list by node angle.
    pub fn sort_rings_by_angle(&mut self) {
        let nodes = &self.nodes;
        for ring in &mut self.rings {
            ring.sort_by(|a, b| nodes[a.index()].theta.total_cmp(&nodes[b.index()].theta));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotone_slot_indices() {
        let mut arena = NodeArena::new(1);
        let a = arena.alloc(1.0, 0.0, NodeFlags::initial());
        let b = arena.alloc(1.0, 1.0, NodeFlags::initial());
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(arena.node(b).map(|n| n.id), Some(b));
        assert!(arena.node(NodeId::new(5)).is_none());
    }

    #[test]
    fn detach_keeps_node_resolvable() {
        let mut arena = NodeArena::new(2);
        let a = arena.alloc(1.0, 0.0, NodeFlags::initial());
        arena.attach_to_ring(0, a);
        arena.attach_to_ring(1, a);
        arena.detach_from_rings(a);
        assert!(arena.ring(0).is_empty());
        assert!(arena.ring(1).is_empty());
        assert!(arena.node(a).is_some());
    }

    #[test]
    fn rings_sort_by_angle() {
        let mut arena = NodeArena::new(1);
        let a = arena.alloc(1.0, 2.0, NodeFlags::initial());
        let b = arena.alloc(1.0, 0.5, NodeFlags::initial());
        let c = arena.alloc(1.0, 1.0, NodeFlags::initial());
        for id in [a, b, c] {
            arena.attach_to_ring(0, id);
        }
        arena.sort_rings_by_angle();
        assert_eq!(arena.ring(0), &[b, c, a]);
    }

    #[test]
    fn live_nodes_deduplicate_shared_ids() {
        let mut arena = NodeArena::new(2);
        let a = arena.alloc(1.0, 0.0, NodeFlags::initial());
        arena.attach_to_ring(0, a);
        arena.attach_to_ring(1, a);
        let b = arena.alloc(2.0, 0.0, NodeFlags::default());
        arena.attach_off_ring(b);
        let live = arena.live_nodes();
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].id, a);
        assert_eq!(live[1].id, b);
    }
}
