//! `NodeId` and `Node`: the vertices of the ring mesh.
//!
//! `NodeId` is a strong, zero-cost handle. Ids are assigned monotonically
//! by [`crate::topology::arena::NodeArena`] starting at 0; a node is never
//! deleted, only superseded via the fusion remap, so an id stays resolvable
//! for the lifetime of a generation run.

use crate::geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a mesh node.
///
/// # Memory layout
/// `repr(transparent)` over a `u64`, so it can cross FFI or serialization
/// boundaries exactly like the raw integer.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Raw index as `usize`, for dense arena storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role flags carried by every node.
///
/// `initial` marks nodes of the pre-refinement mesh (wall endpoints must be
/// initial), `boundary` marks the outer tissue hull, `fixed` pins the node
/// in the downstream simulator, `sam` tags shoot-apical-meristem nodes, and
/// `special` protects an alignment point from nearby refinement insertions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    pub initial: bool,
    pub sam: bool,
    pub boundary: bool,
    pub fixed: bool,
    pub special: bool,
}

impl NodeFlags {
    /// Flags for a freshly placed node.
    pub fn initial() -> Self {
        Self {
            initial: true,
            ..Self::default()
        }
    }

    /// Flags for a placed node pinned in the simulator.
    pub fn initial_fixed() -> Self {
        Self {
            fixed: true,
            ..Self::initial()
        }
    }

    /// Flags for a placed node on the outer tissue hull.
    pub fn initial_boundary() -> Self {
        Self {
            boundary: true,
            ..Self::initial()
        }
    }
}

/// A mesh vertex in polar coordinates.
///
/// The polar pair is the source of truth; cartesian coordinates are derived
/// on demand via [`Node::position`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Distance from the tissue center.
    pub r: f64,
    /// Angle in `[0, 2*pi)`.
    pub theta: f64,
    #[serde(flatten)]
    pub flags: NodeFlags,
}

impl Node {
    /// Cartesian position of the node.
    #[inline]
    pub fn position(&self) -> [f64; 2] {
        geometry::polar_to_cartesian(self.r, self.theta)
    }

    /// Euclidean distance to another node.
    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        geometry::distance(self.position(), other.position())
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // repr(transparent) guarantee over the raw index.
    assert_eq_size!(NodeId, u64);
}
