//! Polygonal cells and their simulator-facing attributes.

use crate::topology::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a cell. Final ids are sequential in
/// (ring, angular centroid) order.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CellId(u64);

impl CellId {
    /// Creates a `CellId` from a raw index.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        CellId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId").field(&self.0).finish()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cell classification consumed by the downstream simulator.
///
/// The numeric codes are part of the simulator's input contract and are
/// assigned by ring position: the central cell is `Central`, the innermost
/// ring pair `Innermost` (unless it is also the outermost), everything else
/// `Default`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CellType {
    /// Ordinary ring-pair cell (code 0).
    #[default]
    Default,
    /// The single cell enclosed by ring 0 (code 1).
    Central,
    /// Cells of the innermost ring pair (code 3).
    Innermost,
}

impl CellType {
    /// Numeric code expected by the simulator's cell records.
    pub fn code(self) -> u32 {
        match self {
            CellType::Default => 0,
            CellType::Central => 1,
            CellType::Innermost => 3,
        }
    }
}

/// A simple closed polygon over node ids, plus the attribute bag the
/// external serializer writes per cell.
///
/// The node sequence is mutated in place by refinement (nodes inserted,
/// never removed); ids are reassigned exactly once, after the final sort.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    /// Polygon vertices in traversal order.
    pub nodes: Vec<NodeId>,
    /// Ring the cell originates from (0 for the central cell, `i + 1` for
    /// the pair spanning rings `i` and `i + 1`).
    pub ring: usize,
    /// Angular centroid used for the final sort.
    pub angle: f64,
    pub cell_type: CellType,
    pub at_boundary: bool,
    /// Boundary code written verbatim into the cell record.
    pub boundary_code: u32,
    pub area: f64,
    pub target_area: f64,
    pub target_length: f64,
    pub lambda_celllength: f64,
    pub stiffness: f64,
    pub dead: bool,
    pub source: bool,
    pub pin_fixed: bool,
    pub fixed: bool,
    pub div_counter: u32,
}

impl Cell {
    /// Creates a cell with the standard attribute defaults.
    pub fn new(
        id: CellId,
        nodes: Vec<NodeId>,
        ring: usize,
        angle: f64,
        cell_type: CellType,
        at_boundary: bool,
    ) -> Self {
        Self {
            id,
            nodes,
            ring,
            angle,
            cell_type,
            at_boundary,
            boundary_code: 0,
            area: 0.0,
            target_area: 100.0,
            target_length: 0.0,
            lambda_celllength: 0.0,
            stiffness: 1.0,
            dead: false,
            source: false,
            pin_fixed: false,
            fixed: false,
            div_counter: 0,
        }
    }

    /// Consecutive polygon edges, wrapping from the last vertex back to the
    /// first. Empty polygons yield no edges.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| (self.nodes[i], self.nodes[(i + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u64) -> NodeId {
        NodeId::new(i)
    }

    #[test]
    fn edges_wrap_around() {
        let cell = Cell::new(
            CellId::new(0),
            vec![n(0), n(1), n(2)],
            0,
            0.0,
            CellType::Central,
            false,
        );
        let edges: Vec<_> = cell.edges().collect();
        assert_eq!(edges, vec![(n(0), n(1)), (n(1), n(2)), (n(2), n(0))]);
    }

    #[test]
    fn type_codes_match_simulator_contract() {
        assert_eq!(CellType::Default.code(), 0);
        assert_eq!(CellType::Central.code(), 1);
        assert_eq!(CellType::Innermost.code(), 3);
    }

    #[test]
    fn attribute_defaults() {
        let cell = Cell::new(CellId::new(3), vec![], 1, 0.5, CellType::Default, true);
        assert_eq!(cell.target_area, 100.0);
        assert_eq!(cell.stiffness, 1.0);
        assert!(!cell.dead);
        assert_eq!(cell.div_counter, 0);
        assert!(cell.edges().next().is_none());
    }
}
