//! Walls: mesh edges shared by exactly two cells.
//!
//! A wall is the biological interface between two adjacent cells. Walls are
//! derived fresh from the final mesh state, never maintained incrementally.

use crate::topology::cell::CellId;
use crate::topology::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a wall.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct WallId(u64);

impl WallId {
    /// Creates a `WallId` from a raw index.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        WallId(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WallId").field(&self.0).finish()
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall classification in the simulator's input contract.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum WallType {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "aux_source")]
    AuxinSource,
    #[serde(rename = "aux_sink")]
    AuxinSink,
}

impl WallType {
    /// String form written into wall records.
    pub fn as_str(self) -> &'static str {
        match self {
            WallType::Normal => "normal",
            WallType::AuxinSource => "aux_source",
            WallType::AuxinSink => "aux_sink",
        }
    }
}

/// An edge shared by exactly two distinct cells, with `c1 < c2`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub n1: NodeId,
    pub n2: NodeId,
    pub c1: CellId,
    pub c2: CellId,
    pub length: f64,
    pub wall_type: WallType,
    /// Visualization flux placeholder written verbatim by the serializer.
    pub viz_flux: f64,
}
