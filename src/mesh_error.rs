//! MeshError: unified error type for cambium-mesh public APIs
//!
//! Every fallible public API in the crate reports failures through this
//! enum so callers get robust, non-panicking error handling.

use crate::topology::cell::CellId;
use crate::topology::node::NodeId;
use thiserror::Error;

/// Unified error type for mesh-generation operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// The configuration failed validation before generation started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A node id was referenced that does not exist in the arena.
    #[error("node `{0}` not found")]
    MissingNode(NodeId),
    /// A cell id was referenced that does not exist.
    #[error("cell `{0}` not found")]
    MissingCell(CellId),
    /// A structural invariant of the finished mesh does not hold.
    #[error("mesh invariant violated: {0}")]
    InvariantViolation(String),
}
