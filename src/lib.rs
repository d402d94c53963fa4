//! # cambium-mesh
//!
//! cambium-mesh builds the initial two-dimensional planar mesh of polygonal
//! cells arranged in concentric rings that seeds a downstream tissue-growth
//! simulator. The pipeline computes ring radii, places nodes at parametric
//! angles, fuses near-coincident nodes introduced by mismatched ring
//! resolutions, assembles one polygon cell per angular sector of each ring
//! pair (plus one central cell), iteratively subdivides over-long circular
//! and radial edges, derives the shared-edge walls between adjacent cells,
//! and computes polygon areas.
//!
//! The crate is library-only and purely computational: single-threaded,
//! deterministic for identical floating-point inputs, no I/O. The finished
//! [`mesh_generation::Mesh`] (nodes, cells, walls, reference area) is meant
//! to be consumed by an external document-model/serialization layer.
//!
//! ## Usage
//!
//! ```rust
//! use cambium_mesh::prelude::*;
//!
//! let config = MeshConfig {
//!     ring_count: 2,
//!     base_radius: 10.0,
//!     division_counts: vec![4],
//!     ratios: vec![1.0],
//!     ..MeshConfig::default()
//! };
//! let mesh = generate(&config).expect("valid configuration");
//! assert_eq!(mesh.cells.len(), 5);
//! ```

pub mod config;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::config::MeshConfig;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{
        Mesh, MeshDiagnostics, RefineOutcome, SkippedSector, generate,
    };
    pub use crate::topology::arena::NodeArena;
    pub use crate::topology::cell::{Cell, CellId, CellType};
    pub use crate::topology::node::{Node, NodeFlags, NodeId};
    pub use crate::topology::wall::{Wall, WallId, WallType};
}
