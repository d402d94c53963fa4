//! Mesh entities and their bookkeeping.
//!
//! Nodes live in a [`arena::NodeArena`] that owns the monotone id counter
//! and the per-ring membership views; cells and walls reference nodes by
//! [`node::NodeId`] only.

pub mod arena;
pub mod cell;
pub mod node;
pub mod wall;
