//! Generation parameters for a concentric ring mesh.
//!
//! All tolerances that used to be magic constants in ad-hoc scripts are
//! named fields here. [`MeshConfig::validate`] rejects invalid inputs before
//! any geometry is produced; generation itself never re-validates.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};

/// Configuration for one mesh-generation run.
///
/// `ring_count` is the number of concentric rings (`n`); `division_counts`
/// and `ratios` describe the `n - 1` ring-to-ring segments, so both must
/// have exactly `ring_count - 1` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Number of concentric rings, including the innermost ring.
    pub ring_count: usize,
    /// Radius of the innermost ring.
    pub base_radius: f64,
    /// Angular division count per ring segment (`a[0..n-2]`).
    pub division_counts: Vec<usize>,
    /// Radius-to-chord ratio per ring segment (`rho[0..n-2]`).
    pub ratios: Vec<f64>,
    /// Two nodes closer than this are fused into one.
    pub fusion_distance: f64,
    /// Circular edges longer than this are subdivided during refinement.
    pub circular_edge_threshold: f64,
    /// Radial edges longer than this are subdivided during refinement.
    pub radial_edge_threshold: f64,
    /// Refinement skips candidate points this close to a special node.
    pub special_point_proximity: f64,
    /// Hard cap on passes per refinement phase.
    pub max_refine_iterations: usize,
    /// Angle-equivalence tolerance for anchor matching, in radians.
    pub angle_tolerance: f64,
}

impl Default for MeshConfig {
    /// Defaults matching the reference cambium tissue layout.
    fn default() -> Self {
        Self {
            ring_count: 4,
            base_radius: 200.0,
            division_counts: vec![25, 25, 30],
            ratios: vec![1.0, 1.0, 0.5],
            fusion_distance: 5.0,
            circular_edge_threshold: 10.0,
            radial_edge_threshold: 10.0,
            special_point_proximity: 1.0,
            max_refine_iterations: 5,
            angle_tolerance: 1e-3,
        }
    }
}

impl MeshConfig {
    /// Checks the configuration, failing fast before generation starts.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.ring_count < 2 {
            return Err(invalid("ring_count must be at least 2"));
        }
        if !(self.base_radius > 0.0) {
            return Err(invalid("base_radius must be positive"));
        }
        let segments = self.ring_count - 1;
        if self.division_counts.len() != segments {
            return Err(invalid(format!(
                "division_counts has {} entries, expected {segments}",
                self.division_counts.len()
            )));
        }
        if self.ratios.len() != segments {
            return Err(invalid(format!(
                "ratios has {} entries, expected {segments}",
                self.ratios.len()
            )));
        }
        if self.division_counts.iter().any(|&a| a == 0) {
            return Err(invalid("division_counts must be positive"));
        }
        // The innermost ring doubles as the central cell polygon.
        if self.division_counts[0] < 3 {
            return Err(invalid("division_counts[0] must be at least 3"));
        }
        if self.ratios.iter().any(|&r| !(r > 0.0)) {
            return Err(invalid("ratios must be positive"));
        }
        for (name, value) in [
            ("fusion_distance", self.fusion_distance),
            ("circular_edge_threshold", self.circular_edge_threshold),
            ("radial_edge_threshold", self.radial_edge_threshold),
            ("special_point_proximity", self.special_point_proximity),
            ("angle_tolerance", self.angle_tolerance),
        ] {
            if !(value > 0.0) {
                return Err(invalid(format!("{name} must be positive")));
            }
        }
        if self.max_refine_iterations == 0 {
            return Err(invalid("max_refine_iterations must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> MeshError {
    MeshError::InvalidConfig(message.into())
}
