//! Concentric ring mesh generation pipeline.
//!
//! [`generate`] chains the stages in dependency order: ring radii, initial
//! node placement, near-duplicate fusion, cell assembly, edge refinement,
//! wall derivation, and area computation. The run is single-threaded and
//! deterministic for identical floating-point inputs; all intermediate
//! state lives in one [`NodeArena`] that is rebuilt from scratch per run.

pub mod area;
pub mod cells;
pub mod fusion;
pub mod placement;
pub mod radii;
pub mod refine;
pub mod walls;

use crate::config::MeshConfig;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::arena::NodeArena;
use crate::topology::cell::Cell;
use crate::topology::node::{Node, NodeId};
use crate::topology::wall::Wall;
use hashbrown::HashMap;

pub use cells::SkippedSector;
pub use fusion::FusionOutcome;
pub use refine::RefineOutcome;

/// Non-fatal findings from one generation run.
#[derive(Clone, Debug, Default)]
pub struct MeshDiagnostics {
    /// Sectors whose cell could not be anchored and was skipped.
    pub skipped_sectors: Vec<SkippedSector>,
    /// Number of pairwise node fusions performed.
    pub fused_pairs: usize,
    /// Refinement pass and insertion counters.
    pub refine: RefineOutcome,
}

/// The finished in-memory mesh handed to the external serializer.
#[derive(Clone, Debug)]
pub struct Mesh {
    arena: NodeArena,
    /// Cells in (ring, angular centroid) order with sequential ids.
    pub cells: Vec<Cell>,
    /// Walls between adjacent cells.
    pub walls: Vec<Wall>,
    /// Uniform per-cell target-area baseline: boundary hull area divided by
    /// the cell count.
    pub base_area: f64,
    /// Superseded node id to merged node id, for downstream id rewriting.
    pub fusion_remap: HashMap<NodeId, NodeId>,
    pub diagnostics: MeshDiagnostics,
}

impl Mesh {
    /// The node arena, including superseded nodes.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Looks up any ever-allocated node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.node(id)
    }

    /// Live nodes in (ring, angle) order followed by off-ring nodes.
    pub fn nodes(&self) -> Vec<&Node> {
        self.arena.live_nodes()
    }

    /// Live node count.
    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Live node ids with cartesian positions, in the order of
    /// [`Mesh::nodes`]. Convenience view for serializers working in x/y.
    pub fn nodes_cartesian(&self) -> Vec<(NodeId, [f64; 2])> {
        self.nodes()
            .into_iter()
            .map(|node| (node.id, node.position()))
            .collect()
    }
}

/// Runs the full generation pipeline for `config`.
///
/// Fails fast on invalid configuration; sectors with missing anchors are
/// skipped non-fatally and reported through [`MeshDiagnostics`].
pub fn generate(config: &MeshConfig) -> Result<Mesh, MeshError> {
    config.validate()?;

    let radii = radii::ring_radii(
        config.ring_count,
        config.base_radius,
        &config.division_counts,
        &config.ratios,
    );

    let mut arena = NodeArena::new(config.ring_count);
    placement::place_initial_nodes(&mut arena, &radii, &config.division_counts);

    let fusion = fusion::fuse_close_nodes(&mut arena, config.fusion_distance);

    let (mut cells, skipped_sectors) =
        cells::build_cells(&arena, &config.division_counts, config.angle_tolerance);

    let refine = refine::refine_mesh(&mut arena, &mut cells, &radii, config);

    let walls = walls::build_walls(&arena, &cells);
    area::compute_cell_areas(&arena, &mut cells);
    let hull_area = area::boundary_hull_area(&arena);
    let base_area = if cells.is_empty() {
        0.0
    } else {
        hull_area / cells.len() as f64
    };

    log::debug!(
        "generated mesh: {} nodes, {} cells, {} walls, base area {base_area:.4}",
        arena.len(),
        cells.len(),
        walls.len()
    );

    let mesh = Mesh {
        arena,
        cells,
        walls,
        base_area,
        fusion_remap: fusion.remap,
        diagnostics: MeshDiagnostics {
            skipped_sectors,
            fused_pairs: fusion.merged_pairs,
            refine,
        },
    };
    mesh.debug_assert_invariants();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_fails_before_generation() {
        let config = MeshConfig {
            base_radius: -1.0,
            ..MeshConfig::default()
        };
        assert!(matches!(
            generate(&config),
            Err(MeshError::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_config_generates_a_complete_mesh() {
        let mesh = generate(&MeshConfig::default()).unwrap();
        assert!(mesh.diagnostics.skipped_sectors.is_empty());
        // 1 central + 25 + 25 + 30 sector cells.
        assert_eq!(mesh.cells.len(), 81);
        // Default thresholds refine every initial edge (chords ~50 vs 10),
        // so no surviving cell edge joins two initial nodes.
        assert!(mesh.diagnostics.refine.inserted_circular > 0);
        assert!(mesh.walls.is_empty());
        assert!(mesh.base_area > 0.0);
        assert_eq!(mesh.validate_invariants(), Ok(()));
    }

    #[test]
    fn coarse_thresholds_keep_the_initial_walls() {
        let config = MeshConfig {
            circular_edge_threshold: 1e9,
            radial_edge_threshold: 1e9,
            ..MeshConfig::default()
        };
        let mesh = generate(&config).unwrap();
        assert_eq!(mesh.diagnostics.refine, RefineOutcome::default());
        assert!(!mesh.walls.is_empty());
        for wall in &mesh.walls {
            let n1 = mesh.node(wall.n1).unwrap();
            let n2 = mesh.node(wall.n2).unwrap();
            assert!(n1.flags.initial && n2.flags.initial);
        }
    }

    #[test]
    fn base_area_is_hull_area_over_cell_count() {
        let config = MeshConfig {
            ring_count: 2,
            base_radius: 10.0,
            division_counts: vec![4],
            ratios: vec![1.0],
            circular_edge_threshold: 1000.0,
            radial_edge_threshold: 1000.0,
            ..MeshConfig::default()
        };
        let mesh = generate(&config).unwrap();
        // Boundary hull is the square through the 4 outer nodes.
        let r = 10.0 * (1.0 + 2.0 * (std::f64::consts::PI / 4.0).sin());
        let hull = 2.0 * r * r;
        assert!((mesh.base_area - hull / 5.0).abs() < 1e-9);
    }
}
