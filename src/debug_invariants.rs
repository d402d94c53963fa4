//! Structural invariant checks for the finished mesh.

use crate::mesh_error::MeshError;
use crate::mesh_generation::Mesh;
use hashbrown::HashMap;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] mesh: {e}");
        }
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        // Ring membership lists must not repeat an id within one ring.
        for ring in 0..self.arena().ring_count() {
            let members = self.arena().ring(ring);
            let mut seen = hashbrown::HashSet::with_capacity(members.len());
            for &id in members {
                if !seen.insert(id) {
                    return Err(violation(format!("node {id} listed twice on ring {ring}")));
                }
            }
        }

        // Cell polygons: at least 3 resolvable vertices, no zero-length
        // index repetition between consecutive vertices.
        for cell in &self.cells {
            if cell.nodes.len() < 3 {
                return Err(violation(format!(
                    "cell {} has only {} vertices",
                    cell.id,
                    cell.nodes.len()
                )));
            }
            for &id in &cell.nodes {
                if self.node(id).is_none() {
                    return Err(MeshError::MissingNode(id));
                }
            }
            for (a, b) in cell.edges() {
                if a == b {
                    return Err(violation(format!(
                        "cell {} repeats node {a} on consecutive vertices",
                        cell.id
                    )));
                }
            }
        }

        // An interior edge is shared by at most two cells.
        let mut edge_uses: HashMap<(u64, u64), usize> = HashMap::new();
        for cell in &self.cells {
            for (a, b) in cell.edges() {
                let key = if a <= b { (a.get(), b.get()) } else { (b.get(), a.get()) };
                *edge_uses.entry(key).or_default() += 1;
            }
        }
        if let Some((&(a, b), &uses)) = edge_uses.iter().find(|&(_, &uses)| uses > 2) {
            return Err(violation(format!(
                "edge ({a}, {b}) shared by {uses} cells"
            )));
        }

        // Walls join two distinct cells through two distinct nodes.
        for wall in &self.walls {
            if wall.c1 == wall.c2 {
                return Err(violation(format!(
                    "wall {} joins cell {} to itself",
                    wall.id, wall.c1
                )));
            }
            if wall.c1 > wall.c2 {
                return Err(violation(format!("wall {} has unordered cells", wall.id)));
            }
            if wall.n1 == wall.n2 {
                return Err(violation(format!("wall {} is a loop edge", wall.id)));
            }
        }

        Ok(())
    }
}

fn violation(message: String) -> MeshError {
    MeshError::InvariantViolation(message)
}
