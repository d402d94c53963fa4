//! Wall derivation from shared cell edges.
//!
//! A wall is emitted for every edge shared by exactly two distinct cells
//! whose endpoints are both initial nodes and not both on the outer
//! boundary. Boundary-only edges belong to the outer hull representation,
//! which is an external concern.

use crate::topology::arena::NodeArena;
use crate::topology::cell::{Cell, CellId};
use crate::topology::node::NodeId;
use crate::topology::wall::{Wall, WallId, WallType};
use hashbrown::HashMap;

/// Derives the wall list from the final mesh state.
pub fn build_walls(arena: &NodeArena, cells: &[Cell]) -> Vec<Wall> {
    // Group edges by the cells referencing them, keeping first-appearance
    // order so wall ids are deterministic.
    let mut edge_cells: HashMap<(NodeId, NodeId), Vec<CellId>> = HashMap::new();
    let mut edge_order: Vec<(NodeId, NodeId)> = Vec::new();
    for cell in cells {
        for (a, b) in cell.edges() {
            let key = if a <= b { (a, b) } else { (b, a) };
            let entry = edge_cells.entry(key).or_insert_with(|| {
                edge_order.push(key);
                Vec::new()
            });
            entry.push(cell.id);
        }
    }

    let mut walls = Vec::new();
    for key in edge_order {
        let sharers = &edge_cells[&key];
        if sharers.len() != 2 || sharers[0] == sharers[1] {
            continue;
        }
        let (n1, n2) = key;
        let (Some(node1), Some(node2)) = (arena.node(n1), arena.node(n2)) else {
            continue;
        };
        if !(node1.flags.initial && node2.flags.initial) {
            continue;
        }
        if node1.flags.boundary && node2.flags.boundary {
            continue;
        }
        let (c1, c2) = if sharers[0] < sharers[1] {
            (sharers[0], sharers[1])
        } else {
            (sharers[1], sharers[0])
        };
        walls.push(Wall {
            id: WallId::new(walls.len() as u64),
            n1,
            n2,
            c1,
            c2,
            length: node1.distance_to(node2),
            wall_type: WallType::Normal,
            viz_flux: 0.0,
        });
    }
    walls
}
