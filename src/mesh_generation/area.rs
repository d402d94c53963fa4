//! Per-cell and tissue polygon areas.

use crate::geometry;
use crate::topology::arena::NodeArena;
use crate::topology::cell::Cell;

/// Computes every cell's polygon area via the shoelace formula and stores
/// it on the cell. Degenerate polygons (fewer than three resolvable
/// vertices) get area 0.
pub fn compute_cell_areas(arena: &NodeArena, cells: &mut [Cell]) {
    for cell in cells.iter_mut() {
        let mut points = Vec::with_capacity(cell.nodes.len());
        let mut complete = true;
        for &id in &cell.nodes {
            match arena.node(id) {
                Some(node) => points.push(node.position()),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        cell.area = if complete {
            geometry::polygon_area(&points, true)
        } else {
            0.0
        };
    }
}

/// Area of the outer tissue hull: the shoelace formula over the
/// boundary-flagged nodes, sorted by polar angle about their centroid.
/// Fewer than three boundary nodes yield 0.
pub fn boundary_hull_area(arena: &NodeArena) -> f64 {
    let boundary: Vec<[f64; 2]> = arena
        .live_nodes()
        .into_iter()
        .filter(|node| node.flags.boundary)
        .map(|node| node.position())
        .collect();
    if boundary.len() < 3 {
        return 0.0;
    }

    let n = boundary.len() as f64;
    let cx = boundary.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = boundary.iter().map(|p| p[1]).sum::<f64>() / n;

    let mut with_angle: Vec<(f64, [f64; 2])> = boundary
        .into_iter()
        .map(|p| {
            let angle = geometry::normalize_angle((p[1] - cy).atan2(p[0] - cx));
            (angle, p)
        })
        .collect();
    with_angle.sort_by(|a, b| a.0.total_cmp(&b.0));

    let hull: Vec<[f64; 2]> = with_angle.into_iter().map(|(_, p)| p).collect();
    geometry::polygon_area(&hull, true)
}
