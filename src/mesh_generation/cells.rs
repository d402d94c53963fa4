//! Cell assembly from consecutive ring pairs.
//!
//! Each angular sector between rings `i` and `i + 1` becomes one polygon,
//! anchored at four nodes matched by angle equivalence: two on the inner
//! ring at the sector boundary angles, two on the outer ring at the same
//! angles. Nodes lying strictly between the anchors (fusion leftovers at
//! foreign resolutions) are threaded into the polygon along their arcs so
//! every cell stays a simple closed loop.

use crate::geometry;
use crate::topology::arena::NodeArena;
use crate::topology::cell::{Cell, CellId, CellType};
use crate::topology::node::NodeId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A sector whose cell could not be built because an anchor was missing.
/// Non-fatal: generation continues with a partial mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSector {
    /// Inner ring index of the ring pair.
    pub ring_pair: usize,
    /// Sector index within the pair.
    pub sector: usize,
}

/// Builds the central cell plus one cell per ring-pair sector, then sorts
/// all cells by (origin ring, angular centroid) and reassigns sequential
/// ids.
pub fn build_cells(
    arena: &NodeArena,
    division_counts: &[usize],
    angle_tolerance: f64,
) -> (Vec<Cell>, Vec<SkippedSector>) {
    let ring_count = arena.ring_count();
    let mut cells = Vec::new();
    let mut skipped = Vec::new();

    if ring_count > 0 && !arena.ring(0).is_empty() {
        cells.push(Cell::new(
            CellId::new(0),
            arena.ring(0).to_vec(),
            0,
            0.0,
            CellType::Central,
            // The reference geometry marks the central cell at_boundary.
            true,
        ));
    }

    for pair in 0..ring_count.saturating_sub(1) {
        let sectors = division_counts[pair];
        for sector in 0..sectors {
            match build_sector_cell(arena, pair, sector, sectors, ring_count, angle_tolerance) {
                Some(cell) => cells.push(cell),
                None => {
                    log::warn!("skipping sector {sector} of ring pair {pair}: anchor not found");
                    skipped.push(SkippedSector {
                        ring_pair: pair,
                        sector,
                    });
                }
            }
        }
    }

    cells.sort_by(|a, b| a.ring.cmp(&b.ring).then(a.angle.total_cmp(&b.angle)));
    for (index, cell) in cells.iter_mut().enumerate() {
        cell.id = CellId::new(index as u64);
    }
    (cells, skipped)
}

/// One anchor node resolved by angle equivalence.
#[derive(Clone, Copy)]
struct Anchor {
    id: NodeId,
    theta: f64,
    r: f64,
}

fn build_sector_cell(
    arena: &NodeArena,
    pair: usize,
    sector: usize,
    sectors: usize,
    ring_count: usize,
    tol: f64,
) -> Option<Cell> {
    let angle_j = TAU * sector as f64 / sectors as f64;
    let angle_jm1 = geometry::normalize_angle(TAU * (sector as f64 - 1.0) / sectors as f64);

    let (a1, a2) = find_anchor_pair(arena, pair, angle_j, angle_jm1, tol)?;
    let (a3, a4) = find_anchor_pair(arena, pair + 1, angle_jm1, angle_j, tol)?;

    // Angular centroid from the four anchor positions.
    let corners = [a1, a2, a3, a4].map(|a| geometry::polar_to_cartesian(a.r, a.theta));
    let cx = corners.iter().map(|p| p[0]).sum::<f64>() / 4.0;
    let cy = corners.iter().map(|p| p[1]).sum::<f64>() / 4.0;
    let centroid_angle = geometry::normalize_angle(cy.atan2(cx));

    // Superior arc: inner-ring nodes between the anchors, descending angle.
    let superior = arc_nodes(arena, pair, &[a1, a2], a2.theta, a1.theta, tol)
        .into_iter()
        .sorted_by(|x, y| y.0.total_cmp(&x.0))
        .map(|(_, id)| id)
        .collect::<Vec<_>>();
    // Inferior arc: outer-ring nodes between the anchors, ascending angle.
    let inferior = arc_nodes(arena, pair + 1, &[a3, a4], a3.theta, a4.theta, tol)
        .into_iter()
        .sorted_by(|x, y| x.0.total_cmp(&y.0))
        .map(|(_, id)| id)
        .collect::<Vec<_>>();

    let mut nodes = Vec::with_capacity(4 + superior.len() + inferior.len());
    nodes.push(a1.id);
    nodes.extend(superior);
    nodes.push(a2.id);
    nodes.push(a3.id);
    nodes.extend(inferior);
    nodes.push(a4.id);

    let cell_type = if pair + 2 == ring_count {
        CellType::Default
    } else if pair == 0 {
        CellType::Innermost
    } else {
        CellType::Default
    };

    Some(Cell::new(
        // Reassigned after the final sort.
        CellId::new(0),
        nodes,
        pair + 1,
        centroid_angle,
        cell_type,
        pair + 2 == ring_count,
    ))
}

/// Finds the first ring member equivalent to `first` and the first
/// equivalent to `second`, scanning in angle order. A node can satisfy only
/// one of the two slots.
fn find_anchor_pair(
    arena: &NodeArena,
    ring: usize,
    first: f64,
    second: f64,
    tol: f64,
) -> Option<(Anchor, Anchor)> {
    let mut found_first = None;
    let mut found_second = None;
    for &id in arena.ring(ring) {
        let node = arena.node(id)?;
        if found_first.is_none() && geometry::angles_equivalent(node.theta, first, tol) {
            found_first = Some(Anchor {
                id,
                theta: node.theta,
                r: node.r,
            });
        } else if found_second.is_none() && geometry::angles_equivalent(node.theta, second, tol) {
            found_second = Some(Anchor {
                id,
                theta: node.theta,
                r: node.r,
            });
        }
        if let (Some(a), Some(b)) = (found_first, found_second) {
            return Some((a, b));
        }
    }
    None
}

/// Ring members on the arc from `start` to `end` (inclusive within
/// tolerance), excluding the anchors themselves.
fn arc_nodes(
    arena: &NodeArena,
    ring: usize,
    anchors: &[Anchor],
    start: f64,
    end: f64,
    tol: f64,
) -> Vec<(f64, NodeId)> {
    let mut out = Vec::new();
    for &id in arena.ring(ring) {
        if anchors.iter().any(|a| a.id == id) {
            continue;
        }
        let Some(node) = arena.node(id) else { continue };
        if geometry::angle_in_arc(node.theta, start, end, tol)
            || geometry::angles_equivalent(node.theta, start, tol)
            || geometry::angles_equivalent(node.theta, end, tol)
        {
            out.push((node.theta, id));
        }
    }
    out
}
