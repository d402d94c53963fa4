//! Planar geometry helpers for ring meshes.
//!
//! Angles are measured counter-clockwise from the positive x axis and
//! normalized to `[0, 2*pi)`. Arc-membership and equivalence tests take an
//! explicit tolerance because node angles accumulate floating-point noise
//! through fusion and refinement.

use std::f64::consts::TAU;

/// Normalizes an angle into `[0, 2*pi)`.
#[inline]
pub fn normalize_angle(theta: f64) -> f64 {
    let t = theta % TAU;
    if t < 0.0 { t + TAU } else { t }
}

/// Whether two angles coincide within `tolerance`, accounting for wraparound.
pub fn angles_equivalent(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    diff.min(TAU - diff) < tolerance
}

/// Whether `theta` lies on the counter-clockwise arc from `start` to `end`.
///
/// The arc is inclusive at both endpoints within `tolerance` and may wrap
/// through zero.
pub fn angle_in_arc(theta: f64, start: f64, end: f64, tolerance: f64) -> bool {
    let t = normalize_angle(theta);
    let s = normalize_angle(start);
    let e = normalize_angle(end);
    if s <= e {
        s - tolerance <= t && t <= e + tolerance
    } else {
        t >= s - tolerance || t <= e + tolerance
    }
}

/// Converts polar coordinates to a cartesian point.
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> [f64; 2] {
    [r * theta.cos(), r * theta.sin()]
}

/// Converts a cartesian point to `(r, theta)` with `theta` in `[0, 2*pi)`.
#[inline]
pub fn cartesian_to_polar(p: [f64; 2]) -> (f64, f64) {
    let r = p[0].hypot(p[1]);
    (r, normalize_angle(p[1].atan2(p[0])))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: [f64; 2], q: [f64; 2]) -> f64 {
    (q[0] - p[0]).hypot(q[1] - p[1])
}

/// Polygon area via the shoelace formula.
///
/// Returns the unsigned area when `absolute` is set, otherwise the signed
/// area (positive for counter-clockwise winding). Polygons with fewer than
/// three vertices are degenerate and yield `0.0`.
pub fn polygon_area(points: &[[f64; 2]], absolute: bool) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sum += points[i][0] * points[j][1] - points[j][0] * points[i][1];
    }
    let area = sum * 0.5;
    if absolute { area.abs() } else { area }
}
