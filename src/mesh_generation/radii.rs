//! Concentric ring radius sequence.

/// Computes the radii of `ring_count` concentric rings.
///
/// `radius[0]` is `base_radius`; each following ring grows by
/// `ratio * 2 * sin(pi / a) * radius[prev]`, where `a` is the division
/// count of the ring segment being traversed. The outermost traversal
/// reuses the division count one slot back (wrapping to the final entry
/// for a two-ring mesh), matching the reference geometry.
///
/// Inputs are assumed validated (`division_counts` and `ratios` hold
/// `ring_count - 1` positive entries).
pub fn ring_radii(
    ring_count: usize,
    base_radius: f64,
    division_counts: &[usize],
    ratios: &[f64],
) -> Vec<f64> {
    let mut radii = Vec::with_capacity(ring_count);
    if ring_count == 0 {
        return radii;
    }
    radii.push(base_radius);
    for i in 1..ring_count {
        let previous = radii[i - 1];
        let idx = if i + 1 < ring_count {
            i - 1
        } else if i >= 2 {
            i - 2
        } else {
            division_counts.len() - 1
        };
        let sin_term = (std::f64::consts::PI / division_counts[idx] as f64).sin();
        radii.push(previous + ratios[i - 1] * 2.0 * sin_term * previous);
    }
    radii
}
