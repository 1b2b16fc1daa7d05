// src/spins.rs
//
// Random orientations of the moment lattice, drawn from the Boltzmann
// occupation. Independent of the entropy calculation: both consume only
// `boltzmann::Occupation`.

use rand::Rng;

use crate::boltzmann::{Occupation, occupation};
use crate::params::SpinParams;

/// Draw `n` independent moments from `occ`.
pub fn sample_moments<R: Rng + ?Sized>(
    params: &SpinParams,
    occ: &Occupation,
    n: usize,
    rng: &mut R,
) -> Vec<f64> {
    let p1 = occ.p[1].clamp(0.0, 1.0);
    let [m0, m1] = params.moments;
    (0..n)
        .map(|_| if rng.random_bool(p1) { m1 } else { m0 })
        .collect()
}

/// Sample `params.n_spins` moments at field `b`, temperature `t`.
/// For `t <= 0` every moment is +1/2.
pub fn sample_spins<R: Rng + ?Sized>(params: &SpinParams, b: f64, t: f64, rng: &mut R) -> Vec<f64> {
    let occ = occupation(params, b, t);
    sample_moments(params, &occ, params.n_spins, rng)
}

/// Arrow direction per moment: +1 up, -1 down.
pub fn arrow_directions(moments: &[f64]) -> Vec<i8> {
    moments.iter().map(|&m| if m > 0.0 { 1 } else { -1 }).collect()
}

/// Sum of sampled moments.
pub fn net_moment(moments: &[f64]) -> f64 {
    moments.iter().sum()
}

/// Expected moment per spin, sum_i m_i p_i.
pub fn mean_moment(params: &SpinParams, occ: &Occupation) -> f64 {
    params.moments[0] * occ.p[0] + params.moments[1] * occ.p[1]
}

/// Render moments as rows of arrows (row-major, `cols` per row).
pub fn arrow_grid(moments: &[f64], cols: usize) -> String {
    let cols = cols.max(1);
    moments
        .chunks(cols)
        .map(|row| {
            row.iter()
                .map(|&m| if m > 0.0 { '↑' } else { '↓' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
