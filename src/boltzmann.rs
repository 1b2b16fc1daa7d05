// src/boltzmann.rs
//
// Two-level Boltzmann occupation of the moment levels.
//
// This is the only piece shared between entropy evaluation (entropy.rs) and
// random orientation sampling (spins.rs).

use crate::params::{EXP_CLAMP, SpinParams};

/// Normalised occupation probabilities `[p(m_0), p(m_1)]`, ordered like
/// `SpinParams::moments`. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupation {
    pub p: [f64; 2],
}

impl Occupation {
    /// Probability of the upper (+1/2) level, i.e. the level whose moment is larger.
    pub fn p_up(&self, params: &SpinParams) -> f64 {
        if params.moments[1] >= params.moments[0] {
            self.p[1]
        } else {
            self.p[0]
        }
    }

    /// Fully polarised along the larger moment.
    fn polarised(params: &SpinParams) -> Self {
        if params.moments[1] >= params.moments[0] {
            Self { p: [0.0, 1.0] }
        } else {
            Self { p: [1.0, 0.0] }
        }
    }
}

/// Boltzmann exponents x_i = m_i g_J mu_B B / (k_B T), clamped to +/- EXP_CLAMP.
///
/// Caller guarantees T > 0.
#[inline]
fn exponents(params: &SpinParams, b: f64, t: f64) -> [f64; 2] {
    let scale = params.coupling() * b / (params.k_b * t);
    params
        .moments
        .map(|m| (m * scale).clamp(-EXP_CLAMP, EXP_CLAMP))
}

/// Occupation of the two moment levels at field `b` and temperature `t`.
///
/// For `t <= 0` the distribution is taken as fully polarised along +1/2.
pub fn occupation(params: &SpinParams, b: f64, t: f64) -> Occupation {
    if t <= 0.0 {
        return Occupation::polarised(params);
    }

    let w = exponents(params, b, t).map(f64::exp);
    let z = w[0] + w[1];
    Occupation {
        p: [w[0] / z, w[1] / z],
    }
}
