// src/entropy.rs
//
// Total entropy of the paramagnetic salt: two-level spin (Gibbs) entropy
// plus a Debye-like T^3 lattice term.
//
// Convention: S(B, T) = 0 for T <= 0.

use crate::boltzmann::{Occupation, occupation};
use crate::params::{PROB_FLOOR, SpinParams};

use rayon::prelude::*;

/// Spin and lattice contributions at one (B, T) point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntropyBreakdown {
    pub spin: f64,
    pub lattice: f64,
}

impl EntropyBreakdown {
    pub fn total(&self) -> f64 {
        self.spin + self.lattice
    }
}

/// Gibbs entropy -k_B sum p ln p of an occupation.
///
/// Each probability is floored at PROB_FLOOR before the logarithm; without it a
/// fully polarised state would evaluate 0 * ln 0 = NaN.
pub fn spin_entropy(params: &SpinParams, occ: &Occupation) -> f64 {
    let s: f64 = occ
        .p
        .iter()
        .map(|&p| {
            let p = p.clamp(PROB_FLOOR, 1.0);
            p * p.ln()
        })
        .sum();
    // -0.0 for a perfectly polarised state; normalise the sign.
    (-params.k_b * s).max(0.0)
}

/// Lattice (phonon) entropy alpha * T^3.
#[inline]
pub fn lattice_entropy(params: &SpinParams, t: f64) -> f64 {
    params.lattice_coeff * t * t * t
}

pub fn entropy_breakdown(params: &SpinParams, b: f64, t: f64) -> EntropyBreakdown {
    if t <= 0.0 {
        return EntropyBreakdown::default();
    }
    let occ = occupation(params, b, t);
    EntropyBreakdown {
        spin: spin_entropy(params, &occ),
        lattice: lattice_entropy(params, t),
    }
}

/// Total entropy S(B, T). Returns exactly 0.0 for `t <= 0`.
pub fn compute_entropy(params: &SpinParams, b: f64, t: f64) -> f64 {
    entropy_breakdown(params, b, t).total()
}

/// Entropy curve S(b, T) evaluated at every temperature in `temps`.
pub fn entropy_curve(params: &SpinParams, b: f64, temps: &[f64]) -> Vec<f64> {
    temps.iter().map(|&t| compute_entropy(params, b, t)).collect()
}

/// Family of entropy curves, one row per field value.
#[derive(Debug, Clone)]
pub struct EntropyTable {
    pub fields: Vec<f64>,
    pub temps: Vec<f64>,
    /// rows[i][j] = S(fields[i], temps[j])
    pub rows: Vec<Vec<f64>>,
}

impl EntropyTable {
    /// Fields plotted in the cooling-path diagram.
    pub const DEFAULT_FIELDS: [f64; 7] = [0.01, 0.1, 0.5, 1.0, 2.0, 3.0, 4.0];

    /// Tabulate S over `fields` x `temps`.
    ///
    /// With `parallel`, rows are evaluated with Rayon (one task per field);
    /// every entry is an independent pure evaluation, so results are identical
    /// to the serial path.
    pub fn sample(params: &SpinParams, fields: &[f64], temps: &[f64], parallel: bool) -> Self {
        let rows = if parallel {
            fields
                .par_iter()
                .map(|&b| entropy_curve(params, b, temps))
                .collect()
        } else {
            fields
                .iter()
                .map(|&b| entropy_curve(params, b, temps))
                .collect()
        };

        Self {
            fields: fields.to_vec(),
            temps: temps.to_vec(),
            rows,
        }
    }

    pub fn row(&self, field_idx: usize) -> &[f64] {
        &self.rows[field_idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::linspace;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::LN_2;

    #[test]
    fn zero_and_negative_temperature_give_exact_zero() {
        let p = SpinParams::default();
        for &b in &[0.0, 0.01, 3.0, 1e6] {
            assert_eq!(compute_entropy(&p, b, 0.0), 0.0);
            assert_eq!(compute_entropy(&p, b, -1.0), 0.0);
        }
    }

    #[test]
    fn near_zero_field_matches_ln2_plus_lattice() {
        let p = SpinParams::default();
        let s = compute_entropy(&p, 0.01, 2.0);
        assert_abs_diff_eq!(s, LN_2 + 0.05 * 8.0, epsilon = 1e-4);
        assert_abs_diff_eq!(s, 1.0931, epsilon = 1e-4);
    }

    #[test]
    fn breakdown_splits_spin_and_lattice() {
        let p = SpinParams::default();
        let e = entropy_breakdown(&p, 3.0, 2.0);
        assert_relative_eq!(e.lattice, 0.4, epsilon = 1e-15);
        let q = 1.0 / (1.0 + 3.0f64.exp());
        let expected = -(q * q.ln() + (1.0 - q) * (1.0 - q).ln());
        assert_relative_eq!(e.spin, expected, epsilon = 1e-12);
        assert_relative_eq!(e.total(), compute_entropy(&p, 3.0, 2.0));
    }

    #[test]
    fn polarised_spin_entropy_is_tiny_but_finite() {
        let p = SpinParams::default();
        let e = entropy_breakdown(&p, 1e4, 1.0);
        assert!(e.spin.is_finite());
        assert!(e.spin >= 0.0);
        // floor contribution is at most -1e-12 * ln(1e-12)
        assert!(e.spin < 3e-11, "spin entropy {}", e.spin);
    }

    #[test]
    fn parallel_table_matches_serial() {
        let p = SpinParams::default();
        let temps = linspace(0.0, 3.0, 257);
        let serial = EntropyTable::sample(&p, &EntropyTable::DEFAULT_FIELDS, &temps, false);
        let par = EntropyTable::sample(&p, &EntropyTable::DEFAULT_FIELDS, &temps, true);
        assert_eq!(serial.rows, par.rows);
        assert_eq!(serial.row(3).len(), temps.len());
    }

    #[test]
    fn stronger_field_lowers_entropy_at_fixed_temperature() {
        let p = SpinParams::default();
        let temps = [0.5, 1.0, 2.0];
        let table = EntropyTable::sample(&p, &EntropyTable::DEFAULT_FIELDS, &temps, false);
        for j in 0..temps.len() {
            for i in 1..table.fields.len() {
                assert!(
                    table.rows[i][j] < table.rows[i - 1][j],
                    "S not decreasing in B at T={}",
                    temps[j]
                );
            }
        }
    }
}
