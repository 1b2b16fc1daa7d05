// src/params.rs

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_non_negative, ensure_positive};

/// Upper bound on |exponent| fed to `exp` when building Boltzmann weights.
pub const EXP_CLAMP: f64 = 700.0;

/// Smallest probability allowed into `p ln p` (0 * ln 0 would be NaN).
pub const PROB_FLOOR: f64 = 1e-12;

/// "Field off" in the cooling cycle: a small positive B instead of a degenerate 0.
pub const FIELD_OFF: f64 = 0.01;

/// Constants of the paramagnetic salt model (reduced units: k_B = mu_B = 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinParams {
    pub k_b: f64,           // Boltzmann constant
    pub mu_b: f64,          // Bohr magneton
    pub g_j: f64,           // Lande g-factor
    pub lattice_coeff: f64, // Debye-like prefactor of the T^3 lattice entropy
    pub moments: [f64; 2],  // m_J levels of the two-level moment
    pub n_spins: usize,     // size of the sampled spin lattice
}

impl Default for SpinParams {
    fn default() -> Self {
        Self {
            k_b: 1.0,
            mu_b: 1.0,
            g_j: 2.0,
            lattice_coeff: 0.05,
            moments: [-0.5, 0.5],
            n_spins: 64,
        }
    }
}

impl SpinParams {
    /// Zeeman coupling g_J * mu_B (energy per unit moment per unit field).
    #[inline]
    pub fn coupling(&self) -> f64 {
        self.g_j * self.mu_b
    }

    /// k_B, mu_B and g_J must be positive; the lattice prefactor may be zero.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("k_b", self.k_b)?;
        ensure_positive("mu_b", self.mu_b)?;
        ensure_positive("g_j", self.g_j)?;
        ensure_non_negative("lattice_coeff", self.lattice_coeff)?;
        Ok(())
    }
}
