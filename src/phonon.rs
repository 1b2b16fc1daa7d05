// src/phonon.rs
//
// Harmonic chain phonons.
//
// Monatomic chain (mass M, spring K, spacing a):
//   w(k) = 2 sqrt(K/M) |sin(k a / 2)|
//
// Diatomic chain (masses M1, M2 alternating, spring K, spacing a):
//   w^2 = K (M1+M2)/(M1 M2) -/+ sqrt( [K (M1+M2)/(M1 M2)]^2 - 4 K^2/(M1 M2) sin^2(k a / 2) )
//   lower root = acoustic, upper root = optical.
//
// Atom n sits at x_n = n a.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive};
use crate::grid::linspace;

/// Range of the light-mass slider in the diatomic demo.
pub const LIGHT_MASS_RANGE: (f64, f64) = (0.5, 5.0);

/// Equilibrium positions x_n = n a.
fn positions(n_atoms: usize, spacing: f64) -> impl Iterator<Item = f64> {
    (0..n_atoms).map(move |n| n as f64 * spacing)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonatomicChain {
    pub n_atoms: usize,
    pub spacing: f64,
    pub spring: f64,
    pub mass: f64,
}

impl Default for MonatomicChain {
    fn default() -> Self {
        Self {
            n_atoms: 30,
            spacing: 1.0,
            spring: 1.0,
            mass: 1.0,
        }
    }
}

impl MonatomicChain {
    pub fn new(n_atoms: usize, spacing: f64, spring: f64, mass: f64) -> Result<Self> {
        let chain = Self {
            n_atoms,
            spacing,
            spring,
            mass,
        };
        chain.validate()?;
        Ok(chain)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("spacing", self.spacing)?;
        ensure_positive("spring constant", self.spring)?;
        ensure_positive("mass", self.mass)?;
        Ok(())
    }

    pub fn omega(&self, k: f64) -> f64 {
        2.0 * (self.spring / self.mass).sqrt() * (k * self.spacing / 2.0).sin().abs()
    }

    /// Zone-boundary frequency 2 sqrt(K/M).
    pub fn omega_max(&self) -> f64 {
        2.0 * (self.spring / self.mass).sqrt()
    }

    /// |k| <= zones * pi / a
    pub fn in_zone(&self, k: f64, zones: f64) -> bool {
        k.abs() <= zones * PI / self.spacing
    }

    /// u_n = A sin(k x_n - w t)
    pub fn displacements(&self, k: f64, t: f64, amplitude: f64) -> Vec<f64> {
        let w = self.omega(k);
        positions(self.n_atoms, self.spacing)
            .map(|x| amplitude * (k * x - w * t).sin())
            .collect()
    }

    /// (k, w) over `n` evenly spaced wavevectors.
    pub fn dispersion_table(&self, k_min: f64, k_max: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(k_min, k_max, n)
            .into_iter()
            .map(|k| (k, self.omega(k)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    Acoustic,
    Optical,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acoustic => "acoustic",
            Self::Optical => "optical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiatomicChain {
    pub n_atoms: usize,
    pub spacing: f64,
    pub spring: f64,
    /// Mass on even sites.
    pub m1: f64,
    /// Mass on odd sites.
    pub m2: f64,
}

impl Default for DiatomicChain {
    fn default() -> Self {
        Self {
            n_atoms: 20,
            spacing: 1.0,
            spring: 1.0,
            m1: 1.0,
            m2: 1e-3,
        }
    }
}

impl DiatomicChain {
    pub fn new(n_atoms: usize, spacing: f64, spring: f64, m1: f64, m2: f64) -> Result<Self> {
        let chain = Self {
            n_atoms,
            spacing,
            spring,
            m1,
            m2,
        };
        chain.validate()?;
        Ok(chain)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("spacing", self.spacing)?;
        ensure_positive("spring constant", self.spring)?;
        ensure_positive("m1", self.m1)?;
        ensure_positive("m2", self.m2)?;
        Ok(())
    }

    pub fn set_light_mass(&mut self, m2: f64) -> Result<()> {
        self.m2 = ensure_positive("m2", m2)?;
        Ok(())
    }

    /// (acoustic, optical) frequencies at `k`.
    ///
    /// The discriminant and both w^2 are clamped at zero so rounding never
    /// yields NaN.
    pub fn branches(&self, k: f64) -> (f64, f64) {
        let k_s = self.spring;
        let mu_inv = (self.m1 + self.m2) / (self.m1 * self.m2);
        let term = k_s * mu_inv;
        let s = (k * self.spacing / 2.0).sin();
        let disc = term * term - 4.0 * k_s * k_s / (self.m1 * self.m2) * s * s;
        let root = disc.max(0.0).sqrt();

        let w2_minus = term - root;
        let w2_plus = term + root;
        (w2_minus.max(0.0).sqrt(), w2_plus.max(0.0).sqrt())
    }

    pub fn omega(&self, k: f64, branch: Branch) -> f64 {
        let (ac, op) = self.branches(k);
        match branch {
            Branch::Acoustic => ac,
            Branch::Optical => op,
        }
    }

    /// Branch whose frequency at `k` lies closest to `omega`. Ties go to optical.
    pub fn select_branch(&self, k: f64, omega: f64) -> Branch {
        let (ac, op) = self.branches(k);
        if (omega - ac).abs() < (omega - op).abs() {
            Branch::Acoustic
        } else {
            Branch::Optical
        }
    }

    /// |k| <= pi / a
    pub fn in_zone(&self, k: f64) -> bool {
        k.abs() <= PI / self.spacing
    }

    /// Acoustic: every atom u_n = A sin(k x_n - w t).
    /// Optical: odd sites carry the opposite sign.
    pub fn displacements(&self, k: f64, t: f64, branch: Branch, amplitude: f64) -> Vec<f64> {
        let w = self.omega(k, branch);
        positions(self.n_atoms, self.spacing)
            .enumerate()
            .map(|(n, x)| {
                let u = amplitude * (k * x - w * t).sin();
                if branch == Branch::Optical && n % 2 == 1 { -u } else { u }
            })
            .collect()
    }

    /// Mass at site `n`.
    pub fn mass_at(&self, n: usize) -> f64 {
        if n % 2 == 0 { self.m1 } else { self.m2 }
    }

    /// (k, acoustic, optical) over `n` evenly spaced wavevectors.
    pub fn dispersion_table(&self, k_min: f64, k_max: f64, n: usize) -> Vec<(f64, f64, f64)> {
        linspace(k_min, k_max, n)
            .into_iter()
            .map(|k| {
                let (ac, op) = self.branches(k);
                (k, ac, op)
            })
            .collect()
    }
}
