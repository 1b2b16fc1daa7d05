// src/cooling.rs
//
// Adiabatic demagnetization cycle.
//
//   a: field off, T_i         (random spins, S_i)
//   b: field B_b on, T_i      (isothermal magnetization, S_b < S_i)
//   c: field off again, T_f   (adiabatic demagnetization, S = S_b)
//
// T_f is the temperature at which the zero-field entropy curve equals S_b.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entropy::compute_entropy;
use crate::error::{Result, ensure_non_negative, ensure_positive};
use crate::params::{FIELD_OFF, SpinParams};
use crate::root::{BisectSettings, bisect};
use crate::spins::sample_spins;

/// Temperature at which S(field_at_zero, T) equals `target`, searched on
/// [lower, upper].
///
/// The caller supplies the bracket; `InvalidBracket` is returned if the
/// entropy difference does not change sign over it.
pub fn find_temperature_for_entropy(
    params: &SpinParams,
    target: f64,
    field_at_zero: f64,
    lower: f64,
    upper: f64,
) -> Result<f64> {
    let report = bisect(
        |t| compute_entropy(params, field_at_zero, t) - target,
        lower,
        upper,
        &BisectSettings::default(),
    )?;
    tracing::debug!(
        target_entropy = target,
        field_at_zero,
        t = report.root,
        iters = report.iters,
        residual = report.residual,
        "solved zero-field temperature"
    );
    Ok(report.root)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolingStage {
    /// a: high T, (almost) no field.
    RandomSpins,
    /// b: field switched on at constant T.
    IsothermalMagnetization,
    /// c: field switched off at constant S.
    AdiabaticDemagnetization,
}

impl CoolingStage {
    pub const ALL: [CoolingStage; 3] = [
        Self::RandomSpins,
        Self::IsothermalMagnetization,
        Self::AdiabaticDemagnetization,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::RandomSpins => 0,
            Self::IsothermalMagnetization => 1,
            Self::AdiabaticDemagnetization => 2,
        }
    }

    /// Next stage; c wraps back to a.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous stage; a wraps to c.
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn letter(&self) -> char {
        match self {
            Self::RandomSpins => 'a',
            Self::IsothermalMagnetization => 'b',
            Self::AdiabaticDemagnetization => 'c',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Self::RandomSpins),
            'b' => Some(Self::IsothermalMagnetization),
            'c' => Some(Self::AdiabaticDemagnetization),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::RandomSpins => "Random spins (high T & low field)",
            Self::IsothermalMagnetization => "Isothermal magnetization (field on)",
            Self::AdiabaticDemagnetization => "Adiabatic demagnetization (field off, S constant)",
        }
    }
}

/// Inputs of one demagnetization cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolingCycle {
    /// Starting temperature T_i.
    pub t_initial: f64,
    /// Field applied in stage b.
    pub b_applied: f64,
    /// Small positive field standing in for "off".
    pub field_off: f64,
    /// Lower end of the bracket used to solve for T_f.
    pub t_floor: f64,
}

impl Default for CoolingCycle {
    fn default() -> Self {
        Self {
            t_initial: 2.0,
            b_applied: 3.0,
            field_off: FIELD_OFF,
            t_floor: 0.01,
        }
    }
}

/// Solved states of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoolingPath {
    pub t_initial: f64,
    pub t_final: f64,
    /// S(field_off, T_i), state a.
    pub s_initial: f64,
    /// S(B_b, T_i), shared by states b and c.
    pub s_magnetized: f64,
}

impl CoolingCycle {
    /// Temperatures and the "off" field must be positive; the applied field
    /// may be zero.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("t_initial", self.t_initial)?;
        ensure_non_negative("b_applied", self.b_applied)?;
        ensure_positive("field_off", self.field_off)?;
        ensure_positive("t_floor", self.t_floor)?;
        Ok(())
    }

    /// Evaluate states a and b, then solve for T_f on [t_floor, t_initial].
    pub fn solve(&self, params: &SpinParams) -> Result<CoolingPath> {
        let s_initial = compute_entropy(params, self.field_off, self.t_initial);
        let s_magnetized = compute_entropy(params, self.b_applied, self.t_initial);
        let t_final = find_temperature_for_entropy(
            params,
            s_magnetized,
            self.field_off,
            self.t_floor,
            self.t_initial,
        )?;

        Ok(CoolingPath {
            t_initial: self.t_initial,
            t_final,
            s_initial,
            s_magnetized,
        })
    }

    /// (B, T) the spins sit at during `stage`.
    pub fn field_and_temperature(&self, path: &CoolingPath, stage: CoolingStage) -> (f64, f64) {
        match stage {
            CoolingStage::RandomSpins => (self.field_off, path.t_initial),
            CoolingStage::IsothermalMagnetization => (self.b_applied, path.t_initial),
            CoolingStage::AdiabaticDemagnetization => (self.field_off, path.t_final),
        }
    }
}

impl CoolingPath {
    /// (T, S) marker on the entropy diagram for `stage`.
    pub fn point(&self, stage: CoolingStage) -> (f64, f64) {
        match stage {
            CoolingStage::RandomSpins => (self.t_initial, self.s_initial),
            CoolingStage::IsothermalMagnetization => (self.t_initial, self.s_magnetized),
            CoolingStage::AdiabaticDemagnetization => (self.t_final, self.s_magnetized),
        }
    }

    /// Isothermal leg a -> b as ((T_i, S_i), (T_i, S_b)).
    pub fn isothermal_leg(&self) -> ((f64, f64), (f64, f64)) {
        (
            (self.t_initial, self.s_initial),
            (self.t_initial, self.s_magnetized),
        )
    }

    /// Adiabatic leg b -> c as ((T_i, S_b), (T_f, S_b)).
    pub fn adiabatic_leg(&self) -> ((f64, f64), (f64, f64)) {
        (
            (self.t_initial, self.s_magnetized),
            (self.t_final, self.s_magnetized),
        )
    }
}

/// Everything needed to draw one stage of the cycle.
#[derive(Debug, Clone)]
pub struct CoolingSnapshot {
    pub stage: CoolingStage,
    pub path: CoolingPath,
    /// (T, S) marker for the current stage.
    pub marker: (f64, f64),
    pub field: f64,
    pub temperature: f64,
    /// Sampled moment of each spin (+/- 1/2).
    pub moments: Vec<f64>,
}

/// Interactive state of the demo: current stage and cycle inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSession {
    pub stage: CoolingStage,
    pub cycle: CoolingCycle,
}

impl Default for CoolingSession {
    fn default() -> Self {
        Self::new(CoolingCycle::default())
    }
}

impl CoolingSession {
    pub fn new(cycle: CoolingCycle) -> Self {
        Self {
            stage: CoolingStage::RandomSpins,
            cycle,
        }
    }

    pub fn next(&mut self) -> CoolingStage {
        self.stage = self.stage.next();
        self.stage
    }

    pub fn previous(&mut self) -> CoolingStage {
        self.stage = self.stage.previous();
        self.stage
    }

    pub fn set_initial_temperature(&mut self, t: f64) {
        self.cycle.t_initial = t;
    }

    pub fn set_applied_field(&mut self, b: f64) {
        self.cycle.b_applied = b;
    }

    /// Solve the cycle and sample the spin lattice for the current stage.
    pub fn snapshot<R: Rng + ?Sized>(&self, params: &SpinParams, rng: &mut R) -> Result<CoolingSnapshot> {
        let path = self.cycle.solve(params)?;
        let (field, temperature) = self.cycle.field_and_temperature(&path, self.stage);
        let moments = sample_spins(params, field, temperature, rng);

        Ok(CoolingSnapshot {
            stage: self.stage,
            path,
            marker: path.point(self.stage),
            field,
            temperature,
            moments,
        })
    }
}
