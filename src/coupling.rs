// src/coupling.rs
//
// LS coupling of an orbital angular momentum L with a spin S.
//
// Uncoupled basis |m_L, m_S>  (2L+1)(2S+1) states
// Coupled basis   |J, m_J>    J = |L-S| ..= L+S, m_J = -J ..= J
//
// m_J = m_L + m_S links the two; both bases have the same dimension.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Exact integer or half-integer, stored as twice its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfInt(i32);

impl HalfInt {
    pub const ZERO: HalfInt = HalfInt(0);
    pub const HALF: HalfInt = HalfInt(1);

    pub const fn from_twice(twice: i32) -> Self {
        Self(twice)
    }

    /// Accepts only values that are exact multiples of 1/2.
    pub fn from_f64(v: f64) -> Result<Self> {
        let twice = 2.0 * v;
        if !twice.is_finite() || twice.fract() != 0.0 || twice.abs() > i32::MAX as f64 {
            return Err(PhysicsError::InvalidQuantumNumber { name: "value", value: v });
        }
        Ok(Self(twice as i32))
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }

    pub fn is_integer(&self) -> bool {
        self.0 % 2 == 0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Number of states 2X + 1 for a multiplet of size X.
    pub fn multiplicity(&self) -> usize {
        (self.0 + 1).max(0) as usize
    }

    /// lo, lo+1, ..., up to and including hi (empty if lo > hi).
    pub fn range_inclusive(lo: HalfInt, hi: HalfInt) -> impl Iterator<Item = HalfInt> {
        (lo.0..=hi.0).step_by(2).map(HalfInt)
    }
}

impl Add for HalfInt {
    type Output = HalfInt;
    fn add(self, rhs: HalfInt) -> HalfInt {
        HalfInt(self.0 + rhs.0)
    }
}

impl Sub for HalfInt {
    type Output = HalfInt;
    fn sub(self, rhs: HalfInt) -> HalfInt {
        HalfInt(self.0 - rhs.0)
    }
}

impl Neg for HalfInt {
    type Output = HalfInt;
    fn neg(self) -> HalfInt {
        HalfInt(-self.0)
    }
}

/// `2`, `-1`, `1/2`, `-3/2`
impl fmt::Display for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = if self.is_integer() {
            format!("{}", self.0 / 2)
        } else {
            format!("{}/2", self.0)
        };
        f.pad(&s)
    }
}

/// Parses `3/2`, `1.5`, `2`.
impl FromStr for HalfInt {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || PhysicsError::InvalidQuantumNumber {
            name: "value",
            value: f64::NAN,
        };

        if let Some((num, den)) = s.split_once('/') {
            let num: i32 = num.trim().parse().map_err(|_| bad())?;
            return match den.trim() {
                "1" => num.checked_mul(2).map(HalfInt).ok_or_else(bad),
                "2" => Ok(HalfInt(num)),
                _ => Err(bad()),
            };
        }
        let v: f64 = s.parse().map_err(|_| bad())?;
        HalfInt::from_f64(v)
    }
}

/// Coupling of orbital L (integer) and spin S (integer or half-integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingScheme {
    pub l: HalfInt,
    pub s: HalfInt,
}

impl CouplingScheme {
    pub fn new(l: u32, s: HalfInt) -> Result<Self> {
        if s < HalfInt::ZERO {
            return Err(PhysicsError::InvalidQuantumNumber {
                name: "S",
                value: s.as_f64(),
            });
        }
        // 2(L+S) + 1 must fit, so multiplicities and m_J ranges stay in i32.
        let twice_l = i32::try_from(l)
            .ok()
            .and_then(|l| l.checked_mul(2))
            .filter(|&t| t.checked_add(s.0).and_then(|top| top.checked_add(1)).is_some())
            .ok_or(PhysicsError::InvalidQuantumNumber {
                name: "L",
                value: l as f64,
            })?;
        Ok(Self {
            l: HalfInt(twice_l),
            s,
        })
    }

    /// m_L = -L ..= L
    pub fn m_l_values(&self) -> Vec<HalfInt> {
        HalfInt::range_inclusive(-self.l, self.l).collect()
    }

    /// m_S = -S ..= S
    pub fn m_s_values(&self) -> Vec<HalfInt> {
        HalfInt::range_inclusive(-self.s, self.s).collect()
    }

    /// All (m_L, m_S) pairs, grouped by m_S (outer) then m_L (inner).
    pub fn uncoupled_states(&self) -> Vec<(HalfInt, HalfInt)> {
        let m_l = self.m_l_values();
        self.m_s_values()
            .into_iter()
            .flat_map(|ms| m_l.iter().map(move |&ml| (ml, ms)))
            .collect()
    }

    /// J = |L - S| ..= L + S
    pub fn j_values(&self) -> Vec<HalfInt> {
        HalfInt::range_inclusive((self.l - self.s).abs(), self.l + self.s).collect()
    }

    /// m_J = -J ..= J
    pub fn m_j_values(&self, j: HalfInt) -> Vec<HalfInt> {
        HalfInt::range_inclusive(-j, j).collect()
    }

    /// m_J = -(L+S) ..= L+S
    pub fn all_m_j(&self) -> Vec<HalfInt> {
        let top = self.l + self.s;
        HalfInt::range_inclusive(-top, top).collect()
    }

    /// (2L+1)(2S+1)
    pub fn dimension(&self) -> usize {
        self.l.multiplicity() * self.s.multiplicity()
    }

    /// Sum over J of (2J+1).
    pub fn coupled_dimension(&self) -> usize {
        self.j_values().iter().map(HalfInt::multiplicity).sum()
    }

    /// For each m_J, the number of uncoupled states with m_L + m_S = m_J.
    pub fn projection_counts(&self) -> Vec<(HalfInt, usize)> {
        let states = self.uncoupled_states();
        self.all_m_j()
            .into_iter()
            .map(|mj| {
                let n = states.iter().filter(|(ml, ms)| *ml + *ms == mj).count();
                (mj, n)
            })
            .collect()
    }

    /// Number of J levels that contain `mj`.
    pub fn levels_containing(&self, mj: HalfInt) -> usize {
        self.j_values().iter().filter(|&&j| mj.abs() <= j).count()
    }
}

/// Progressive reveal of the coupling diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CouplingStage {
    /// Title only.
    Blank,
    /// |m_L, m_S> grid.
    UncoupledBasis,
    /// m_J = m_L + m_S projection lines.
    Projections,
    /// |J, m_J> ladder.
    CoupledBasis,
}

impl CouplingStage {
    pub const LAST: CouplingStage = CouplingStage::CoupledBasis;

    pub fn step(&self) -> u8 {
        match self {
            Self::Blank => 0,
            Self::UncoupledBasis => 1,
            Self::Projections => 2,
            Self::CoupledBasis => 3,
        }
    }

    /// Steps past 3 clamp to the last stage.
    pub fn from_step(step: u8) -> Self {
        match step {
            0 => Self::Blank,
            1 => Self::UncoupledBasis,
            2 => Self::Projections,
            _ => Self::CoupledBasis,
        }
    }

    pub fn next(&self) -> Self {
        Self::from_step(self.step().saturating_add(1))
    }

    pub fn previous(&self) -> Self {
        Self::from_step(self.step().saturating_sub(1))
    }

    pub fn can_advance(&self) -> bool {
        *self < Self::LAST
    }

    pub fn can_retreat(&self) -> bool {
        *self > Self::Blank
    }

    /// Whether the layer introduced at `layer` is visible at this stage.
    pub fn shows(&self, layer: CouplingStage) -> bool {
        *self >= layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> HalfInt {
        s.parse().unwrap()
    }

    #[test]
    fn half_int_display_and_parse() {
        assert_eq!(HalfInt::from_twice(1).to_string(), "1/2");
        assert_eq!(HalfInt::from_twice(-3).to_string(), "-3/2");
        assert_eq!(HalfInt::from_twice(4).to_string(), "2");
        assert_eq!(HalfInt::from_twice(-2).to_string(), "-1");
        assert_eq!(h("3/2"), HalfInt::from_twice(3));
        assert_eq!(h("1.5"), HalfInt::from_twice(3));
        assert_eq!(h(" 2 "), HalfInt::from_twice(4));
        assert_eq!(h("4/1"), HalfInt::from_twice(8));
        assert!("1/3".parse::<HalfInt>().is_err());
        assert!("0.3".parse::<HalfInt>().is_err());
        assert!("spin".parse::<HalfInt>().is_err());
    }

    #[test]
    fn negative_spin_is_rejected() {
        assert!(CouplingScheme::new(1, HalfInt::from_twice(-1)).is_err());
    }

    #[test]
    fn oversized_quantum_numbers_are_rejected() {
        assert_eq!(
            CouplingScheme::new(1_500_000_000, HalfInt::HALF),
            Err(PhysicsError::InvalidQuantumNumber {
                name: "L",
                value: 1.5e9
            })
        );
        assert!(CouplingScheme::new(u32::MAX, HalfInt::ZERO).is_err());
        // 2L + 2S + 1 lands exactly on i32::MAX + 1
        assert!(CouplingScheme::new((i32::MAX / 2) as u32, HalfInt::HALF).is_err());
        assert!(CouplingScheme::new((i32::MAX / 2) as u32, HalfInt::ZERO).is_ok());
        assert!("2000000000/1".parse::<HalfInt>().is_err());
    }

    #[test]
    fn p_electron_levels() {
        // L = 1, S = 1/2 -> J = 1/2, 3/2
        let c = CouplingScheme::new(1, HalfInt::HALF).unwrap();
        assert_eq!(c.m_l_values().len(), 3);
        assert_eq!(c.m_s_values(), vec![h("-1/2"), h("1/2")]);
        assert_eq!(c.j_values(), vec![h("1/2"), h("3/2")]);
        assert_eq!(c.all_m_j().len(), 4);
        assert_eq!(c.dimension(), 6);
        assert_eq!(c.coupled_dimension(), 6);
    }

    #[test]
    fn uncoupled_states_are_grouped_by_m_s() {
        let c = CouplingScheme::new(1, HalfInt::HALF).unwrap();
        let st = c.uncoupled_states();
        assert_eq!(st[0], (h("-1"), h("-1/2")));
        assert_eq!(st[2], (h("1"), h("-1/2")));
        assert_eq!(st[3], (h("-1"), h("1/2")));
    }

    #[test]
    fn dimensions_agree_for_many_schemes() {
        for l in 0..5u32 {
            for twice_s in 0..6 {
                let c = CouplingScheme::new(l, HalfInt::from_twice(twice_s)).unwrap();
                assert_eq!(c.dimension(), c.coupled_dimension(), "L={l} 2S={twice_s}");
            }
        }
    }

    #[test]
    fn projection_counts_match_j_ladder() {
        let c = CouplingScheme::new(2, h("1")).unwrap();
        for (mj, n) in c.projection_counts() {
            assert_eq!(n, c.levels_containing(mj), "m_J={mj}");
        }
        // m_J = 0 appears in J = 1, 2, 3
        assert_eq!(c.levels_containing(HalfInt::ZERO), 3);
    }

    #[test]
    fn s_larger_than_l() {
        let c = CouplingScheme::new(0, h("3/2")).unwrap();
        assert_eq!(c.j_values(), vec![h("3/2")]);
        assert_eq!(c.m_j_values(h("3/2")).len(), 4);
    }

    #[test]
    fn stage_steps_clamp() {
        let mut s = CouplingStage::Blank;
        assert!(!s.can_retreat());
        assert_eq!(s.previous(), CouplingStage::Blank);
        for _ in 0..5 {
            s = s.next();
        }
        assert_eq!(s, CouplingStage::CoupledBasis);
        assert!(!s.can_advance());
        assert!(s.can_retreat());
        assert!(s.shows(CouplingStage::Projections));
        assert!(!CouplingStage::UncoupledBasis.shows(CouplingStage::Projections));
        assert_eq!(CouplingStage::from_step(9), CouplingStage::CoupledBasis);
    }
}
