// src/error.rs

use thiserror::Error;

/// Failures surfaced by the solvers and model constructors.
///
/// Numerical degeneracies (huge exponents, vanishing probabilities) are
/// clamped locally and never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// g(lower) and g(upper) do not have opposite signs, or the interval is empty.
    #[error(
        "interval [{lower}, {upper}] does not bracket a root (g(lower)={g_lower:.6e}, g(upper)={g_upper:.6e})"
    )]
    InvalidBracket {
        lower: f64,
        upper: f64,
        g_lower: f64,
        g_upper: f64,
    },

    /// Angular-momentum quantum number that is negative or not a multiple of 1/2.
    #[error("invalid quantum number {name}={value}: expected a non-negative integer or half-integer")]
    InvalidQuantumNumber { name: &'static str, value: f64 },

    /// Masses, spring constants and spacings must be strictly positive.
    #[error("{name} must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Reject values that are not finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::NonPositiveParameter { name, value })
    }
}

/// Reject values that are not finite or are negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::NonPositiveParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bracket_message_names_interval() {
        let err = PhysicsError::InvalidBracket {
            lower: 1.0,
            upper: 2.0,
            g_lower: 0.5,
            g_upper: 0.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("[1, 2]"), "unexpected message: {msg}");
        assert!(msg.contains("does not bracket"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_nan() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert_eq!(
            ensure_positive("mass", 0.0),
            Err(PhysicsError::NonPositiveParameter {
                name: "mass",
                value: 0.0
            })
        );
        assert!(ensure_positive("mass", f64::NAN).is_err());
        assert!(ensure_positive("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn ensure_non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative("alpha", 0.0), Ok(0.0));
        assert!(ensure_non_negative("alpha", -1e-9).is_err());
        assert!(ensure_non_negative("alpha", f64::NAN).is_err());
    }
}
