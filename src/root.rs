// src/root.rs
//
// Bracketed bisection for scalar functions.
//
// Requires a sign change on [lower, upper]; never searches for one.
// Stop: interval width <= x_tol * max(|a|, |b|), |g(mid)| <= f_tol, or the
// midpoint can no longer be represented strictly inside the interval.

use crate::error::{PhysicsError, Result};

#[derive(Debug, Clone)]
pub struct BisectSettings {
    /// Tolerance on the root location, relative to the bracket magnitude.
    pub x_tol: f64,
    /// Accept a midpoint whose residual is at or below this (0 disables).
    pub f_tol: f64,
    pub max_iters: usize,
}

impl Default for BisectSettings {
    fn default() -> Self {
        Self {
            x_tol: 1e-12,
            f_tol: 0.0,
            max_iters: 200,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BisectReport {
    pub root: f64,
    pub iters: usize,
    /// g(root)
    pub residual: f64,
    pub converged: bool,
}

/// Find a root of `g` in [lower, upper] by bisection.
///
/// Fails with `InvalidBracket` if the endpoints are not finite, lower > upper,
/// or g(lower) and g(upper) have the same strict sign. An endpoint that is an
/// exact root is returned immediately.
pub fn bisect<F>(mut g: F, lower: f64, upper: f64, settings: &BisectSettings) -> Result<BisectReport>
where
    F: FnMut(f64) -> f64,
{
    let g_lower = g(lower);
    let g_upper = g(upper);

    let invalid = || PhysicsError::InvalidBracket {
        lower,
        upper,
        g_lower,
        g_upper,
    };

    if !(lower.is_finite() && upper.is_finite()) || lower > upper {
        return Err(invalid());
    }
    if !(g_lower.is_finite() && g_upper.is_finite()) {
        return Err(invalid());
    }

    if g_lower == 0.0 {
        return Ok(BisectReport {
            root: lower,
            iters: 0,
            residual: 0.0,
            converged: true,
        });
    }
    if g_upper == 0.0 {
        return Ok(BisectReport {
            root: upper,
            iters: 0,
            residual: 0.0,
            converged: true,
        });
    }
    if g_lower.signum() == g_upper.signum() {
        return Err(invalid());
    }

    let (mut a, mut b) = (lower, upper);
    let mut g_a = g_lower;

    for it in 1..=settings.max_iters {
        let mid = 0.5 * (a + b);
        if mid <= a || mid >= b {
            // interval is down to adjacent floats
            return Ok(BisectReport {
                root: mid,
                iters: it,
                residual: g(mid),
                converged: true,
            });
        }
        let g_mid = g(mid);

        if g_mid == 0.0 || g_mid.abs() <= settings.f_tol {
            return Ok(BisectReport {
                root: mid,
                iters: it,
                residual: g_mid,
                converged: true,
            });
        }

        if g_a.signum() == g_mid.signum() {
            a = mid;
            g_a = g_mid;
        } else {
            b = mid;
        }

        if b - a <= settings.x_tol * a.abs().max(b.abs()) {
            let root = 0.5 * (a + b);
            return Ok(BisectReport {
                root,
                iters: it,
                residual: g(root),
                converged: true,
            });
        }
    }

    let root = 0.5 * (a + b);
    let residual = g(root);
    tracing::warn!(
        lower,
        upper,
        root,
        residual,
        max_iters = settings.max_iters,
        "bisection hit the iteration cap before reaching x_tol"
    );
    Ok(BisectReport {
        root,
        iters: settings.max_iters,
        residual,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn finds_sqrt_two() {
        let r = bisect(|x| x * x - 2.0, 0.0, 2.0, &BisectSettings::default()).unwrap();
        assert!(r.converged);
        assert_abs_diff_eq!(r.root, 2.0f64.sqrt(), epsilon = 1e-11);
        assert!(r.iters <= 60, "took {} iterations", r.iters);
    }

    #[test]
    fn decreasing_function_works_too() {
        let r = bisect(|x| 1.0 - x, -3.0, 5.0, &BisectSettings::default()).unwrap();
        assert_abs_diff_eq!(r.root, 1.0, epsilon = 1e-11);
    }

    #[test]
    fn exact_endpoint_root_is_returned() {
        let r = bisect(|x| x - 2.0, 0.0, 2.0, &BisectSettings::default()).unwrap();
        assert_eq!(r.root, 2.0);
        assert_eq!(r.iters, 0);
    }

    #[test]
    fn same_sign_is_invalid_bracket() {
        let err = bisect(|x| x * x + 1.0, -1.0, 1.0, &BisectSettings::default()).unwrap_err();
        match err {
            PhysicsError::InvalidBracket { lower, upper, .. } => {
                assert_eq!(lower, -1.0);
                assert_eq!(upper, 1.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reversed_or_nan_interval_is_invalid() {
        let s = BisectSettings::default();
        assert!(bisect(|x| x, 1.0, -1.0, &s).is_err());
        assert!(bisect(|x| x, f64::NAN, 1.0, &s).is_err());
        assert!(bisect(|_| f64::NAN, -1.0, 1.0, &s).is_err());
    }

    #[test]
    fn iteration_cap_reports_not_converged() {
        let s = BisectSettings {
            x_tol: 0.0,
            f_tol: 0.0,
            max_iters: 5,
        };
        let r = bisect(|x| x - 0.3, 0.0, 1.0, &s).unwrap();
        assert!(!r.converged);
        assert_eq!(r.iters, 5);
        assert!((r.root - 0.3).abs() < 1.0 / 32.0);
    }

    #[test]
    fn tolerance_scales_with_the_root() {
        let s = BisectSettings::default();
        let target = 3.3e-10;
        let r = bisect(|x| x - target, 1e-11, 2e-9, &s).unwrap();
        assert!(r.converged);
        assert!(((r.root - target) / target).abs() < 1e-11, "root {}", r.root);

        let r = bisect(|x| x - 3.3e10, 1e9, 1e11, &s).unwrap();
        assert!(((r.root - 3.3e10) / 3.3e10).abs() < 1e-11, "root {}", r.root);
        assert!(r.iters < 60, "took {} iterations", r.iters);
    }

    #[test]
    fn repeated_calls_are_bitwise_reproducible() {
        let s = BisectSettings::default();
        let a = bisect(|x| x.exp() - 3.0, 0.0, 2.0, &s).unwrap();
        let b = bisect(|x| x.exp() - 3.0, 0.0, 2.0, &s).unwrap();
        assert_eq!(a.root.to_bits(), b.root.to_bits());
    }
}
