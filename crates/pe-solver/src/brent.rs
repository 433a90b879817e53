//! Brent's method for bracketed scalar roots.

use crate::error::{SolverError, SolverResult};

/// Brent solver configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrentConfig {
    /// Absolute tolerance, applied to both the residual and the bracket width
    pub abs_tol: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            abs_tol: 1e-10,
            max_iterations: 200,
        }
    }
}

impl BrentConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if !self.abs_tol.is_finite() || self.abs_tol <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "abs_tol must be finite and positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        Ok(())
    }
}

/// Converged root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrentSolution {
    /// Root estimate, always inside the initial bracket
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Number of iterations taken (0 when an endpoint is already a root)
    pub iterations: usize,
}

/// Solve `f(x, params) = 0` for `x` in `[lo, hi]`.
///
/// `f(lo)` and `f(hi)` must have opposite signs; otherwise
/// [`SolverError::InvalidBracket`] is returned before any iteration. Each step tries
/// inverse quadratic interpolation, then the secant step, and falls back to
/// bisection whenever the interpolated point would leave the bracket or the
/// bracket is not shrinking fast enough.
pub fn brent_solve<P, F>(
    f: F,
    params: &P,
    lo: f64,
    hi: f64,
    config: &BrentConfig,
) -> SolverResult<BrentSolution>
where
    F: Fn(f64, &P) -> f64,
{
    config.validate()?;
    if !lo.is_finite() || !hi.is_finite() {
        return Err(SolverError::InvalidConfig {
            what: "bracket endpoints must be finite",
        });
    }

    let eval = |x: f64| -> SolverResult<f64> {
        let residual = f(x, params);
        if residual.is_finite() {
            Ok(residual)
        } else {
            Err(SolverError::NonFiniteResidual { x, residual })
        }
    };

    let mut a = lo;
    let mut b = hi;
    let mut fa = eval(a)?;
    let mut fb = eval(b)?;

    if fa == 0.0 {
        return Ok(BrentSolution {
            x: a,
            residual: fa,
            iterations: 0,
        });
    }
    if fb == 0.0 {
        return Ok(BrentSolution {
            x: b,
            residual: fb,
            iterations: 0,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::InvalidBracket {
            lo,
            hi,
            f_lo: fa,
            f_hi: fb,
        });
    }

    // c is the contrapoint: [b, c] always brackets the root.
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=config.max_iterations {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.abs_tol;
        let half_width = 0.5 * (c - b);

        tracing::trace!(iteration, x = b, residual = fb, half_width, "brent step");

        if half_width.abs() <= tol || fb.abs() <= config.abs_tol {
            return Ok(BrentSolution {
                x: b,
                residual: fb,
                iterations: iteration,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant
                (2.0 * half_width * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit_interp = 3.0 * half_width * q - (tol * q).abs();
            let limit_prev = (e * q).abs();
            if 2.0 * p < limit_interp.min(limit_prev) {
                e = d;
                d = p / q;
            } else {
                d = half_width;
                e = d;
            }
        } else {
            d = half_width;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else {
            tol.copysign(half_width)
        };
        fb = eval(b)?;
    }

    Err(SolverError::NonConvergence {
        best: b,
        residual: fb,
        iterations: config.max_iterations,
    })
}
