//! Numeric kernels exercised by the environment smoke test.
//!
//! - `dot`: dense dot product through `nalgebra::DVector`.
//! - `integrate`: adaptive Simpson quadrature with Richardson correction.

use std::fmt;

use nalgebra::DVector;

/// Quadrature tolerances.
#[derive(Clone, Copy, Debug)]
pub struct QuadCfg {
    /// Absolute error target for the whole interval.
    pub abs_tol: f64,
    /// Maximum bisection depth per branch.
    pub max_depth: u32,
    /// Total integrand evaluations allowed across all branches.
    pub max_evals: usize,
}

impl Default for QuadCfg {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            max_depth: 50,
            max_evals: 100_000,
        }
    }
}

/// Integral value with an error estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub abs_err: f64,
    /// Integrand evaluations used.
    pub evals: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    LengthMismatch { left: usize, right: usize },
    NonFiniteBound,
    NonFiniteSample { x: f64 },
    /// The integrand needed more than `QuadCfg::max_evals` samples.
    EvalBudgetExceeded { max_evals: usize },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::LengthMismatch { left, right } => {
                write!(f, "vector lengths differ: {left} vs {right}")
            }
            NumericError::NonFiniteBound => write!(f, "integration bounds must be finite"),
            NumericError::NonFiniteSample { x } => {
                write!(f, "integrand is not finite at x = {x}")
            }
            NumericError::EvalBudgetExceeded { max_evals } => {
                write!(f, "quadrature did not settle within {max_evals} evaluations")
            }
        }
    }
}

impl std::error::Error for NumericError {}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, NumericError> {
    if a.len() != b.len() {
        return Err(NumericError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let a = DVector::from_column_slice(a);
    let b = DVector::from_column_slice(b);
    Ok(a.dot(&b))
}

/// Integrate `f` over `[lo, hi]`. Reversed bounds flip the sign.
pub fn integrate<F>(f: F, lo: f64, hi: f64, cfg: QuadCfg) -> Result<Quadrature, NumericError>
where
    F: Fn(f64) -> f64,
{
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(NumericError::NonFiniteBound);
    }
    if lo == hi {
        return Ok(Quadrature {
            value: 0.0,
            abs_err: 0.0,
            evals: 0,
        });
    }
    if lo > hi {
        let q = integrate(f, hi, lo, cfg)?;
        return Ok(Quadrature {
            value: -q.value,
            ..q
        });
    }

    let mut sampler = Sampler {
        f: &f,
        evals: 0,
        max_evals: cfg.max_evals,
    };
    let fa = sampler.eval(lo)?;
    let fb = sampler.eval(hi)?;
    let mid = 0.5 * (lo + hi);
    let fm = sampler.eval(mid)?;
    let whole = Panel {
        a: lo,
        b: hi,
        fa,
        fm,
        fb,
    };
    let (value, abs_err) = sampler.refine(whole, cfg.abs_tol, cfg.max_depth)?;
    Ok(Quadrature {
        value,
        abs_err,
        evals: sampler.evals,
    })
}

#[derive(Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
}

impl Panel {
    #[inline]
    fn simpson(&self) -> f64 {
        (self.b - self.a) / 6.0 * (self.fa + 4.0 * self.fm + self.fb)
    }
}

struct Sampler<'f, F> {
    f: &'f F,
    evals: usize,
    max_evals: usize,
}

impl<F: Fn(f64) -> f64> Sampler<'_, F> {
    fn eval(&mut self, x: f64) -> Result<f64, NumericError> {
        if self.evals >= self.max_evals {
            return Err(NumericError::EvalBudgetExceeded {
                max_evals: self.max_evals,
            });
        }
        self.evals += 1;
        let y = (self.f)(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(NumericError::NonFiniteSample { x })
        }
    }

    fn refine(&mut self, p: Panel, tol: f64, depth: u32) -> Result<(f64, f64), NumericError> {
        let m = 0.5 * (p.a + p.b);
        let left = Panel {
            a: p.a,
            b: m,
            fa: p.fa,
            fm: self.eval(0.5 * (p.a + m))?,
            fb: p.fm,
        };
        let right = Panel {
            a: m,
            b: p.b,
            fa: p.fm,
            fm: self.eval(0.5 * (m + p.b))?,
            fb: p.fb,
        };
        let coarse = p.simpson();
        let fine = left.simpson() + right.simpson();
        let delta = fine - coarse;
        if depth == 0 || delta.abs() <= 15.0 * tol {
            return Ok((fine + delta / 15.0, delta.abs() / 15.0));
        }
        let (lv, le) = self.refine(left, 0.5 * tol, depth - 1)?;
        let (rv, re) = self.refine(right, 0.5 * tol, depth - 1)?;
        Ok((lv + rv, le + re))
    }
}
