//! Empirical empty-weight fraction regression `E = A · Wo^c · Kvs`.

use crate::sizing::SizingError;

/// Wing sweep arrangement; selects the `Kvs` multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepKind {
    Fixed,
    Variable,
}

impl SweepKind {
    #[inline]
    pub fn kvs(self) -> f64 {
        match self {
            SweepKind::Fixed => 1.0,
            SweepKind::Variable => 1.04,
        }
    }
}

/// Empty-weight fraction regression `E(Wo) = a · Wo^c · kvs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmptyWeightRegression {
    pub a: f64,
    pub c: f64,
    pub kvs: f64,
}

impl EmptyWeightRegression {
    /// Jet fighter coefficients (`a = 2.392`, `c = −0.13`).
    pub fn jet_fighter(sweep: SweepKind) -> Self {
        Self {
            a: 2.392,
            c: -0.13,
            kvs: sweep.kvs(),
        }
    }

    /// Empty-weight fraction at gross weight `wo`. Requires `wo > 0`.
    #[inline]
    pub fn empty_fraction(&self, wo: f64) -> f64 {
        self.a * wo.powf(self.c) * self.kvs
    }

    pub(crate) fn validate(&self) -> Result<(), SizingError> {
        if !(self.a.is_finite() && self.c.is_finite() && self.kvs.is_finite()) {
            return Err(SizingError::invalid("regression coefficients must be finite"));
        }
        if self.a <= 0.0 || self.kvs <= 0.0 {
            return Err(SizingError::invalid("regression a and kvs must be > 0"));
        }
        Ok(())
    }
}

impl Default for EmptyWeightRegression {
    fn default() -> Self {
        Self::jet_fighter(SweepKind::Variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_sweep_scales_fixed_wing_fraction() {
        let fixed = EmptyWeightRegression::jet_fighter(SweepKind::Fixed);
        let variable = EmptyWeightRegression::jet_fighter(SweepKind::Variable);
        let wo = 60_000.0;
        let ratio = variable.empty_fraction(wo) / fixed.empty_fraction(wo);
        assert!((ratio - 1.04).abs() < 1e-12);
    }

    #[test]
    fn empty_fraction_at_reference_guess() {
        let e = EmptyWeightRegression::default().empty_fraction(75_000.0);
        assert!((e - 0.578_144_702_216_955_2).abs() < 1e-12);
    }

    #[test]
    fn negative_exponent_makes_fraction_decrease_with_weight() {
        let r = EmptyWeightRegression::default();
        assert!(r.empty_fraction(40_000.0) > r.empty_fraction(80_000.0));
    }

    #[test]
    fn validate_rejects_non_finite_coefficients() {
        let r = EmptyWeightRegression {
            a: f64::NAN,
            ..Default::default()
        };
        assert!(r.validate().is_err());
        let r = EmptyWeightRegression {
            kvs: 0.0,
            ..Default::default()
        };
        assert!(r.validate().is_err());
    }
}
