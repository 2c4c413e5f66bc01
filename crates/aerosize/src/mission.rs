//! Mission segment weight fractions and the fuel fractions derived from them.
//!
//! - `MissionProfile`: ordered segments, each `W_i / W_{i-1}`.
//! - `FuelFractions`: mission fuel `1 − Wn/W0` and the reserve-inflated total.

use crate::sizing::SizingError;

/// Reserve and trapped fuel allowance applied on top of mission fuel.
pub const DEFAULT_RESERVE_FACTOR: f64 = 1.06;

/// One mission leg and its weight fraction `W_end / W_start`.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionSegment {
    pub name: String,
    pub fraction: f64,
}

impl MissionSegment {
    pub fn new(name: impl Into<String>, fraction: f64) -> Self {
        Self {
            name: name.into(),
            fraction,
        }
    }
}

/// Ordered list of mission segments.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionProfile {
    pub segments: Vec<MissionSegment>,
}

impl MissionProfile {
    pub fn new(segments: Vec<MissionSegment>) -> Self {
        Self { segments }
    }

    /// Air-superiority fighter mission: warmup through landing with one combat leg.
    pub fn fighter() -> Self {
        let legs = [
            ("warmup", 0.99),
            ("taxi", 0.99),
            ("takeoff", 0.99),
            ("climb", 0.96),
            ("cruise", 0.812),
            ("combat", 0.90),
            ("loiter", 0.977),
            ("descent", 0.99),
            ("landing", 0.995),
        ];
        Self::new(
            legs.into_iter()
                .map(|(name, fraction)| MissionSegment::new(name, fraction))
                .collect(),
        )
    }

    /// Mission weight fraction Wn/W0: product of all segment fractions.
    pub fn weight_fraction(&self) -> f64 {
        self.segments.iter().map(|s| s.fraction).product()
    }

    pub fn fuel_fractions(&self, reserve_factor: f64) -> FuelFractions {
        FuelFractions::from_weight_fraction(self.weight_fraction(), reserve_factor)
    }

    pub(crate) fn validate(&self) -> Result<(), SizingError> {
        if self.segments.is_empty() {
            return Err(SizingError::invalid("mission needs at least one segment"));
        }
        for seg in &self.segments {
            if !seg.fraction.is_finite() || seg.fraction <= 0.0 || seg.fraction > 1.0 {
                return Err(SizingError::invalid(format!(
                    "segment `{}` fraction must lie in (0, 1], got {}",
                    seg.name, seg.fraction
                )));
            }
        }
        Ok(())
    }
}

impl Default for MissionProfile {
    fn default() -> Self {
        Self::fighter()
    }
}

/// Fuel fractions of takeoff gross weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuelFractions {
    /// Fuel burned over the mission, `1 − Wn/W0`.
    pub used: f64,
    /// Mission plus reserve fuel, `reserve_factor · used`.
    pub total: f64,
}

impl FuelFractions {
    pub fn from_weight_fraction(wn_w0: f64, reserve_factor: f64) -> Self {
        let used = 1.0 - wn_w0;
        Self {
            used,
            total: reserve_factor * used,
        }
    }

    #[inline]
    pub fn reserve(&self) -> f64 {
        self.total - self.used
    }
}
