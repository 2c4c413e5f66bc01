//! Sizing inputs, loop configuration, outcome records and errors.

use std::fmt;

use crate::mission::{FuelFractions, MissionProfile, DEFAULT_RESERVE_FACTOR};
use crate::regression::EmptyWeightRegression;

/// Loop configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingCfg {
    /// Starting gross weight guess (lb).
    pub initial_guess: f64,
    /// Hard cap on loop passes; reaching it is not an error.
    pub max_iters: usize,
    /// Absolute threshold on `|Wo_new − Wo|` (lb).
    pub tol: f64,
    /// Update blend `Wo ← (1 − r)·Wo + r·Wo_new`; `1.0` is the plain update.
    pub relaxation: f64,
    /// Upper clamp applied to the empty-weight fraction after the loop.
    pub empty_fraction_cap: f64,
}

impl Default for SizingCfg {
    fn default() -> Self {
        Self {
            initial_guess: 75_000.0,
            max_iters: 30,
            tol: 1.0,
            relaxation: 1.0,
            empty_fraction_cap: 0.51,
        }
    }
}

impl SizingCfg {
    /// Upper bound accepted for `max_iters`.
    pub const MAX_ITERS_LIMIT: usize = 1_000_000;

    pub(crate) fn validate(&self) -> Result<(), SizingError> {
        if !self.initial_guess.is_finite() || self.initial_guess <= 0.0 {
            return Err(SizingError::invalid("initial_guess must be finite and > 0"));
        }
        if self.max_iters > Self::MAX_ITERS_LIMIT {
            return Err(SizingError::invalid(format!(
                "max_iters must be <= {}, got {}",
                Self::MAX_ITERS_LIMIT,
                self.max_iters
            )));
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(SizingError::invalid("tol must be finite and > 0"));
        }
        if !(self.relaxation > 0.0 && self.relaxation <= 1.0) {
            return Err(SizingError::invalid("relaxation must lie in (0, 1]"));
        }
        if !(self.empty_fraction_cap > 0.0 && self.empty_fraction_cap < 1.0) {
            return Err(SizingError::invalid("empty_fraction_cap must lie in (0, 1)"));
        }
        Ok(())
    }
}

/// Fixed design inputs for one sizing run.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingInputs {
    pub crew_weight: f64,
    pub payload_weight: f64,
    pub regression: EmptyWeightRegression,
    pub mission: MissionProfile,
    pub reserve_factor: f64,
}

impl SizingInputs {
    /// Variable-sweep fighter: 400 lb crew, 6802 lb payload, fighter mission.
    pub fn fighter() -> Self {
        Self {
            crew_weight: 400.0,
            payload_weight: 6802.0,
            regression: EmptyWeightRegression::default(),
            mission: MissionProfile::fighter(),
            reserve_factor: DEFAULT_RESERVE_FACTOR,
        }
    }

    /// Weight carried regardless of aircraft size, `Wcrew + Wpayload`.
    #[inline]
    pub fn fixed_weight(&self) -> f64 {
        self.crew_weight + self.payload_weight
    }

    pub fn fuel_fractions(&self) -> FuelFractions {
        self.mission.fuel_fractions(self.reserve_factor)
    }

    pub(crate) fn validate(&self) -> Result<(), SizingError> {
        if !(self.crew_weight.is_finite() && self.payload_weight.is_finite()) {
            return Err(SizingError::invalid("crew and payload weights must be finite"));
        }
        if self.crew_weight < 0.0 || self.payload_weight < 0.0 || self.fixed_weight() <= 0.0 {
            return Err(SizingError::invalid(
                "crew and payload weights must be >= 0 with a positive sum",
            ));
        }
        if !self.reserve_factor.is_finite() || self.reserve_factor < 1.0 {
            return Err(SizingError::invalid("reserve_factor must be finite and >= 1"));
        }
        self.regression.validate()?;
        self.mission.validate()
    }
}

impl Default for SizingInputs {
    fn default() -> Self {
        Self::fighter()
    }
}

/// One pass of the gross weight loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iterate {
    /// 1-based pass number.
    pub iteration: usize,
    /// Guess entering this pass.
    pub gross_weight: f64,
    /// `E` evaluated at `gross_weight`.
    pub empty_fraction: f64,
    /// `1 − F − E`.
    pub denominator: f64,
    /// `Wo_new` produced by this pass.
    pub next_gross_weight: f64,
}

impl Iterate {
    #[inline]
    pub fn step(&self) -> f64 {
        (self.next_gross_weight - self.gross_weight).abs()
    }
}

/// Weights derived from a sized gross weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightBreakdown {
    pub gross: f64,
    pub empty_fraction: f64,
    pub empty: f64,
    pub landing: f64,
    pub fuel_total: f64,
    pub fuel_used: f64,
    pub fuel_reserve: f64,
}

impl WeightBreakdown {
    pub fn from_gross(gross: f64, empty_fraction: f64, wn_w0: f64, fuel: FuelFractions) -> Self {
        let fuel_total = fuel.total * gross;
        let fuel_used = fuel.used * gross;
        Self {
            gross,
            empty_fraction,
            empty: empty_fraction * gross,
            landing: wn_w0 * gross,
            fuel_total,
            fuel_used,
            fuel_reserve: fuel_total - fuel_used,
        }
    }
}

/// Result of `size_aircraft`.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingOutcome {
    pub weights: WeightBreakdown,
    /// Empty-weight fraction at the final `Wo` before clamping.
    pub raw_empty_fraction: f64,
    /// Mission weight fraction Wn/W0.
    pub mission_fraction: f64,
    pub fuel: FuelFractions,
    /// Pass on which `|Wo_new − Wo| < tol` held, if any.
    pub converged_at: Option<usize>,
    pub history: Vec<Iterate>,
}

impl SizingOutcome {
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged_at.is_some()
    }

    #[inline]
    pub fn iterations(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn clamped(&self) -> bool {
        self.weights.empty_fraction < self.raw_empty_fraction
    }
}

/// Errors surfaced by the sizing loop.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    InvalidParams { reason: String },
    /// `1 − F − E <= 0`: fuel and empty weight consume the whole aircraft.
    NonPositiveDenominator { iteration: usize, denominator: f64 },
    /// A NaN or infinity appeared in the loop.
    NonFinite { iteration: usize },
}

impl SizingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sizing params: {reason}"),
            Self::NonPositiveDenominator {
                iteration,
                denominator,
            } => write!(
                f,
                "iteration {iteration}: 1 - F - E = {denominator} is not positive (no feasible gross weight)"
            ),
            Self::NonFinite { iteration } => {
                write!(f, "iteration {iteration}: gross weight became non-finite")
            }
        }
    }
}

impl std::error::Error for SizingError {}
