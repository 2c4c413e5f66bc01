use super::types::{Iterate, SizingCfg, SizingError, SizingInputs, SizingOutcome, WeightBreakdown};
use crate::regression::EmptyWeightRegression;

/// Passes preallocated for the history; longer runs grow the vector.
const HISTORY_PREALLOC: usize = 64;

/// Raw loop result before clamping and breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Convergence {
    /// Final `Wo`: the guess that passed the test, or the last update at the cap.
    pub gross_weight: f64,
    pub converged_at: Option<usize>,
    pub history: Vec<Iterate>,
}

/// Fixed-point loop `Wo ← fixed_weight / (1 − fuel_fraction − E(Wo))`.
///
/// `cfg` is assumed validated; `size_aircraft` is the checked entry point.
pub fn converge_gross_weight(
    fixed_weight: f64,
    fuel_fraction: f64,
    regression: &EmptyWeightRegression,
    cfg: &SizingCfg,
) -> Result<Convergence, SizingError> {
    let r = cfg.relaxation;
    let mut wo = cfg.initial_guess;
    let mut history = Vec::with_capacity(cfg.max_iters.min(HISTORY_PREALLOC));
    let mut converged_at = None;

    for iteration in 1..=cfg.max_iters {
        let empty_fraction = regression.empty_fraction(wo);
        let denominator = 1.0 - fuel_fraction - empty_fraction;
        if !denominator.is_finite() {
            return Err(SizingError::NonFinite { iteration });
        }
        if denominator <= 0.0 {
            return Err(SizingError::NonPositiveDenominator {
                iteration,
                denominator,
            });
        }
        let next = fixed_weight / denominator;
        history.push(Iterate {
            iteration,
            gross_weight: wo,
            empty_fraction,
            denominator,
            next_gross_weight: next,
        });

        if (next - wo).abs() < cfg.tol {
            converged_at = Some(iteration);
            break;
        }
        // r == 1 reduces to `wo = next` exactly (0·wo == 0).
        wo = (1.0 - r) * wo + r * next;
        if !wo.is_finite() {
            return Err(SizingError::NonFinite { iteration });
        }
    }

    Ok(Convergence {
        gross_weight: wo,
        converged_at,
        history,
    })
}

/// Validate inputs, run the loop, clamp `E`, and derive the weight breakdown.
pub fn size_aircraft(inputs: &SizingInputs, cfg: &SizingCfg) -> Result<SizingOutcome, SizingError> {
    inputs.validate()?;
    cfg.validate()?;

    let mission_fraction = inputs.mission.weight_fraction();
    let fuel = inputs.fuel_fractions();
    let conv = converge_gross_weight(inputs.fixed_weight(), fuel.total, &inputs.regression, cfg)?;

    let wo = conv.gross_weight;
    let raw_empty_fraction = inputs.regression.empty_fraction(wo);
    let empty_fraction = raw_empty_fraction.min(cfg.empty_fraction_cap);

    Ok(SizingOutcome {
        weights: WeightBreakdown::from_gross(wo, empty_fraction, mission_fraction, fuel),
        raw_empty_fraction,
        mission_fraction,
        fuel,
        converged_at: conv.converged_at,
        history: conv.history,
    })
}
