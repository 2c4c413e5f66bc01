//! Takeoff gross weight sizing: fixed-point loop and weight breakdown.
//!
//! Purpose
//! - Iterate `Wo ← (Wcrew + Wpayload) / (1 − F − E(Wo))` from an initial guess
//!   until successive estimates differ by less than `tol`, or `max_iters` passes.
//! - Recompute `E` once at the final `Wo`, clamp it, and derive empty, fuel and
//!   landing weights.
//!
//! Stopping rule
//! - The convergence test compares `Wo_new` with the current `Wo`; on success
//!   the loop exits *without* adopting `Wo_new`.
//! - Hitting the cap is not an error. `SizingOutcome::converged_at` is `None`
//!   and the last update stands.
//!
//! Layout: `types.rs` (inputs, config, outcome, error) and `solve.rs` (loop).

mod solve;
mod types;

pub use solve::{converge_gross_weight, size_aircraft, Convergence};
pub use types::{Iterate, SizingCfg, SizingError, SizingInputs, SizingOutcome, WeightBreakdown};
