//! Conceptual aircraft sizing and parametric cost estimation.
//!
//! Pipeline
//! - `mission`: segment weight fractions → Wn/W0 and fuel fractions.
//! - `regression`: empirical empty-weight fraction `E = A · Wo^c · Kvs`.
//! - `sizing`: fixed-point takeoff gross weight loop and weight breakdown.
//! - `cost`: cost-estimating relationships (CERs) on the converged empty weight.
//! - `report`: console formatting of the above.
//! - `numeric`: small kernels used by the environment smoke test.
//!
//! Everything here is pure and I/O free; the `aerosize` binary owns logging
//! and artifact writing.

pub mod cost;
pub mod mission;
pub mod numeric;
pub mod regression;
pub mod report;
pub mod sizing;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cost::{
        estimate_costs, AdjustmentFactors, CostError, CostEstimate, CostInputs, RecurringIndices,
    };
    pub use crate::mission::{FuelFractions, MissionProfile, MissionSegment};
    pub use crate::regression::{EmptyWeightRegression, SweepKind};
    pub use crate::report::{format_fixed, format_usd, SizingReport};
    pub use crate::sizing::{
        converge_gross_weight, size_aircraft, Iterate, SizingCfg, SizingError, SizingInputs,
        SizingOutcome, WeightBreakdown,
    };
}
