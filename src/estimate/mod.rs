//! Estimation engine: price adjustments, delivery scheduling, and results

mod engine;
mod result;
pub mod delivery;
pub mod factors;

pub use engine::{estimate, estimate_today, price};
pub use factors::Adjustment;
pub use result::{AppliedFactor, EstimateResult, QuoteSummary};
