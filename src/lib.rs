//! Quote Engine - cost and delivery estimation for visual-effects projects
//!
//! This library provides:
//! - A configurable rate card keyed by service type and tier
//! - Price estimation with an auditable, ordered list of applied factors
//! - Delivery-date derivation independent of the price path
//! - Batch quoting from CSV with parallel evaluation
//! - Currency conversion for display

pub mod error;
pub mod rates;
pub mod request;
pub mod estimate;
pub mod currency;
pub mod runner;

// Re-export commonly used types
pub use error::{LoadError, QuoteError, QuoteResult};
pub use rates::{RateEntry, RateTable, ServiceType, Tier};
pub use request::{
    ComplexityClass, DeliverySpeed, EstimateRequest, FeatureFlags, QuoteRequest, ResolutionClass,
};
pub use estimate::{
    estimate, estimate_today, Adjustment, AppliedFactor, EstimateResult, QuoteSummary,
};
pub use currency::{CurrencyConverter, FixedRateConverter};
pub use runner::{BatchQuote, QuoteRunner};
