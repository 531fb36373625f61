//! Estimate request data structures and batch loading

mod data;
pub mod loader;

pub use data::{
    ComplexityClass, DeliverySpeed, EstimateRequest, FeatureFlags, QuoteRequest, ResolutionClass,
};
pub use loader::{load_requests, load_requests_from_reader};
