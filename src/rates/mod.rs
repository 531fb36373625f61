//! Rate card: base prices, per-unit prices, discounts, and delivery terms

mod table;
pub mod loader;

pub use table::{RateEntry, RateTable, ServiceType, Tier};
pub use loader::{
    load_default_rates, load_rate_table, load_rate_table_from_reader, DEFAULT_RATES_PATH,
};
