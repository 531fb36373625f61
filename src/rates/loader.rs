//! CSV-based rate table loader
//!
//! Loads the published rate card from data/rates/rate_table.csv

use super::{RateEntry, RateTable, ServiceType, Tier};
use crate::error::LoadError;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the rates directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// File name of the rate card inside the rates directory
pub const RATE_TABLE_FILE: &str = "rate_table.csv";

/// Raw CSV row matching rate_table.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ServiceType")]
    service_type: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "BasePrice")]
    base_price: f64,
    #[serde(rename = "PricePerUnit")]
    price_per_unit: f64,
    #[serde(rename = "MinimumUnits")]
    minimum_units: u32,
    #[serde(rename = "MaxDiscount")]
    max_discount: f64,
    #[serde(rename = "StandardDeliveryDays")]
    standard_delivery_days: u32,
}

impl CsvRow {
    fn into_plan(self, row: usize) -> Result<(ServiceType, Tier, RateEntry), LoadError> {
        let service: ServiceType = self
            .service_type
            .parse()
            .map_err(|source| LoadError::Row { row, source })?;
        let tier: Tier = self
            .tier
            .parse()
            .map_err(|source| LoadError::Row { row, source })?;

        let entry = RateEntry::new(
            self.base_price,
            self.price_per_unit,
            self.minimum_units,
            self.max_discount,
            self.standard_delivery_days,
        );
        entry
            .validate()
            .map_err(|reason| LoadError::InvalidEntry { row, reason })?;

        Ok((service, tier, entry))
    }
}

/// Load a rate table from any reader (e.g., string buffer, embedded asset)
pub fn load_rate_table_from_reader<R: Read>(reader: R) -> Result<RateTable, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen = HashSet::new();
    let mut plans = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let (service, tier, entry) = row.into_plan(idx + 1)?;

        if !seen.insert((service, tier)) {
            return Err(LoadError::Duplicate { service, tier });
        }
        plans.push((service, tier, entry));
    }

    log::info!("Loaded {} rate plans", plans.len());
    Ok(RateTable::from_entries(plans))
}

/// Load rate_table.csv from the given directory
pub fn load_rate_table(dir: &Path) -> Result<RateTable, LoadError> {
    let path = dir.join(RATE_TABLE_FILE);
    let file = File::open(&path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_rate_table_from_reader(file)
}

/// Load the rate table from the default location
pub fn load_default_rates() -> Result<RateTable, LoadError> {
    load_rate_table(Path::new(DEFAULT_RATES_PATH))
}
