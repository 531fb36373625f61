//! Currency conversion for displaying quotes outside the base currency

use crate::error::LoadError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Code of the currency rate cards are priced in
pub const BASE_CURRENCY: &str = "USD";

/// File name of the currency table inside the rates directory
pub const CURRENCY_RATES_FILE: &str = "currency_rates.csv";

/// Converts amounts between currency codes
pub trait CurrencyConverter {
    /// Convert an amount, or `None` when either code is unknown
    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64>;
}

/// Converter backed by a fixed table of units per base-currency unit
#[derive(Debug, Clone)]
pub struct FixedRateConverter {
    per_base_unit: HashMap<String, f64>,
}

impl FixedRateConverter {
    pub fn new(per_base_unit: HashMap<String, f64>) -> Self {
        let mut per_base_unit: HashMap<String, f64> = per_base_unit
            .into_iter()
            .map(|(code, rate)| (code.to_ascii_uppercase(), rate))
            .collect();
        per_base_unit.insert(BASE_CURRENCY.to_string(), 1.0);
        Self { per_base_unit }
    }

    /// Published display rates, identical to data/rates/currency_rates.csv
    pub fn default_rates() -> Self {
        Self::new(
            [
                ("EUR", 0.92),
                ("GBP", 0.79),
                ("INR", 83.2),
                ("JPY", 149.5),
                ("CAD", 1.36),
                ("AUD", 1.52),
            ]
            .into_iter()
            .map(|(code, rate)| (code.to_string(), rate))
            .collect(),
        )
    }

    /// Load from a `Currency,PerBaseUnit` CSV
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rates = HashMap::new();

        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let (Some(code), Some(raw_rate)) = (record.get(0), record.get(1)) else {
                return Err(LoadError::InvalidEntry {
                    row: idx + 1,
                    reason: "expected Currency,PerBaseUnit".to_string(),
                });
            };
            let code = code.trim().to_string();
            let rate: f64 = raw_rate.trim().parse().map_err(|_| LoadError::InvalidEntry {
                row: idx + 1,
                reason: format!("unparseable rate '{}' for {}", raw_rate, code),
            })?;

            if !rate.is_finite() || rate <= 0.0 {
                return Err(LoadError::InvalidEntry {
                    row: idx + 1,
                    reason: format!("rate for {} must be > 0, got {}", code, rate),
                });
            }
            rates.insert(code, rate);
        }

        log::info!("Loaded {} currency rates", rates.len());
        Ok(Self::new(rates))
    }

    /// Load currency_rates.csv from the given directory
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        let path = dir.join(CURRENCY_RATES_FILE);
        let file = std::fs::File::open(&path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn supports(&self, code: &str) -> bool {
        self.per_base_unit.contains_key(&code.to_ascii_uppercase())
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        let from_rate = self.per_base_unit.get(&from.to_ascii_uppercase())?;
        let to_rate = self.per_base_unit.get(&to.to_ascii_uppercase())?;
        Some(amount / from_rate * to_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_from_base() {
        let fx = FixedRateConverter::default_rates();
        assert_relative_eq!(fx.convert(100_000.0, "USD", "EUR").unwrap(), 92_000.0, epsilon = 1e-6);
        assert_relative_eq!(fx.convert(100.0, "usd", "inr").unwrap(), 8_320.0, epsilon = 1e-6);
        assert_eq!(fx.convert(100.0, "USD", "USD"), Some(100.0));
    }

    #[test]
    fn test_cross_rate() {
        let fx = FixedRateConverter::default_rates();
        let eur_to_gbp = fx.convert(92.0, "EUR", "GBP").unwrap();
        assert_relative_eq!(eur_to_gbp, 79.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_code() {
        let fx = FixedRateConverter::default_rates();
        assert!(fx.convert(1.0, "USD", "XYZ").is_none());
        assert!(!fx.supports("XYZ"));
        assert!(fx.supports("gbp"));
    }

    #[test]
    fn test_from_reader_rejects_non_positive() {
        let data = "Currency,PerBaseUnit\nEUR,0.92\nGBP,0\n";
        let err = FixedRateConverter::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidEntry { row: 2, .. }));
    }

    #[test]
    fn test_load_shipped_table() {
        let fx = FixedRateConverter::from_dir(Path::new(crate::rates::DEFAULT_RATES_PATH))
            .expect("Failed to load data/rates/currency_rates.csv");
        let builtin = FixedRateConverter::default_rates();

        for code in ["USD", "EUR", "GBP", "INR", "JPY", "CAD", "AUD"] {
            assert_eq!(fx.convert(1.0, "USD", code), builtin.convert(1.0, "USD", code));
        }
    }
}
