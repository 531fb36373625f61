//! Service/tier keys, rate entries, and the rate table itself

use crate::error::{QuoteError, QuoteResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Line of business being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    /// Shot-based visual effects work
    Vfx,
    /// Creative direction and concept work (flat fee)
    Creative,
    /// Colour grading and conform
    DigitalIntermediate,
    /// R&D and pipeline tooling (flat fee)
    TechInnovation,
    /// End-to-end production
    FullProduction,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Vfx,
        ServiceType::Creative,
        ServiceType::DigitalIntermediate,
        ServiceType::TechInnovation,
        ServiceType::FullProduction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Vfx => "vfx",
            ServiceType::Creative => "creative",
            ServiceType::DigitalIntermediate => "digitalIntermediate",
            ServiceType::TechInnovation => "techInnovation",
            ServiceType::FullProduction => "fullProduction",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s.trim())
            .ok_or_else(|| {
                QuoteError::invalid("serviceType", format!("unknown service type '{}'", s))
            })
    }
}

/// Pricing tier within a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Standard,
    Premium,
    /// Work delivered through partner studios
    Outsourced,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Standard, Tier::Premium, Tier::Outsourced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
            Tier::Outsourced => "outsourced",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s.trim())
            .ok_or_else(|| QuoteError::invalid("tier", format!("unknown tier '{}'", s)))
    }
}

/// Pricing terms for one (service, tier) combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Fixed fee charged regardless of volume
    pub base_price: f64,

    /// Price per frame (0 = flat-fee service)
    pub price_per_unit: f64,

    /// Anchor for the volume discount threshold
    pub minimum_units: u32,

    /// Upper bound on the volume discount, as a fraction
    pub maximum_discount_fraction: f64,

    /// Turnaround in calendar days before any adjustment
    pub standard_delivery_days: u32,
}

impl RateEntry {
    pub fn new(
        base_price: f64,
        price_per_unit: f64,
        minimum_units: u32,
        maximum_discount_fraction: f64,
        standard_delivery_days: u32,
    ) -> Self {
        Self {
            base_price,
            price_per_unit,
            minimum_units,
            maximum_discount_fraction,
            standard_delivery_days,
        }
    }

    /// Whether the service is billed per unit or as a flat fee
    pub fn is_flat_fee(&self) -> bool {
        self.price_per_unit == 0.0
    }

    /// Check value ranges, returning a description of the first violation
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(format!("base price must be >= 0, got {}", self.base_price));
        }
        if !self.price_per_unit.is_finite() || self.price_per_unit < 0.0 {
            return Err(format!("price per unit must be >= 0, got {}", self.price_per_unit));
        }
        if !(0.0..=1.0).contains(&self.maximum_discount_fraction) {
            return Err(format!(
                "maximum discount must be within 0..=1, got {}",
                self.maximum_discount_fraction
            ));
        }
        if self.standard_delivery_days == 0 {
            return Err("standard delivery days must be > 0".to_string());
        }
        Ok(())
    }
}

/// Immutable lookup of (service, tier) to rate entry
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    entries: HashMap<(ServiceType, Tier), RateEntry>,
}

impl RateTable {
    /// Build from pre-validated entries; later duplicates replace earlier ones
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ServiceType, Tier, RateEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(service, tier, entry)| ((service, tier), entry))
                .collect(),
        }
    }

    /// Published rate card, identical to data/rates/rate_table.csv
    pub fn default_rates() -> Self {
        use ServiceType::*;
        use Tier::*;

        Self::from_entries([
            (Vfx, Standard, RateEntry::new(25_000.0, 50.0, 100, 0.15, 14)),
            (Vfx, Premium, RateEntry::new(45_000.0, 85.0, 100, 0.12, 21)),
            (Vfx, Outsourced, RateEntry::new(15_000.0, 30.0, 200, 0.20, 10)),
            (Creative, Standard, RateEntry::new(15_000.0, 0.0, 0, 0.0, 10)),
            (Creative, Premium, RateEntry::new(30_000.0, 0.0, 0, 0.0, 14)),
            (Creative, Outsourced, RateEntry::new(8_000.0, 0.0, 0, 0.0, 7)),
            (DigitalIntermediate, Standard, RateEntry::new(12_000.0, 8.0, 500, 0.20, 7)),
            (DigitalIntermediate, Premium, RateEntry::new(22_000.0, 15.0, 500, 0.15, 10)),
            (DigitalIntermediate, Outsourced, RateEntry::new(7_000.0, 5.0, 1_000, 0.25, 5)),
            (TechInnovation, Standard, RateEntry::new(35_000.0, 0.0, 0, 0.0, 30)),
            (TechInnovation, Premium, RateEntry::new(60_000.0, 0.0, 0, 0.0, 45)),
            (TechInnovation, Outsourced, RateEntry::new(20_000.0, 0.0, 0, 0.0, 21)),
            (FullProduction, Standard, RateEntry::new(120_000.0, 40.0, 1_000, 0.20, 60)),
            (FullProduction, Premium, RateEntry::new(250_000.0, 70.0, 1_000, 0.15, 90)),
            (FullProduction, Outsourced, RateEntry::new(80_000.0, 25.0, 2_000, 0.25, 45)),
        ])
    }

    /// Look up the rate entry for a service and tier
    pub fn lookup(&self, service: ServiceType, tier: Tier) -> QuoteResult<RateEntry> {
        self.entries
            .get(&(service, tier))
            .copied()
            .ok_or(QuoteError::UnknownRatePlan { service, tier })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All defined plans, sorted by service then tier
    pub fn plans(&self) -> Vec<(ServiceType, Tier, RateEntry)> {
        let mut plans: Vec<_> = self
            .entries
            .iter()
            .map(|(&(service, tier), &entry)| (service, tier, entry))
            .collect();
        plans.sort_by_key(|(service, tier, _)| (*service, *tier));
        plans
    }
}
