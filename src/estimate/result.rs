//! Estimate output structures

use super::factors::Adjustment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recorded step of the price calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedFactor {
    #[serde(rename = "name")]
    pub adjustment: Adjustment,

    /// Amount added for addends, multiplier otherwise
    pub value: f64,
}

impl AppliedFactor {
    pub fn new(adjustment: Adjustment, value: f64) -> Self {
        Self { adjustment, value }
    }

    /// Apply this step to a running total
    pub fn apply(&self, total: f64) -> f64 {
        if self.adjustment.is_addend() {
            total + self.value
        } else {
            total * self.value
        }
    }
}

/// Complete estimate for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    /// Base price of the rate plan the estimate started from
    pub base_price: f64,

    /// Every adjustment in application order, including no-ops
    pub applied_factors: Vec<AppliedFactor>,

    /// Total before rounding
    pub unrounded_total: f64,

    /// Total rounded to the nearest whole currency unit
    pub total_price: f64,

    /// Running time of the quoted footage
    pub footage_seconds: f64,

    pub delivery_days: u64,

    pub issue_date: NaiveDate,

    pub estimated_delivery_date: NaiveDate,
}

impl EstimateResult {
    /// Value recorded for an adjustment, if it was applied
    pub fn factor(&self, adjustment: Adjustment) -> Option<f64> {
        self.applied_factors
            .iter()
            .find(|f| f.adjustment == adjustment)
            .map(|f| f.value)
    }

    /// Running total after each step, starting from the base price
    pub fn running_totals(&self) -> Vec<(AppliedFactor, f64)> {
        let mut total = self.base_price;
        self.applied_factors
            .iter()
            .map(|factor| {
                total = factor.apply(total);
                (*factor, total)
            })
            .collect()
    }

    /// Recompute the unrounded total by replaying the recorded factors
    pub fn replay(&self) -> f64 {
        self.applied_factors
            .iter()
            .fold(self.base_price, |total, factor| factor.apply(total))
    }

    /// Whether replaying the factors reproduces the quoted total within one unit
    pub fn reconstructs(&self) -> bool {
        (self.replay().round() - self.total_price).abs() <= 1.0
    }

    /// Breakdown figures for display
    pub fn summary(&self) -> QuoteSummary {
        let per_unit: f64 = self
            .applied_factors
            .iter()
            .filter(|f| f.adjustment.is_addend())
            .map(|f| f.value)
            .sum();

        let combined_multiplier: f64 = self
            .applied_factors
            .iter()
            .filter(|f| !f.adjustment.is_addend())
            .map(|f| f.value)
            .product();

        let discount_amount = self
            .running_totals()
            .windows(2)
            .find(|pair| pair[1].0.adjustment == Adjustment::VolumeDiscount)
            .map(|pair| pair[0].1 - pair[1].1)
            .unwrap_or(0.0);

        QuoteSummary {
            base_price: self.base_price,
            per_unit_charge: per_unit,
            subtotal: self.base_price + per_unit,
            combined_multiplier,
            discount_amount,
            total_price: self.total_price,
            footage_seconds: self.footage_seconds,
            delivery_days: self.delivery_days,
            estimated_delivery_date: self.estimated_delivery_date,
        }
    }
}

/// Summary figures for a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub base_price: f64,
    pub per_unit_charge: f64,
    /// Base price plus per-unit charge, before any multiplier
    pub subtotal: f64,
    /// Product of every multiplicative factor, discount included
    pub combined_multiplier: f64,
    /// Amount taken off by the volume discount
    pub discount_amount: f64,
    pub total_price: f64,
    pub footage_seconds: f64,
    pub delivery_days: u64,
    pub estimated_delivery_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> EstimateResult {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        EstimateResult {
            base_price: 1_000.0,
            applied_factors: vec![
                AppliedFactor::new(Adjustment::PerUnit, 500.0),
                AppliedFactor::new(Adjustment::Resolution, 2.0),
                AppliedFactor::new(Adjustment::VolumeDiscount, 0.9),
                AppliedFactor::new(Adjustment::ShotCount, 1.1),
            ],
            unrounded_total: 2_970.0,
            total_price: 2_970.0,
            footage_seconds: 10.0,
            delivery_days: 7,
            issue_date: date,
            estimated_delivery_date: date + chrono::Days::new(7),
        }
    }

    #[test]
    fn test_replay_and_running_totals() {
        let result = sample();
        assert_relative_eq!(result.replay(), 2_970.0, epsilon = 1e-9);
        assert!(result.reconstructs());

        let totals: Vec<f64> = result.running_totals().iter().map(|(_, t)| *t).collect();
        assert_relative_eq!(totals[0], 1_500.0);
        assert_relative_eq!(totals[1], 3_000.0);
        assert_relative_eq!(totals[2], 2_700.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tampered_factors_do_not_reconstruct() {
        let mut result = sample();
        result.applied_factors[1].value = 2.5;
        assert!(!result.reconstructs());
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.subtotal, 1_500.0);
        assert_eq!(summary.per_unit_charge, 500.0);
        assert_relative_eq!(summary.combined_multiplier, 2.0 * 0.9 * 1.1, epsilon = 1e-12);
        assert_relative_eq!(summary.discount_amount, 300.0, epsilon = 1e-9);
        assert_eq!(summary.delivery_days, 7);
    }

    #[test]
    fn test_factor_lookup() {
        let result = sample();
        assert_eq!(result.factor(Adjustment::Resolution), Some(2.0));
        assert_eq!(result.factor(Adjustment::Complexity), None);
    }

    #[test]
    fn test_serializes_factor_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["appliedFactors"][0]["name"], "perUnit");
        assert_eq!(json["appliedFactors"][2]["name"], "volumeDiscount");
        assert_eq!(json["totalPrice"], 2970.0);
        assert_eq!(json["estimatedDeliveryDate"], "2026-10-23");
    }
}
