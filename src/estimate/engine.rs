//! Core estimation: price composition and delivery scheduling

use super::delivery::{delivery_date, delivery_days};
use super::factors::{
    complexity_factor, delivery_speed_factor, feature_factors, output_format_factor,
    resolution_factor, revision_factor, shot_count_factor, volume_discount_fraction, Adjustment,
};
use super::result::{AppliedFactor, EstimateResult};
use crate::error::{QuoteError, QuoteResult};
use crate::rates::RateEntry;
use crate::request::EstimateRequest;
use chrono::{Local, NaiveDate};

/// Accumulates the running total and records each step as it is applied
struct PriceBuilder {
    total: f64,
    applied: Vec<AppliedFactor>,
}

impl PriceBuilder {
    fn new(base_price: f64) -> Self {
        Self {
            total: base_price,
            applied: Vec::with_capacity(12),
        }
    }

    fn apply(&mut self, adjustment: Adjustment, value: f64) {
        let factor = AppliedFactor::new(adjustment, value);
        self.total = factor.apply(self.total);
        log::trace!("{:>18} {:>12.6} -> {:.4}", adjustment, value, self.total);
        self.applied.push(factor);
    }
}

/// Compose the price for a request against a rate entry.
///
/// Returns the unrounded total and the ordered list of applied factors.
pub fn price(
    request: &EstimateRequest,
    rate: &RateEntry,
) -> QuoteResult<(f64, Vec<AppliedFactor>)> {
    request.validate()?;
    rate.validate().map_err(|reason| QuoteError::invalid("rate", reason))?;

    let mut builder = PriceBuilder::new(rate.base_price);

    if rate.price_per_unit > 0.0 {
        builder.apply(Adjustment::PerUnit, rate.price_per_unit * request.unit_count as f64);
    }

    builder.apply(Adjustment::Resolution, resolution_factor(request.resolution));
    builder.apply(Adjustment::DeliverySpeed, delivery_speed_factor(request.delivery_speed));
    builder.apply(Adjustment::Complexity, complexity_factor(request.complexity));

    for (adjustment, value) in feature_factors(&request.features) {
        builder.apply(adjustment, value);
    }

    builder.apply(Adjustment::OutputFormats, output_format_factor(request.output_format_count));
    builder.apply(Adjustment::Revisions, revision_factor(request.revision_rounds));

    let discount = volume_discount_fraction(request.unit_count, rate);
    builder.apply(Adjustment::VolumeDiscount, 1.0 - discount);

    builder.apply(Adjustment::ShotCount, shot_count_factor(request.shot_count));

    Ok((builder.total, builder.applied))
}

/// Estimate price and delivery for a request issued on the given date
pub fn estimate(
    request: &EstimateRequest,
    rate: &RateEntry,
    issue_date: NaiveDate,
) -> QuoteResult<EstimateResult> {
    let (unrounded_total, applied_factors) = price(request, rate)?;

    let days = delivery_days(request, rate.standard_delivery_days);
    let estimated_delivery_date = delivery_date(issue_date, days)?;

    let result = EstimateResult {
        base_price: rate.base_price,
        applied_factors,
        unrounded_total,
        total_price: unrounded_total.round(),
        footage_seconds: request.duration_seconds(),
        delivery_days: days,
        issue_date,
        estimated_delivery_date,
    };

    log::debug!(
        "Estimate: {:.0} over {} days (delivery {})",
        result.total_price,
        result.delivery_days,
        result.estimated_delivery_date
    );

    Ok(result)
}

/// Estimate with today's local date as the issue date
pub fn estimate_today(request: &EstimateRequest, rate: &RateEntry) -> QuoteResult<EstimateResult> {
    estimate(request, rate, Local::now().date_naive())
}
