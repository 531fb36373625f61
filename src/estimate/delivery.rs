//! Delivery-day derivation
//!
//! Turnaround is scaled independently of price. Each step rounds up to whole
//! days, and the ratios are applied as exact integer fractions so the result
//! never depends on how a decimal ratio rounds in binary.

use crate::error::{QuoteError, QuoteResult};
use crate::request::{ComplexityClass, DeliverySpeed, EstimateRequest};
use chrono::{Days, NaiveDate};

/// Frames per unit of schedule scale
pub const FRAMES_PER_SCALE_STEP: u64 = 1_000;
/// Shots per unit of schedule scale
pub const SHOTS_PER_SCALE_STEP: u64 = 10;

/// Schedule ratio for the delivery speed, as (numerator, denominator)
fn speed_ratio(speed: DeliverySpeed) -> (u128, u128) {
    match speed {
        DeliverySpeed::Standard => (1, 1),
        DeliverySpeed::Expedited => (7, 10),
        DeliverySpeed::Rush => (5, 10),
    }
}

/// Schedule ratio for the complexity class, as (numerator, denominator)
fn complexity_ratio(complexity: ComplexityClass) -> (u128, u128) {
    match complexity {
        ComplexityClass::Low | ComplexityClass::Medium => (1, 1),
        ComplexityClass::High => (12, 10),
        ComplexityClass::VeryHigh => (14, 10),
    }
}

/// Scale ratio `max(1, frames / 1000, shots / 10)` over a common denominator
fn scale_ratio(unit_count: u32, shot_count: u32) -> (u128, u128) {
    let denominator = FRAMES_PER_SCALE_STEP as u128;
    let by_frames = unit_count as u128;
    let by_shots = shot_count as u128 * (FRAMES_PER_SCALE_STEP / SHOTS_PER_SCALE_STEP) as u128;

    (denominator.max(by_frames).max(by_shots), denominator)
}

fn ceil_scaled(days: u128, (numerator, denominator): (u128, u128)) -> u128 {
    (days * numerator).div_ceil(denominator)
}

/// Adjusted turnaround in calendar days
pub fn delivery_days(request: &EstimateRequest, standard_delivery_days: u32) -> u64 {
    let mut days = standard_delivery_days as u128;

    days = ceil_scaled(days, speed_ratio(request.delivery_speed));
    days = ceil_scaled(days, complexity_ratio(request.complexity));
    days = ceil_scaled(days, scale_ratio(request.unit_count, request.shot_count));

    log::trace!(
        "delivery: {} standard days -> {} days ({} / {}, {} frames, {} shots)",
        standard_delivery_days,
        days,
        request.delivery_speed,
        request.complexity,
        request.unit_count,
        request.shot_count
    );

    // At most u32::MAX * 1.4 * (u32::MAX / 10), which fits in u64
    days as u64
}

/// Calendar date `days` after the issue date, with no business-day logic
pub fn delivery_date(issue_date: NaiveDate, days: u64) -> QuoteResult<NaiveDate> {
    issue_date.checked_add_days(Days::new(days)).ok_or_else(|| {
        QuoteError::invalid(
            "deliveryDays",
            format!("delivery {} days after {} is outside the calendar range", days, issue_date),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        speed: DeliverySpeed,
        complexity: ComplexityClass,
        frames: u32,
        shots: u32,
    ) -> EstimateRequest {
        EstimateRequest {
            unit_count: frames,
            shot_count: shots,
            delivery_speed: speed,
            complexity,
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_schedule_unchanged() {
        let req = request(DeliverySpeed::Standard, ComplexityClass::Medium, 1000, 10);
        assert_eq!(delivery_days(&req, 14), 14);
    }

    #[test]
    fn test_speed_rounds_up() {
        let expedited = request(DeliverySpeed::Expedited, ComplexityClass::Medium, 100, 1);
        assert_eq!(delivery_days(&expedited, 14), 10); // 9.8
        assert_eq!(delivery_days(&expedited, 10), 7);

        let rush = request(DeliverySpeed::Rush, ComplexityClass::Low, 100, 1);
        assert_eq!(delivery_days(&rush, 7), 4); // 3.5
    }

    #[test]
    fn test_complexity_applies_after_speed() {
        // ceil(ceil(21 * 0.5) * 1.4) = ceil(11 * 1.4) = 16
        let req = request(DeliverySpeed::Rush, ComplexityClass::VeryHigh, 100, 1);
        assert_eq!(delivery_days(&req, 21), 16);

        let high = request(DeliverySpeed::Standard, ComplexityClass::High, 100, 1);
        assert_eq!(delivery_days(&high, 14), 17); // 16.8
    }

    #[test]
    fn test_scale_by_frames_and_shots() {
        let frames = request(DeliverySpeed::Standard, ComplexityClass::Medium, 1500, 1);
        assert_eq!(delivery_days(&frames, 14), 21);

        let shots = request(DeliverySpeed::Standard, ComplexityClass::Medium, 100, 25);
        assert_eq!(delivery_days(&shots, 14), 35);

        // Larger of the two wins
        let both = request(DeliverySpeed::Standard, ComplexityClass::Medium, 3000, 25);
        assert_eq!(delivery_days(&both, 14), 42);

        // Small jobs never shrink below the standard schedule
        let small = request(DeliverySpeed::Standard, ComplexityClass::Medium, 1, 1);
        assert_eq!(delivery_days(&small, 14), 14);
    }

    #[test]
    fn test_scale_is_exact_fraction() {
        // 15 * 16.6 is 249.00000000000003 in f64
        let req = request(DeliverySpeed::Standard, ComplexityClass::Medium, 16_600, 1);
        assert_eq!(delivery_days(&req, 15), 249);
    }

    #[test]
    fn test_delivery_date() {
        let issued = NaiveDate::from_ymd_opt(2026, 12, 20).unwrap();
        assert_eq!(
            delivery_date(issued, 14).unwrap(),
            NaiveDate::from_ymd_opt(2027, 1, 3).unwrap()
        );
        let err = delivery_date(issued, u64::MAX).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidParameter { field: "deliveryDays", .. }));
    }
}
