//! Price adjustment factors, in the order the engine applies them

use crate::rates::RateEntry;
use crate::request::{ComplexityClass, DeliverySpeed, FeatureFlags, ResolutionClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier for 3D elements
pub const THREE_D_FACTOR: f64 = 1.20;
/// Multiplier for matte painting
pub const MATTE_PAINTING_FACTOR: f64 = 1.15;
/// Multiplier for character animation
pub const CHARACTER_ANIMATION_FACTOR: f64 = 1.25;
/// Multiplier for AI-assisted work
pub const AI_ASSIST_FACTOR: f64 = 1.10;

/// Surcharge per deliverable format beyond the first
pub const OUTPUT_FORMAT_STEP: f64 = 0.05;
/// Additional formats beyond which the surcharge stops growing
pub const MAX_EXTRA_OUTPUT_FORMATS: u32 = 3;

/// Revision rounds included at no charge
pub const BASELINE_REVISION_ROUNDS: u32 = 2;
/// Surcharge per revision round beyond the baseline
pub const REVISION_STEP: f64 = 0.10;

/// Frames over the minimum at which the full discount is reached
pub const VOLUME_DISCOUNT_SCALE: f64 = 10_000.0;

/// Surcharge per shot beyond the first
pub const SHOT_STEP: f64 = 0.01;
/// Cap on the shot surcharge
pub const MAX_SHOT_SURCHARGE: f64 = 0.30;

/// One step of the price calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Adjustment {
    /// Per-frame charge added to the base price
    PerUnit,
    Resolution,
    DeliverySpeed,
    Complexity,
    ThreeD,
    MattePainting,
    CharacterAnimation,
    AiAssist,
    OutputFormats,
    Revisions,
    VolumeDiscount,
    ShotCount,
}

impl Adjustment {
    pub fn name(&self) -> &'static str {
        match self {
            Adjustment::PerUnit => "perUnit",
            Adjustment::Resolution => "resolution",
            Adjustment::DeliverySpeed => "deliverySpeed",
            Adjustment::Complexity => "complexity",
            Adjustment::ThreeD => "threeD",
            Adjustment::MattePainting => "mattePainting",
            Adjustment::CharacterAnimation => "characterAnimation",
            Adjustment::AiAssist => "aiAssist",
            Adjustment::OutputFormats => "outputFormats",
            Adjustment::Revisions => "revisions",
            Adjustment::VolumeDiscount => "volumeDiscount",
            Adjustment::ShotCount => "shotCount",
        }
    }

    /// Addends are summed into the running total; everything else multiplies it
    pub fn is_addend(&self) -> bool {
        matches!(self, Adjustment::PerUnit)
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// HD / 2K / 4K / 8K
pub fn resolution_factor(resolution: ResolutionClass) -> f64 {
    match resolution {
        ResolutionClass::Low => 1.0,
        ResolutionClass::Standard => 1.25,
        ResolutionClass::High => 1.5,
        ResolutionClass::Ultra => 2.0,
    }
}

pub fn delivery_speed_factor(speed: DeliverySpeed) -> f64 {
    match speed {
        DeliverySpeed::Standard => 1.0,
        DeliverySpeed::Expedited => 1.25,
        DeliverySpeed::Rush => 1.5,
    }
}

pub fn complexity_factor(complexity: ComplexityClass) -> f64 {
    match complexity {
        ComplexityClass::Low => 0.85,
        ComplexityClass::Medium => 1.0,
        ComplexityClass::High => 1.3,
        ComplexityClass::VeryHigh => 1.5,
    }
}

/// Multipliers for the optional features; 1.0 where the flag is unset
pub fn feature_factors(features: &FeatureFlags) -> [(Adjustment, f64); 4] {
    let factor = |set: bool, value: f64| if set { value } else { 1.0 };

    [
        (Adjustment::ThreeD, factor(features.three_d, THREE_D_FACTOR)),
        (Adjustment::MattePainting, factor(features.matte_painting, MATTE_PAINTING_FACTOR)),
        (
            Adjustment::CharacterAnimation,
            factor(features.character_animation, CHARACTER_ANIMATION_FACTOR),
        ),
        (Adjustment::AiAssist, factor(features.ai_assist, AI_ASSIST_FACTOR)),
    ]
}

/// 5% per format beyond the first, capped at +15%
pub fn output_format_factor(output_format_count: u32) -> f64 {
    let extra = output_format_count.saturating_sub(1).min(MAX_EXTRA_OUTPUT_FORMATS);
    1.0 + extra as f64 * OUTPUT_FORMAT_STEP
}

/// 10% per round beyond two; fewer rounds never discount
pub fn revision_factor(revision_rounds: u32) -> f64 {
    let delta = revision_rounds as f64 - BASELINE_REVISION_ROUNDS as f64;
    (1.0 + delta * REVISION_STEP).max(1.0)
}

/// Discount fraction for the frame count, zero at or below twice the minimum
pub fn volume_discount_fraction(unit_count: u32, rate: &RateEntry) -> f64 {
    let minimum = rate.minimum_units as u64;
    let units = unit_count as u64;

    if units <= minimum * 2 {
        return 0.0;
    }

    let max = rate.maximum_discount_fraction;
    ((units - minimum) as f64 / VOLUME_DISCOUNT_SCALE * max).min(max)
}

/// 1% per shot beyond the first, capped at +30%
pub fn shot_count_factor(shot_count: u32) -> f64 {
    if shot_count <= 1 {
        return 1.0;
    }
    1.0 + ((shot_count - 1) as f64 * SHOT_STEP).min(MAX_SHOT_SURCHARGE)
}
