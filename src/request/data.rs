//! Estimate request parameters and their class enums

use crate::error::{QuoteError, QuoteResult};
use crate::rates::{ServiceType, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `Display`, and label parsing for a class enum.
/// Extra aliases are accepted on parse but never emitted.
macro_rules! class_labels {
    (
        $ty:ident,
        $field:literal,
        { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }
    ) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = QuoteError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($label $(| $alias)* => Ok($ty::$variant),)+
                    other => Err(QuoteError::invalid(
                        $field,
                        format!("unknown value '{}'", other),
                    )),
                }
            }
        }
    };
}

/// Output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionClass {
    /// HD
    Low,
    /// 2K
    Standard,
    /// 4K
    High,
    /// 8K
    Ultra,
}

class_labels!(ResolutionClass, "resolution", {
    Low => "low" | "hd" | "HD",
    Standard => "standard" | "2k" | "2K",
    High => "high" | "4k" | "4K",
    Ultra => "ultra" | "8k" | "8K",
});

impl ResolutionClass {
    /// Marketing label shown next to the class
    pub fn display_name(&self) -> &'static str {
        match self {
            ResolutionClass::Low => "HD",
            ResolutionClass::Standard => "2K",
            ResolutionClass::High => "4K",
            ResolutionClass::Ultra => "8K",
        }
    }
}

/// Requested turnaround
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliverySpeed {
    Standard,
    Expedited,
    Rush,
}

class_labels!(DeliverySpeed, "deliverySpeed", {
    Standard => "standard",
    Expedited => "expedited",
    Rush => "rush",
});

/// Creative and technical difficulty of the shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplexityClass {
    Low,
    Medium,
    High,
    VeryHigh,
}

class_labels!(ComplexityClass, "complexity", {
    Low => "low",
    Medium => "medium",
    High => "high",
    VeryHigh => "veryHigh",
});

/// Optional work that multiplies the price when requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub three_d: bool,
    pub matte_painting: bool,
    pub character_animation: bool,
    pub ai_assist: bool,
}

/// Parameters for a single estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Number of frames
    pub unit_count: u32,

    /// Frame rate
    pub units_per_second: f64,

    /// Number of distinct shots
    pub shot_count: u32,

    pub resolution: ResolutionClass,

    pub delivery_speed: DeliverySpeed,

    pub complexity: ComplexityClass,

    /// Review rounds included in the quote (2 is the baseline)
    pub revision_rounds: u32,

    #[serde(default)]
    pub features: FeatureFlags,

    /// Number of deliverable formats
    pub output_format_count: u32,
}

impl Default for EstimateRequest {
    fn default() -> Self {
        Self {
            unit_count: 1,
            units_per_second: 24.0,
            shot_count: 1,
            resolution: ResolutionClass::Standard,
            delivery_speed: DeliverySpeed::Standard,
            complexity: ComplexityClass::Medium,
            revision_rounds: 2,
            features: FeatureFlags::default(),
            output_format_count: 1,
        }
    }
}

impl EstimateRequest {
    /// Create a request for the given footage with every class at its baseline
    pub fn new(unit_count: u32, shot_count: u32) -> Self {
        Self {
            unit_count,
            shot_count,
            ..Self::default()
        }
    }

    /// Check integer ranges and the frame rate
    pub fn validate(&self) -> QuoteResult<()> {
        fn at_least_one(field: &'static str, value: u32) -> QuoteResult<()> {
            if value < 1 {
                let reason = format!("must be at least 1, got {}", value);
                return Err(QuoteError::invalid(field, reason));
            }
            Ok(())
        }

        at_least_one("unitCount", self.unit_count)?;
        at_least_one("shotCount", self.shot_count)?;
        at_least_one("revisionRounds", self.revision_rounds)?;
        at_least_one("outputFormatCount", self.output_format_count)?;

        if !self.units_per_second.is_finite() || self.units_per_second <= 0.0 {
            return Err(QuoteError::invalid(
                "unitsPerSecond",
                format!("must be > 0, got {}", self.units_per_second),
            ));
        }

        Ok(())
    }

    /// Running time of the footage in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.unit_count as f64 / self.units_per_second
    }
}

/// A request tagged with its rate plan, as read from a batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub quote_id: String,
    pub service: ServiceType,
    pub tier: Tier,
    pub request: EstimateRequest,
}
