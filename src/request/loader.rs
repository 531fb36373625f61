//! Load batches of quote requests from CSV

use super::{
    ComplexityClass, DeliverySpeed, EstimateRequest, FeatureFlags, QuoteRequest, ResolutionClass,
};
use crate::error::{LoadError, QuoteError};
use csv::Reader;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the quote request file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "QuoteID")]
    quote_id: String,
    #[serde(rename = "ServiceType")]
    service_type: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Frames")]
    frames: u32,
    #[serde(rename = "FrameRate")]
    frame_rate: f64,
    #[serde(rename = "Shots")]
    shots: u32,
    #[serde(rename = "Resolution")]
    resolution: String,
    #[serde(rename = "DeliverySpeed")]
    delivery_speed: String,
    #[serde(rename = "Complexity")]
    complexity: String,
    #[serde(rename = "Revisions")]
    revisions: u32,
    #[serde(rename = "ThreeD", default)]
    three_d: bool,
    #[serde(rename = "MattePainting", default)]
    matte_painting: bool,
    #[serde(rename = "CharacterAnimation", default)]
    character_animation: bool,
    #[serde(rename = "AiAssist", default)]
    ai_assist: bool,
    #[serde(rename = "OutputFormats")]
    output_formats: u32,
}

impl CsvRow {
    fn to_quote_request(self) -> Result<QuoteRequest, QuoteError> {
        let request = EstimateRequest {
            unit_count: self.frames,
            units_per_second: self.frame_rate,
            shot_count: self.shots,
            resolution: self.resolution.parse::<ResolutionClass>()?,
            delivery_speed: self.delivery_speed.parse::<DeliverySpeed>()?,
            complexity: self.complexity.parse::<ComplexityClass>()?,
            revision_rounds: self.revisions,
            features: FeatureFlags {
                three_d: self.three_d,
                matte_painting: self.matte_painting,
                character_animation: self.character_animation,
                ai_assist: self.ai_assist,
            },
            output_format_count: self.output_formats,
        };

        Ok(QuoteRequest {
            quote_id: self.quote_id,
            service: self.service_type.parse()?,
            tier: self.tier.parse()?,
            request,
        })
    }
}

/// Load quote requests from any reader.
///
/// Only labels are checked here; range validation happens when each request
/// is estimated so one bad row does not sink a whole batch.
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<Vec<QuoteRequest>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let request = row
            .to_quote_request()
            .map_err(|source| LoadError::Row { row: idx + 1, source })?;
        requests.push(request);
    }

    Ok(requests)
}

/// Load quote requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<QuoteRequest>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_requests_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{ServiceType, Tier};

    const HEADER: &str = "QuoteID,ServiceType,Tier,Frames,FrameRate,Shots,Resolution,DeliverySpeed,\
Complexity,Revisions,ThreeD,MattePainting,CharacterAnimation,AiAssist,OutputFormats\n";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{}Q-1,vfx,standard,1000,24,10,standard,standard,medium,2,false,false,false,false,1\n\
             Q-2,fullProduction,premium,4800,25,40,4k,rush,veryHigh,4,true,false,true,false,3\n",
            HEADER
        );
        let requests = load_requests_from_reader(data.as_bytes()).unwrap();
        assert_eq!(requests.len(), 2);

        let first = &requests[0];
        assert_eq!(first.quote_id, "Q-1");
        assert_eq!(first.service, ServiceType::Vfx);
        assert_eq!(first.request, EstimateRequest::new(1000, 10));

        let second = &requests[1];
        assert_eq!(second.tier, Tier::Premium);
        assert_eq!(second.request.resolution, ResolutionClass::High);
        assert_eq!(second.request.delivery_speed, DeliverySpeed::Rush);
        assert!(second.request.features.three_d);
        assert!(second.request.features.character_animation);
        assert!(!second.request.features.ai_assist);
        assert_eq!(second.request.output_format_count, 3);
    }

    #[test]
    fn test_unknown_label_reports_row() {
        let data = format!(
            "{}Q-1,vfx,standard,1000,24,10,standard,standard,medium,2,false,false,false,false,1\n\
             Q-2,vfx,standard,1000,24,10,16k,standard,medium,2,false,false,false,false,1\n",
            HEADER
        );
        let err = load_requests_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::Row { row, source: QuoteError::InvalidParameter { field, .. } } => {
                assert_eq!(row, 2);
                assert_eq!(field, "resolution");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_counts_are_loaded() {
        let data = format!(
            "{}Q-1,vfx,standard,0,24,10,standard,standard,medium,2,false,false,false,false,1\n",
            HEADER
        );
        let requests = load_requests_from_reader(data.as_bytes()).unwrap();
        assert!(requests[0].request.validate().is_err());
    }

    #[test]
    fn test_load_sample_requests() {
        let requests = load_requests("data/quotes/sample_requests.csv")
            .expect("Failed to load sample requests");
        assert!(!requests.is_empty());
        assert_eq!(requests[0].quote_id, "VFX-001");
    }
}
