//! Quote runner for single and batch estimates
//!
//! Loads the rate table once, then prices any number of requests against it
//! without re-reading CSV files.

use crate::error::{LoadError, QuoteResult};
use crate::estimate::{estimate, EstimateResult};
use crate::rates::{self, RateEntry, RateTable, ServiceType, Tier};
use crate::request::{EstimateRequest, QuoteRequest};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::Path;

/// Outcome for one row of a batch
#[derive(Debug, Clone)]
pub struct BatchQuote {
    pub quote_id: String,
    pub service: ServiceType,
    pub tier: Tier,
    pub result: QuoteResult<EstimateResult>,
}

/// Pre-loaded rate table with convenience entry points
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_csv()?;
/// let request = EstimateRequest::new(1000, 10);
/// let result = runner.quote(ServiceType::Vfx, Tier::Standard, &request, today)?;
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    rates: RateTable,
}

impl QuoteRunner {
    /// Create runner with the built-in rate card
    pub fn new() -> Self {
        Self {
            rates: RateTable::default_rates(),
        }
    }

    /// Create runner by loading the rate card from the default location
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self {
            rates: rates::load_default_rates()?,
        })
    }

    /// Create runner from a specific rates directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            rates: rates::load_rate_table(path)?,
        })
    }

    /// Create runner with a pre-built table
    pub fn with_rates(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn lookup_rate(&self, service: ServiceType, tier: Tier) -> QuoteResult<RateEntry> {
        self.rates.lookup(service, tier)
    }

    /// Resolve the rate plan and estimate a single request
    pub fn quote(
        &self,
        service: ServiceType,
        tier: Tier,
        request: &EstimateRequest,
        issue_date: NaiveDate,
    ) -> QuoteResult<EstimateResult> {
        let rate = self.rates.lookup(service, tier)?;
        estimate(request, &rate, issue_date)
    }

    /// Estimate a batch in parallel, preserving input order.
    /// Each row succeeds or fails on its own.
    pub fn run_batch(&self, requests: &[QuoteRequest], issue_date: NaiveDate) -> Vec<BatchQuote> {
        let quotes: Vec<BatchQuote> = requests
            .par_iter()
            .map(|row| BatchQuote {
                quote_id: row.quote_id.clone(),
                service: row.service,
                tier: row.tier,
                result: self.quote(row.service, row.tier, &row.request, issue_date),
            })
            .collect();

        let failed = quotes.iter().filter(|q| q.result.is_err()).count();
        if failed > 0 {
            log::warn!("{} of {} quotes failed", failed, quotes.len());
        }
        quotes
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::request::load_requests;

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn row(id: &str, service: ServiceType, tier: Tier, request: EstimateRequest) -> QuoteRequest {
        QuoteRequest {
            quote_id: id.to_string(),
            service,
            tier,
            request,
        }
    }

    #[test]
    fn test_quote_reference_plan() {
        let runner = QuoteRunner::new();
        let result = runner
            .quote(ServiceType::Vfx, Tier::Standard, &EstimateRequest::new(1000, 10), issue_date())
            .unwrap();
        assert_eq!(result.total_price, 100_808.0);
    }

    #[test]
    fn test_missing_plan_has_no_fallback() {
        let runner = QuoteRunner::with_rates(RateTable::from_entries([(
            ServiceType::Vfx,
            Tier::Standard,
            RateEntry::new(25_000.0, 50.0, 100, 0.15, 14),
        )]));

        let err = runner
            .quote(ServiceType::Vfx, Tier::Premium, &EstimateRequest::new(1000, 10), issue_date())
            .unwrap_err();
        assert_eq!(
            err,
            QuoteError::UnknownRatePlan {
                service: ServiceType::Vfx,
                tier: Tier::Premium,
            }
        );
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let runner = QuoteRunner::new();
        let requests: Vec<QuoteRequest> = (1..=50)
            .map(|i| {
                let request = EstimateRequest::new(if i == 25 { 0 } else { i * 100 }, i);
                row(&format!("Q-{}", i), ServiceType::Vfx, Tier::Standard, request)
            })
            .collect();

        let quotes = runner.run_batch(&requests, issue_date());
        assert_eq!(quotes.len(), 50);

        for (i, quote) in quotes.iter().enumerate() {
            assert_eq!(quote.quote_id, format!("Q-{}", i + 1));
            if i + 1 == 25 {
                assert!(matches!(quote.result, Err(QuoteError::InvalidParameter { .. })));
            } else {
                let expected = runner
                    .quote(ServiceType::Vfx, Tier::Standard, &requests[i].request, issue_date())
                    .unwrap();
                assert_eq!(quote.result.as_ref().unwrap(), &expected);
            }
        }
    }

    #[test]
    fn test_sample_batch_against_shipped_rates() {
        let runner = QuoteRunner::from_csv().expect("Failed to load rate table");
        let requests =
            load_requests("data/quotes/sample_requests.csv").expect("Failed to load requests");

        let quotes = runner.run_batch(&requests, issue_date());
        assert_eq!(quotes.len(), requests.len());
        for quote in &quotes {
            let result = quote.result.as_ref().expect("sample quote failed");
            assert!(result.total_price > 0.0);
            assert!(result.reconstructs());
        }
        assert_eq!(quotes[0].result.as_ref().unwrap().total_price, 100_808.0);
    }
}
