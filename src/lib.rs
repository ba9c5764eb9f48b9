//! # Retail Activity Engine
//!
//! A library for rolling up retail point-of-sale activity (sales, purchases,
//! expenses, product and customer registrations) into the period-aware
//! metrics behind a back-office dashboard.
//!
//! ## Core Concepts
//!
//! - **Calendar date**: every comparison happens on a year/month/day triple
//!   (`chrono::NaiveDate`); time-of-day and time zones are stripped at the
//!   ingestion boundary and never participate in filtering
//! - **Period**: a named token (`today`, `week`, `month`, ...) or explicit
//!   range, resolved against an explicit reference date into an inclusive
//!   interval, or the unbounded sentinel that admits everything
//! - **Scope**: an optional register/cashbox id narrowing the rollup to one
//!   physical point of sale
//! - **Fail-closed filtering**: a record whose date cannot be normalized is
//!   excluded from any bounded period, so malformed legacy data cannot
//!   pollute financial totals
//!
//! The engine is pure and synchronous: collections are already in memory,
//! nothing reads the clock, nothing is mutated, and recomputing with the
//! same inputs yields the same report.
//!
//! ## Example
//!
//! ```rust,ignore
//! use retail_activity_engine::*;
//! use chrono::NaiveDate;
//!
//! let data = activity_from_json(&payload_from_backend)?;
//! let query = ActivityQuery {
//!     period: PeriodSpec::from_token("month")?,
//!     scope: Some(1),
//!     opening_cash: Some("1000.00".parse().unwrap()),
//!     today: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
//! };
//!
//! let report = run_activity_report(&data, &query);
//! println!("sales: {} ({})", report.total_sales, report.sales_trend);
//! ```

pub mod date;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod metrics;
pub mod period;
pub mod records;
pub mod trend;
pub mod utils;

pub use date::normalize;
pub use error::{ActivityError, Result};
pub use filter::{filter_by_period, filter_records};
pub use ingestion::{activity_from_json, convert_payload, RawActivityPayload};
pub use metrics::{ActivityAggregator, ActivityReport, DailyTotal, FilteredActivity};
pub use period::{DateRange, Period, PeriodSpec, PeriodToken};
pub use records::{ActivityData, Customer, Product, ScopeId, Transaction};
pub use trend::trend;

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything a query cycle needs, supplied by the caller as plain values.
///
/// `today` is captured once per cycle and threaded through every component,
/// so repeated calls within one cycle observe a single reference date even
/// across a midnight boundary. The engine itself never reads the clock.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActivityQuery {
    #[serde(default)]
    pub period: PeriodSpec,

    /// Narrow the rollup to one register/cashbox.
    #[serde(default)]
    pub scope: Option<ScopeId>,

    /// Opening cash of the selected register; enables the `balance` field.
    #[serde(default)]
    pub opening_cash: Option<Decimal>,

    /// Reference date for all named-token resolution and trend windows.
    pub today: NaiveDate,
}

pub struct ActivityProcessor;

impl ActivityProcessor {
    pub fn process(data: &ActivityData, query: &ActivityQuery) -> ActivityReport {
        info!(
            "Aggregating activity as of {} (scope: {:?})",
            query.today, query.scope
        );
        debug!(
            "Input collections: {} sales, {} purchases, {} expenses, {} products, {} customers",
            data.sales.len(),
            data.purchases.len(),
            data.expenses.len(),
            data.products.len(),
            data.customers.len()
        );

        let aggregator = ActivityAggregator::new(query.today);
        let report = aggregator.aggregate(data, &query.period, query.scope, query.opening_cash);

        debug!(
            "Resolved period {:?}: {} sales totaling {}",
            report.period, report.sales_count, report.total_sales
        );

        report
    }
}

pub fn run_activity_report(data: &ActivityData, query: &ActivityQuery) -> ActivityReport {
    ActivityProcessor::process(data, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_to_end_month_report() {
        let data = ActivityData {
            sales: vec![
                Transaction::new(Decimal::from_str("100.00").unwrap(), date(2024, 5, 1)),
                Transaction::new(Decimal::from_str("50.00").unwrap(), date(2024, 5, 2)),
            ],
            ..ActivityData::default()
        };
        let query = ActivityQuery {
            period: PeriodSpec::from_token("month").unwrap(),
            scope: None,
            opening_cash: None,
            today: date(2024, 5, 10),
        };

        let report = run_activity_report(&data, &query);
        assert_eq!(report.total_sales, Decimal::from_str("150.00").unwrap());
        assert_eq!(report.sales_count, 2);
    }

    #[test]
    fn test_recomputation_is_bit_identical() {
        let data = activity_from_json(
            r#"{
                "ventas": [
                    {"monto": "100.00", "fecha": "2024-05-01", "caja": 1},
                    {"monto": "oops", "fecha": "2024-05-02", "caja": 1}
                ],
                "gastos": [{"monto": "10.00", "fecha": "2024-05-02"}]
            }"#,
        )
        .unwrap();
        let query = ActivityQuery {
            period: PeriodSpec::Named(PeriodToken::Month),
            scope: None,
            opening_cash: Some(Decimal::from_str("1000").unwrap()),
            today: date(2024, 5, 10),
        };

        let first = run_activity_report(&data, &query);
        let second = run_activity_report(&data, &query);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_query_deserializes_from_plain_json() {
        let query: ActivityQuery = serde_json::from_str(
            r#"{"period": "week", "scope": 2, "today": "2024-05-10"}"#,
        )
        .unwrap();
        assert_eq!(query.period, PeriodSpec::Named(PeriodToken::Week));
        assert_eq!(query.scope, Some(2));
        assert_eq!(query.opening_cash, None);
    }
}
