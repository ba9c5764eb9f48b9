//! The rollup layer: filtered collections in, one dashboard report out.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::{filter_by_period, filter_records};
use crate::period::{DateRange, Period, PeriodSpec};
use crate::records::{ActivityData, Customer, Product, ScopeId, Transaction};
use crate::trend::trend;

/// Borrowed views of the records admitted by a query, input order preserved.
/// Products and customers are matched on their registration date.
#[derive(Debug)]
pub struct FilteredActivity<'a> {
    pub sales: Vec<&'a Transaction>,
    pub purchases: Vec<&'a Transaction>,
    pub expenses: Vec<&'a Transaction>,
    pub products: Vec<&'a Product>,
    pub customers: Vec<&'a Customer>,
}

/// One day of sales, for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// The metrics consumed by the dashboard. Plain data, JSON-safe; amounts
/// serialize as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityReport {
    /// The resolved interval, or `None` when the query was unbounded.
    pub period: Option<DateRange>,

    pub total_sales: Decimal,
    pub sales_count: usize,
    /// Month-over-month sales movement, e.g. `"+12.5%"`.
    pub sales_trend: String,
    /// `total_sales / sales_count`, 0 when the period has no sales.
    pub average_sale: Decimal,

    pub total_purchases: Decimal,
    pub purchases_count: usize,

    pub total_expenses: Decimal,
    pub expenses_count: usize,
    pub expenses_trend: String,

    /// Products registered in the trailing seven days, independent of the
    /// requested period.
    pub new_products: usize,
    /// Customers registered in the trailing seven days, independent of the
    /// requested period.
    pub new_customers: usize,

    /// `total_sales - total_purchases - total_expenses`.
    pub profit: Decimal,
    /// `opening_cash + profit`; only present when opening cash was supplied
    /// for the selected register.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,

    /// Per-day sales totals inside the period, ascending by date. Sales
    /// without a normalized date (possible under the unbounded period) are
    /// part of `total_sales` but have no day to land on here.
    pub daily_sales: Vec<DailyTotal>,
}

/// Computes dashboard rollups for one query cycle.
///
/// Constructed with the cycle's reference date; every window (the requested
/// period, the month-over-month trend windows, the recency window) is
/// derived from that one value, so a batch of calls never observes two
/// different "now"s.
pub struct ActivityAggregator {
    today: NaiveDate,
}

impl ActivityAggregator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The filtered subsets backing the dashboard tables.
    pub fn select<'a>(
        &self,
        data: &'a ActivityData,
        period: &Period,
        scope: Option<ScopeId>,
    ) -> FilteredActivity<'a> {
        FilteredActivity {
            sales: filter_records(&data.sales, |t| t.occurred_on, period, |t| t.scope, scope),
            purchases: filter_records(
                &data.purchases,
                |t| t.occurred_on,
                period,
                |t| t.scope,
                scope,
            ),
            expenses: filter_records(
                &data.expenses,
                |t| t.occurred_on,
                period,
                |t| t.scope,
                scope,
            ),
            products: filter_by_period(&data.products, |p| p.created_on, period),
            customers: filter_by_period(&data.customers, |c| c.created_on, period),
        }
    }

    /// Resolves the period and produces the full metric set.
    pub fn aggregate(
        &self,
        data: &ActivityData,
        spec: &PeriodSpec,
        scope: Option<ScopeId>,
        opening_cash: Option<Decimal>,
    ) -> ActivityReport {
        let period = spec.resolve(self.today);
        let selected = self.select(data, &period, scope);

        let total_sales = sum_amounts(&selected.sales);
        let total_purchases = sum_amounts(&selected.purchases);
        let total_expenses = sum_amounts(&selected.expenses);

        let sales_count = selected.sales.len();
        let average_sale = if sales_count == 0 {
            Decimal::ZERO
        } else {
            (total_sales / Decimal::from(sales_count as u64))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        // Fixed recency window, not the report period: the dashboard's "new"
        // counters always mean the trailing week.
        let recency = Period::Bounded(DateRange::trailing_week(self.today));
        let new_products = filter_by_period(&data.products, |p| p.created_on, &recency).len();
        let new_customers = filter_by_period(&data.customers, |c| c.created_on, &recency).len();

        let profit = total_sales - total_purchases - total_expenses;
        let balance = opening_cash.map(|cash| cash + profit);

        ActivityReport {
            period: period.bounds(),
            total_sales,
            sales_count,
            sales_trend: self.month_over_month(&data.sales, scope),
            average_sale,
            total_purchases,
            purchases_count: selected.purchases.len(),
            total_expenses,
            expenses_count: selected.expenses.len(),
            expenses_trend: self.month_over_month(&data.expenses, scope),
            new_products,
            new_customers,
            profit,
            balance,
            daily_sales: daily_totals(&selected.sales),
        }
    }

    /// Current month-to-date against the full prior calendar month, both
    /// narrowed to the same scope. Anchored on `today`, not on the requested
    /// report period: the trend chip always reads "this month vs last".
    fn month_over_month(&self, records: &[Transaction], scope: Option<ScopeId>) -> String {
        let current = Period::Bounded(DateRange::month_to_date(self.today));
        let previous = Period::Bounded(DateRange::prior_month(self.today));

        let current_total = sum_amounts(&filter_records(
            records,
            |t| t.occurred_on,
            &current,
            |t| t.scope,
            scope,
        ));
        let previous_total = sum_amounts(&filter_records(
            records,
            |t| t.occurred_on,
            &previous,
            |t| t.scope,
            scope,
        ));

        trend(previous_total, current_total)
    }
}

/// Unparseable amounts were carried as `None` by the ingestion boundary;
/// they contribute nothing here but the records themselves stay counted.
fn sum_amounts(records: &[&Transaction]) -> Decimal {
    records.iter().filter_map(|t| t.amount).sum()
}

fn daily_totals(sales: &[&Transaction]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for sale in sales {
        if let Some(day) = sale.occurred_on {
            *by_day.entry(day).or_insert(Decimal::ZERO) += sale.amount.unwrap_or(Decimal::ZERO);
        }
    }
    by_day
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}
