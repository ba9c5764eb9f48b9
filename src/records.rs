use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Register/cashbox identifier. Upstream payloads carry these as numbers or
/// numeric strings; the ingestion boundary normalizes both to this type so
/// scope equality is always an integer comparison.
pub type ScopeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(
        description = "Monetary amount, fixed-point. None when the source string failed to parse as a decimal: such a record contributes 0 to sums but still counts toward record counts."
    )]
    pub amount: Option<Decimal>,

    #[schemars(
        description = "Calendar date the transaction occurred on, normalized at the ingestion boundary. None when the raw date failed to normalize; date-scoped filters exclude such records."
    )]
    pub occurred_on: Option<NaiveDate>,

    #[schemars(description = "Register/cashbox the transaction was recorded at, if any.")]
    pub scope: Option<ScopeId>,
}

impl Transaction {
    pub fn new(amount: Decimal, occurred_on: NaiveDate) -> Self {
        Self {
            amount: Some(amount),
            occurred_on: Some(occurred_on),
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    pub name: String,

    #[schemars(
        description = "Date the product was registered; only used for the 'new in the last 7 days' counter."
    )]
    pub created_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Customer {
    pub name: String,

    #[schemars(
        description = "Date the customer was registered; only used for the 'new in the last 7 days' counter."
    )]
    pub created_on: Option<NaiveDate>,
}

/// The raw collections a query cycle operates on, already loaded by the
/// data-fetching layer. The engine never mutates them; every query produces
/// a fresh report value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityData {
    pub sales: Vec<Transaction>,
    pub purchases: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
}
