//! Collaborator-boundary adapter.
//!
//! The REST layer hands over collections whose rows are duck-typed: field
//! names vary between the legacy Spanish schema and the current English one
//! (`fecha` vs `occurred_at`, `ventas` vs `sales`), amounts arrive as decimal
//! strings or JSON numbers, and scope ids as numbers or numeric strings.
//! Everything is normalized here, once, so the core components only ever see
//! the canonical record shapes in [`crate::records`].
//!
//! Failures are data, not errors: an amount that will not parse becomes
//! `None` (the record still counts), a date that will not normalize becomes
//! `None` (date-scoped filters exclude it), a non-numeric scope becomes
//! `None`. Only a payload that is not valid JSON at all is reported as an
//! error.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::date;
use crate::error::Result;
use crate::records::{ActivityData, Customer, Product, ScopeId, Transaction};

/// Amount leaf as it appears on the wire.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(f64),
}

/// Scope id leaf as it appears on the wire.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawScope {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RawTransaction {
    #[serde(default, alias = "total", alias = "monto", alias = "importe")]
    #[schemars(description = "Monetary amount as a decimal string or JSON number.")]
    pub amount: Option<RawAmount>,

    #[serde(
        default,
        alias = "fecha",
        alias = "date",
        alias = "createdAt",
        alias = "created_at"
    )]
    #[schemars(
        description = "Date the transaction occurred, as a YYYY-MM-DD string, an ISO timestamp, or a dd/mm/yyyy triple."
    )]
    pub occurred_at: Option<String>,

    #[serde(
        default,
        alias = "caja",
        alias = "caja_id",
        alias = "cashbox",
        alias = "register"
    )]
    #[schemars(description = "Register/cashbox id as a number or numeric string.")]
    pub scope: Option<RawScope>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RawProduct {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,

    #[serde(default, alias = "createdAt", alias = "fecha_creacion", alias = "fecha")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RawCustomer {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,

    #[serde(default, alias = "createdAt", alias = "fecha_creacion", alias = "fecha")]
    pub created_at: Option<String>,
}

/// The full dashboard payload as fetched from the backend. Every collection
/// is optional; missing ones default to empty.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RawActivityPayload {
    #[serde(default, alias = "ventas")]
    pub sales: Vec<RawTransaction>,

    #[serde(default, alias = "compras")]
    pub purchases: Vec<RawTransaction>,

    #[serde(default, alias = "gastos")]
    pub expenses: Vec<RawTransaction>,

    #[serde(default, alias = "productos")]
    pub products: Vec<RawProduct>,

    #[serde(default, alias = "clientes")]
    pub customers: Vec<RawCustomer>,
}

impl RawActivityPayload {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RawActivityPayload)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

fn parse_amount(raw: &RawAmount) -> Option<Decimal> {
    match raw {
        RawAmount::Text(s) => s.trim().parse::<Decimal>().ok(),
        RawAmount::Number(n) => Decimal::try_from(*n).ok(),
    }
}

fn parse_scope(raw: &RawScope) -> Option<ScopeId> {
    match raw {
        RawScope::Number(n) => Some(*n),
        RawScope::Text(s) => s.trim().parse::<ScopeId>().ok(),
    }
}

pub fn adapt_transaction(raw: &RawTransaction) -> Transaction {
    Transaction {
        amount: raw.amount.as_ref().and_then(parse_amount),
        occurred_on: raw.occurred_at.as_deref().and_then(date::normalize),
        scope: raw.scope.as_ref().and_then(parse_scope),
    }
}

pub fn adapt_product(raw: &RawProduct) -> Product {
    Product {
        name: raw.name.clone().unwrap_or_default(),
        created_on: raw.created_at.as_deref().and_then(date::normalize),
    }
}

pub fn adapt_customer(raw: &RawCustomer) -> Customer {
    Customer {
        name: raw.name.clone().unwrap_or_default(),
        created_on: raw.created_at.as_deref().and_then(date::normalize),
    }
}

pub fn convert_payload(payload: &RawActivityPayload) -> ActivityData {
    ActivityData {
        sales: payload.sales.iter().map(adapt_transaction).collect(),
        purchases: payload.purchases.iter().map(adapt_transaction).collect(),
        expenses: payload.expenses.iter().map(adapt_transaction).collect(),
        products: payload.products.iter().map(adapt_product).collect(),
        customers: payload.customers.iter().map(adapt_customer).collect(),
    }
}

/// Parses a JSON dashboard payload into canonical collections.
pub fn activity_from_json(json: &str) -> Result<ActivityData> {
    let payload: RawActivityPayload = serde_json::from_str(json)?;
    Ok(convert_payload(&payload))
}
