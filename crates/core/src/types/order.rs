//! Orders placed by the signed-in account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, OrderId};

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    #[default]
    Unfulfilled,
    PartiallyFulfilled,
    Fulfilled,
}

/// Summary of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Customer-facing order number, e.g. `#1042`.
    pub number: String,
    /// Exact order total in the currency's standard unit.
    pub total: Decimal,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub fulfillment: FulfillmentStatus,
}

impl Order {
    /// Whether every item of the order has shipped.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        self.fulfillment == FulfillmentStatus::Fulfilled
    }
}
