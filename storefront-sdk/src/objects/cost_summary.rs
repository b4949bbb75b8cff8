//! Order detail page types.

use serde::{Deserialize, Serialize};

use super::orders::OrderResponse;

/// Display-ready money values for one order. Each field is already
/// formatted as a currency string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCostSummary {
    pub cart_sub_total: String,
    pub cart_shipping: String,
    pub cart_tax: String,
    pub cart_total: String,
}

/// The order detail page: one order and its cost summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub order_cost_summary: OrderCostSummary,
}
