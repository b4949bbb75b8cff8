//! Order listing and order view types.

use serde::{Deserialize, Serialize};

/// Product as shown on an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub sku_number: String,
    pub title: String,
    pub price: rust_decimal::Decimal,
    pub sale_price: rust_decimal::Decimal,
    pub product_art_url: String,
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub order_detail_id: i32,
    pub order_id: i32,
    pub quantity: i32,
    pub unit_price: rust_decimal::Decimal,
    pub product: ProductResponse,
}

/// An order together with its shipping contact and lines.
///
/// `order_details` is `None` when the lines were not available, which is
/// different from an order with zero lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub username: String,
    /// Unix timestamp (seconds, UTC).
    pub order_date: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub total: rust_decimal::Decimal,
    pub processed: bool,
    pub order_details: Option<Vec<OrderDetailResponse>>,
}

/// The order history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersIndexResponse {
    pub orders: Vec<OrderResponse>,
    pub username: String,
    /// Unix timestamp (seconds, UTC) of the lower bound that was applied.
    pub start_date: i64,
    /// Unix timestamp (seconds, UTC) of the upper bound that was applied.
    pub end_date: i64,
    /// What the user searched for when a previous lookup was rejected.
    pub invalid_order_search: Option<String>,
    pub is_admin_search: bool,
}
