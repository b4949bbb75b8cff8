use rust_decimal::Decimal;

/// A catalog product referenced by order lines. Read-only from the
/// orders service's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: i32,
    pub sku_number: String,
    pub title: String,
    pub price: Decimal,
    pub sale_price: Decimal,
    pub product_art_url: String,
}
