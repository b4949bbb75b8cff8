use crate::entities::products::Product;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// An order with its lines.
///
/// `order_details` is `None` when the line collection is absent. That is a
/// valid state and counts as zero line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: i32,
    pub username: String,
    pub order_date: time::PrimitiveDateTime,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub total: Decimal,
    pub processed: bool,
    pub order_details: Option<Vec<OrderDetail>>,
}

impl Order {
    /// Ordinal, case-sensitive owner check.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub order_detail_id: i32,
    pub order_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product: Product,
}

/// A row of the `orders` table, without lines.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderRecord {
    pub order_id: i32,
    pub username: String,
    pub order_date: time::PrimitiveDateTime,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub total: Decimal,
    pub processed: bool,
}

impl OrderRecord {
    pub fn with_details(self, order_details: Option<Vec<OrderDetail>>) -> Order {
        Order {
            order_id: self.order_id,
            username: self.username,
            order_date: self.order_date,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            phone: self.phone,
            email: self.email,
            total: self.total,
            processed: self.processed,
            order_details,
        }
    }
}

/// An `order_details` row joined with its product.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderDetailRecord {
    pub order_detail_id: i32,
    pub order_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub product_id: i32,
    pub sku_number: String,
    pub title: String,
    pub price: Decimal,
    pub sale_price: Decimal,
    pub product_art_url: String,
}

impl From<OrderDetailRecord> for OrderDetail {
    fn from(r: OrderDetailRecord) -> Self {
        OrderDetail {
            order_detail_id: r.order_detail_id,
            order_id: r.order_id,
            quantity: r.quantity,
            unit_price: r.unit_price,
            product: Product {
                product_id: r.product_id,
                sku_number: r.sku_number,
                title: r.title,
                price: r.price,
                sale_price: r.sale_price,
                product_art_url: r.product_art_url,
            },
        }
    }
}

/// Attach the loaded lines to their orders.
///
/// Every order gets `Some(lines)`, possibly empty: the lines were queried.
pub fn attach_details(records: Vec<OrderRecord>, details: Vec<OrderDetailRecord>) -> Vec<Order> {
    let mut by_order: HashMap<i32, Vec<OrderDetail>> = HashMap::new();
    for detail in details {
        by_order
            .entry(detail.order_id)
            .or_default()
            .push(detail.into());
    }
    records
        .into_iter()
        .map(|record| {
            let lines = by_order.remove(&record.order_id).unwrap_or_default();
            record.with_details(Some(lines))
        })
        .collect()
}

const ORDER_COLUMNS: &str = "order_id, username, order_date, name, address, city, state, \
    postal_code, country, phone, email, total, processed";

#[derive(Debug, Clone)]
/// Fetch one order row by id.
pub struct GetOrderRecordById {
    pub order_id: i32,
}

impl Processor<GetOrderRecordById> for DatabaseProcessor {
    type Output = Option<OrderRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderRecordById")]
    async fn process(
        &self,
        query: GetOrderRecordById,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");
        let record = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(query.order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }
}

#[derive(Debug, Clone)]
/// List order rows placed within `[start, end]`, newest first.
///
/// `username = None` lists every user's orders.
pub struct ListOrderRecordsInRange {
    pub username: Option<String>,
    pub start: time::PrimitiveDateTime,
    pub end: time::PrimitiveDateTime,
    pub limit: i64,
}

impl Processor<ListOrderRecordsInRange> for DatabaseProcessor {
    type Output = Vec<OrderRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOrderRecordsInRange")]
    async fn process(
        &self,
        query: ListOrderRecordsInRange,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let ListOrderRecordsInRange {
            username,
            start,
            end,
            limit,
        } = query;
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE ($1::text IS NULL OR username = $1) \
               AND order_date >= $2 \
               AND order_date <= $3 \
             ORDER BY order_date DESC \
             LIMIT $4"
        );
        let records = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(username)
            .bind(start)
            .bind(end)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}

#[derive(Debug, Clone)]
/// Load the lines (with products) of the given orders.
pub struct ListOrderDetailsForOrders {
    pub order_ids: Vec<i32>,
}

impl Processor<ListOrderDetailsForOrders> for DatabaseProcessor {
    type Output = Vec<OrderDetailRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListOrderDetailsForOrders")]
    async fn process(
        &self,
        query: ListOrderDetailsForOrders,
    ) -> Result<Vec<OrderDetailRecord>, sqlx::Error> {
        if query.order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let details = sqlx::query_as::<_, OrderDetailRecord>(
            r#"
            SELECT
                d.order_detail_id,
                d.order_id,
                d.quantity,
                d.unit_price,
                p.product_id,
                p.sku_number,
                p.title,
                p.price,
                p.sale_price,
                p.product_art_url
            FROM order_details d
            JOIN products p ON p.product_id = d.product_id
            WHERE d.order_id = ANY($1)
            ORDER BY d.order_id, d.order_detail_id
            "#,
        )
        .bind(query.order_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    fn record(order_id: i32) -> OrderRecord {
        OrderRecord {
            order_id,
            username: "alice".to_string(),
            order_date: datetime!(2026-03-01 12:00),
            name: "Alice".to_string(),
            address: "1 Main St".to_string(),
            city: "Redmond".to_string(),
            state: "WA".to_string(),
            postal_code: "98052".to_string(),
            country: "USA".to_string(),
            phone: "555-0100".to_string(),
            email: "alice@example.com".to_string(),
            total: dec!(0),
            processed: false,
        }
    }

    fn detail(order_detail_id: i32, order_id: i32) -> OrderDetailRecord {
        OrderDetailRecord {
            order_detail_id,
            order_id,
            quantity: 1,
            unit_price: dec!(9.99),
            product_id: 7,
            sku_number: "LIG-0001".to_string(),
            title: "Headlight".to_string(),
            price: dec!(9.99),
            sale_price: dec!(8.99),
            product_art_url: String::new(),
        }
    }

    #[test]
    fn test_attach_details_groups_by_order() {
        let orders = attach_details(
            vec![record(1), record(2)],
            vec![detail(10, 1), detail(11, 1), detail(12, 2)],
        );
        assert_eq!(orders[0].order_details.as_ref().map(Vec::len), Some(2));
        assert_eq!(orders[1].order_details.as_ref().map(Vec::len), Some(1));
        assert_eq!(orders[1].order_details.as_ref().unwrap()[0].product.title, "Headlight");
    }

    #[test]
    fn test_attach_details_order_without_lines_is_empty_not_absent() {
        let orders = attach_details(vec![record(3)], vec![]);
        assert_eq!(orders[0].order_details, Some(vec![]));
    }

    #[test]
    fn test_owner_check_is_case_sensitive() {
        let order = record(1).with_details(None);
        assert!(order.is_owned_by("alice"));
        assert!(!order.is_owned_by("Alice"));
        assert!(!order.is_owned_by("alice "));
    }
}
