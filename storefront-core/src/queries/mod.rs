//! The order-query collaborator.
//!
//! Handlers only see [`OrdersQuery`]; the PostgreSQL implementation is
//! used in production and the in-memory one in tests.

mod memory;
mod postgres;

pub use memory::InMemoryOrdersQuery;
pub use postgres::PgOrdersQuery;

use crate::entities::Order;
use async_trait::async_trait;
use thiserror::Error;
use time::{Duration, PrimitiveDateTime};

/// How far back the listing reaches when no start date is given.
pub const DEFAULT_LOOKBACK: Duration = Duration::days(7);

/// Slack added to "now" when no end date is given. Submitted dates are
/// only accurate to the minute.
pub const END_DATE_SLACK: Duration = Duration::minutes(1);

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Parameters of an order history lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRequest {
    pub username: String,
    pub start: Option<PrimitiveDateTime>,
    pub end: Option<PrimitiveDateTime>,
    pub count: i64,
    pub invalid_order_search: Option<String>,
    /// Admin searches are not restricted to `username`'s orders.
    pub is_admin_search: bool,
}

/// Result of an order history lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersModel {
    pub orders: Vec<Order>,
    pub username: String,
    pub start_date: PrimitiveDateTime,
    pub end_date: PrimitiveDateTime,
    pub invalid_order_search: Option<String>,
    pub is_admin_search: bool,
}

impl OrdersModel {
    fn new(
        request: IndexRequest,
        window: (PrimitiveDateTime, PrimitiveDateTime),
        orders: Vec<Order>,
    ) -> Self {
        Self {
            orders,
            username: request.username,
            start_date: window.0,
            end_date: window.1,
            invalid_order_search: request.invalid_order_search,
            is_admin_search: request.is_admin_search,
        }
    }
}

#[async_trait]
pub trait OrdersQuery: Send + Sync {
    /// List the orders of the history page.
    async fn index_helper(&self, request: IndexRequest) -> Result<OrdersModel, QueryError>;

    /// Find one order with its lines and products.
    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, QueryError>;
}

/// Fill in missing bounds of the listing window.
///
/// A missing end becomes `now` plus [`END_DATE_SLACK`]; a missing start
/// becomes the end minus [`DEFAULT_LOOKBACK`]. Defaults saturate at the
/// limits of the representable range.
pub fn resolve_window(
    start: Option<PrimitiveDateTime>,
    end: Option<PrimitiveDateTime>,
    now: PrimitiveDateTime,
) -> (PrimitiveDateTime, PrimitiveDateTime) {
    let end = end.unwrap_or_else(|| {
        now.checked_add(END_DATE_SLACK)
            .unwrap_or(PrimitiveDateTime::MAX)
    });
    let start = start.unwrap_or_else(|| {
        end.checked_sub(DEFAULT_LOOKBACK)
            .unwrap_or(PrimitiveDateTime::MIN)
    });
    (start, end)
}

/// Current UTC time without offset, matching the `order_date` column.
pub fn utc_now() -> PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_window_defaults() {
        let now = datetime!(2026-05-10 08:30);
        let (start, end) = resolve_window(None, None, now);
        assert_eq!(end, datetime!(2026-05-10 08:31));
        assert_eq!(start, datetime!(2026-05-03 08:31));
    }

    #[test]
    fn test_window_defaults_saturate_at_range_limits() {
        let now = datetime!(2026-05-10 08:30);
        let end = time::Date::from_calendar_date(-9999, time::Month::January, 3)
            .unwrap()
            .midnight();
        let (start, resolved_end) = resolve_window(None, Some(end), now);
        assert_eq!(resolved_end, end);
        assert_eq!(start, PrimitiveDateTime::MIN);

        let (start, end) = resolve_window(None, None, PrimitiveDateTime::MAX);
        assert_eq!(end, PrimitiveDateTime::MAX);
        assert_eq!(start, PrimitiveDateTime::MAX - DEFAULT_LOOKBACK);
    }

    #[test]
    fn test_window_start_defaults_relative_to_given_end() {
        let now = datetime!(2026-05-10 08:30);
        let (start, end) = resolve_window(None, Some(datetime!(2026-01-15 00:00)), now);
        assert_eq!(end, datetime!(2026-01-15 00:00));
        assert_eq!(start, datetime!(2026-01-08 00:00));
    }

    #[test]
    fn test_window_keeps_explicit_bounds() {
        let now = datetime!(2026-05-10 08:30);
        let (start, end) = resolve_window(
            Some(datetime!(2025-01-01 00:00)),
            Some(datetime!(2025-12-31 23:59)),
            now,
        );
        assert_eq!(start, datetime!(2025-01-01 00:00));
        assert_eq!(end, datetime!(2025-12-31 23:59));
    }
}
