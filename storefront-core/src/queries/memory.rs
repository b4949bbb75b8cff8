use super::{IndexRequest, OrdersModel, OrdersQuery, QueryError, resolve_window, utc_now};
use crate::entities::Order;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// [`OrdersQuery`] over a list of orders held in memory.
#[derive(Default)]
pub struct InMemoryOrdersQuery {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrdersQuery {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl OrdersQuery for InMemoryOrdersQuery {
    async fn index_helper(&self, request: IndexRequest) -> Result<OrdersModel, QueryError> {
        let window = resolve_window(request.start, request.end, utc_now());
        let limit = usize::try_from(request.count).unwrap_or(0);

        let mut matching: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| request.is_admin_search || o.is_owned_by(&request.username))
            .filter(|o| o.order_date >= window.0 && o.order_date <= window.1)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        matching.truncate(limit);

        Ok(OrdersModel::new(request, window, matching))
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, QueryError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned())
    }
}
