use super::{IndexRequest, OrdersModel, OrdersQuery, QueryError, resolve_window, utc_now};
use crate::entities::orders::{
    GetOrderRecordById, ListOrderDetailsForOrders, ListOrderRecordsInRange, attach_details,
};
use crate::entities::{Order, OrderDetail};
use crate::framework::DatabaseProcessor;
use async_trait::async_trait;
use kanau::processor::Processor;
use sqlx::PgPool;

/// [`OrdersQuery`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgOrdersQuery {
    processor: DatabaseProcessor,
}

impl PgOrdersQuery {
    pub fn new(pool: PgPool) -> Self {
        Self {
            processor: DatabaseProcessor { pool },
        }
    }
}

#[async_trait]
impl OrdersQuery for PgOrdersQuery {
    async fn index_helper(&self, request: IndexRequest) -> Result<OrdersModel, QueryError> {
        let window = resolve_window(request.start, request.end, utc_now());

        let records = self
            .processor
            .process(ListOrderRecordsInRange {
                username: (!request.is_admin_search).then(|| request.username.clone()),
                start: window.0,
                end: window.1,
                limit: request.count,
            })
            .await?;

        let details = self
            .processor
            .process(ListOrderDetailsForOrders {
                order_ids: records.iter().map(|r| r.order_id).collect(),
            })
            .await?;

        Ok(OrdersModel::new(request, window, attach_details(records, details)))
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, QueryError> {
        let Some(record) = self
            .processor
            .process(GetOrderRecordById { order_id })
            .await?
        else {
            return Ok(None);
        };

        let details = self
            .processor
            .process(ListOrderDetailsForOrders {
                order_ids: vec![order_id],
            })
            .await?;

        let lines: Vec<OrderDetail> = details.into_iter().map(Into::into).collect();
        Ok(Some(record.with_details(Some(lines))))
    }
}
