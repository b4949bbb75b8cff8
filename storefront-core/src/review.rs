//! Order review: the order history listing and the ownership-gated order
//! detail lookup.
//!
//! A missing order and an order owned by someone else produce the exact
//! same outcome and the same telemetry, so callers cannot probe for the
//! existence of other users' orders.

use crate::entities::Order;
use crate::pricing::{CostBreakdown, CurrencyFormat, line_item_count};
use crate::queries::{IndexRequest, OrdersModel, OrdersQuery, QueryError};
use crate::telemetry::{Measurements, Properties, TelemetryProvider};
use std::sync::Arc;
use storefront_sdk::objects::OrderCostSummary;
use time::PrimitiveDateTime;

pub const NULL_ID_TRACE: &str = "Order/Server/NullId";
pub const USERNAME_MISMATCH_TRACE: &str = "Order/Server/UsernameMismatch";
pub const NULL_DETAILS_EVENT: &str = "Order/Server/NullDetails";
pub const DETAILS_EVENT: &str = "Order/Server/Details";
pub const LINE_ITEM_COUNT_MEASUREMENT: &str = "LineItemCount";

/// Number of orders shown on the history page.
pub const ORDERS_PAGE_SIZE: i64 = 10;

/// What the requester asked for when looking up an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLookup {
    /// The parsed identifier, if the request carried a valid one.
    pub id: Option<i32>,
    /// The `id` query value exactly as sent, `None` when the parameter
    /// was not present.
    pub raw_id: Option<String>,
}

/// The order detail page before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailsViewModel {
    pub order: Order,
    pub costs: CostBreakdown,
    pub order_cost_summary: OrderCostSummary,
}

/// Result of an order detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsOutcome {
    /// Send the user back to the history page, echoing what they searched for.
    RedirectToIndex { invalid_order_search: Option<String> },
    /// The order exists and belongs to the requester.
    Found(Box<OrderDetailsViewModel>),
}

/// Order review service. Holds its collaborators explicitly.
#[derive(Clone)]
pub struct OrderReview {
    orders: Arc<dyn OrdersQuery>,
    telemetry: Arc<dyn TelemetryProvider>,
}

impl OrderReview {
    pub fn new(orders: Arc<dyn OrdersQuery>, telemetry: Arc<dyn TelemetryProvider>) -> Self {
        Self { orders, telemetry }
    }

    /// The requester's order history.
    #[tracing::instrument(skip(self), err)]
    pub async fn index(
        &self,
        username: &str,
        start: Option<PrimitiveDateTime>,
        end: Option<PrimitiveDateTime>,
        invalid_order_search: Option<String>,
    ) -> Result<OrdersModel, QueryError> {
        self.orders
            .index_helper(IndexRequest {
                username: username.to_string(),
                start,
                end,
                count: ORDERS_PAGE_SIZE,
                invalid_order_search,
                is_admin_search: false,
            })
            .await
    }

    /// Look up one of the requester's orders.
    ///
    /// Query failures propagate; every other failure is a redirect.
    #[tracing::instrument(skip(self, format), err)]
    pub async fn details(
        &self,
        username: &str,
        lookup: OrderLookup,
        format: &CurrencyFormat,
    ) -> Result<DetailsOutcome, QueryError> {
        let Some(id) = lookup.id else {
            self.telemetry.track_trace(NULL_ID_TRACE);
            return Ok(DetailsOutcome::RedirectToIndex {
                invalid_order_search: lookup.raw_id,
            });
        };

        let order = match self.orders.find_order(id).await? {
            Some(order) if order.is_owned_by(username) => order,
            _ => {
                self.telemetry.track_trace(USERNAME_MISMATCH_TRACE);
                return Ok(DetailsOutcome::RedirectToIndex {
                    invalid_order_search: Some(id.to_string()),
                });
            }
        };

        let properties = Properties::from([
            ("Id".to_string(), id.to_string()),
            ("Username".to_string(), username.to_string()),
        ]);
        match order.order_details.as_deref() {
            None => self
                .telemetry
                .track_event(NULL_DETAILS_EVENT, properties, None),
            Some(details) => {
                let measurements = Measurements::from([(
                    LINE_ITEM_COUNT_MEASUREMENT.to_string(),
                    line_item_count(details) as f64,
                )]);
                self.telemetry
                    .track_event(DETAILS_EVENT, properties, Some(measurements));
            }
        }

        let costs = CostBreakdown::for_details(order.order_details.as_deref());
        let order_cost_summary = costs.to_summary(format);

        Ok(DetailsOutcome::Found(Box::new(OrderDetailsViewModel {
            order,
            costs,
            order_cost_summary,
        })))
    }
}
