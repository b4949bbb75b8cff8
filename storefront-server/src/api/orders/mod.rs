//! Orders API handlers.
//!
//! # Endpoints
//!
//! - `GET /orders`                – order history (`start`, `end`, `invalidOrderSearch`)
//! - `GET /orders/details?id=…`   – one order with its cost summary
//! - `GET /orders/details/{id}`   – same, id in the path
//!
//! Failed lookups never produce an error status: they redirect back to
//! `/orders` with the searched value in `invalidOrderSearch`.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use storefront_core::entities::{Order, OrderDetail, Product};
use storefront_core::queries::{OrdersModel, QueryError};
use storefront_core::review::OrderDetailsViewModel;
use storefront_sdk::objects::{
    OrderDetailResponse, OrderDetailsResponse, OrderResponse, OrdersIndexResponse,
    ProductResponse,
};

use crate::state::AppState;

mod details;
mod index;

/// Path of the order history page.
pub const INDEX_PATH: &str = "/orders";

/// Query parameter carrying the rejected search back to the history page.
pub const INVALID_ORDER_SEARCH_PARAM: &str = "invalidOrderSearch";

/// Build the Orders API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(INDEX_PATH, get(index::index))
        .route("/orders/details", get(details::details))
        .route("/orders/details/{id}", get(details::details_by_path))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in Orders API handlers.
#[derive(Debug)]
enum OrdersApiError {
    /// The order query collaborator failed.
    Query(QueryError),
}

impl From<QueryError> for OrdersApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

impl IntoResponse for OrdersApiError {
    fn into_response(self) -> Response {
        match self {
            OrdersApiError::Query(e) => {
                tracing::error!(error = %e, "Orders API query error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// `302 Found` back to the history page.
fn redirect_to_index(invalid_order_search: Option<&str>) -> Response {
    let location = match invalid_order_search {
        Some(search) => format!(
            "{INDEX_PATH}?{INVALID_ORDER_SEARCH_PARAM}={}",
            urlencoding::encode(search)
        ),
        None => INDEX_PATH.to_string(),
    };
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn product_to_response(p: &Product) -> ProductResponse {
    ProductResponse {
        product_id: p.product_id,
        sku_number: p.sku_number.clone(),
        title: p.title.clone(),
        price: p.price,
        sale_price: p.sale_price,
        product_art_url: p.product_art_url.clone(),
    }
}

fn detail_to_response(d: &OrderDetail) -> OrderDetailResponse {
    OrderDetailResponse {
        order_detail_id: d.order_detail_id,
        order_id: d.order_id,
        quantity: d.quantity,
        unit_price: d.unit_price,
        product: product_to_response(&d.product),
    }
}

/// Convert an `Order` (domain model) into an `OrderResponse` (API model).
fn order_to_response(o: &Order) -> OrderResponse {
    OrderResponse {
        order_id: o.order_id,
        username: o.username.clone(),
        order_date: o.order_date.assume_utc().unix_timestamp(),
        name: o.name.clone(),
        address: o.address.clone(),
        city: o.city.clone(),
        state: o.state.clone(),
        postal_code: o.postal_code.clone(),
        country: o.country.clone(),
        phone: o.phone.clone(),
        email: o.email.clone(),
        total: o.total,
        processed: o.processed,
        order_details: o
            .order_details
            .as_ref()
            .map(|lines| lines.iter().map(detail_to_response).collect()),
    }
}

fn index_to_response(model: &OrdersModel) -> OrdersIndexResponse {
    OrdersIndexResponse {
        orders: model.orders.iter().map(order_to_response).collect(),
        username: model.username.clone(),
        start_date: model.start_date.assume_utc().unix_timestamp(),
        end_date: model.end_date.assume_utc().unix_timestamp(),
        invalid_order_search: model.invalid_order_search.clone(),
        is_admin_search: model.is_admin_search,
    }
}

fn details_to_response(view: &OrderDetailsViewModel) -> OrderDetailsResponse {
    OrderDetailsResponse {
        order: order_to_response(&view.order),
        order_cost_summary: view.order_cost_summary.clone(),
    }
}
