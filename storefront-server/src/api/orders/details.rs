use axum::{
    Json,
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
};
use storefront_core::review::{DetailsOutcome, OrderLookup};

use super::{OrdersApiError, details_to_response, redirect_to_index};
use crate::api::extractors::AuthenticatedUser;
use crate::state::AppState;

/// `GET /orders/details?id=…` — one of the requester's orders.
pub(super) async fn details(
    state: State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, OrdersApiError> {
    let lookup = order_lookup(None, raw_query.as_deref());
    render_details(&state, &username, lookup).await
}

/// `GET /orders/details/{id}` — the path segment takes precedence over
/// any `id` in the query string.
pub(super) async fn details_by_path(
    state: State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Path(id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, OrdersApiError> {
    let lookup = order_lookup(Some(&id), raw_query.as_deref());
    render_details(&state, &username, lookup).await
}

async fn render_details(
    state: &AppState,
    username: &str,
    lookup: OrderLookup,
) -> Result<Response, OrdersApiError> {
    let format = state.config.storefront.read().await.currency.clone();

    match state.review.details(username, lookup, &format).await? {
        DetailsOutcome::RedirectToIndex {
            invalid_order_search,
        } => Ok(redirect_to_index(invalid_order_search.as_deref())),
        DetailsOutcome::Found(view) => Ok(Json(details_to_response(&view)).into_response()),
    }
}

/// Build the lookup from the route segment and the raw query string.
///
/// The echoed value is always the query-string `id` (every occurrence,
/// comma-joined), never the route segment. Keys match case-insensitively.
pub(super) fn order_lookup(path_id: Option<&str>, raw_query: Option<&str>) -> OrderLookup {
    let query_ids: Vec<String> = raw_query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| key.eq_ignore_ascii_case("id"))
                .map(|(_, value)| value.into_owned())
                .collect()
        })
        .unwrap_or_default();

    let id = path_id
        .or_else(|| query_ids.first().map(String::as_str))
        .and_then(|value| value.trim().parse::<i32>().ok());

    let raw_id = (!query_ids.is_empty()).then(|| query_ids.join(","));

    OrderLookup { id, raw_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_query() {
        let lookup = order_lookup(None, Some("id=42"));
        assert_eq!(lookup.id, Some(42));
        assert_eq!(lookup.raw_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_lookup_unparseable_keeps_raw() {
        let lookup = order_lookup(None, Some("id=abc%20def"));
        assert_eq!(lookup.id, None);
        assert_eq!(lookup.raw_id.as_deref(), Some("abc def"));
    }

    #[test]
    fn test_lookup_without_id_param() {
        let lookup = order_lookup(None, Some("other=1"));
        assert_eq!(lookup, OrderLookup { id: None, raw_id: None });
        assert_eq!(order_lookup(None, None), OrderLookup { id: None, raw_id: None });
    }

    #[test]
    fn test_lookup_empty_value() {
        let lookup = order_lookup(None, Some("id="));
        assert_eq!(lookup.id, None);
        assert_eq!(lookup.raw_id.as_deref(), Some(""));
    }

    #[test]
    fn test_lookup_repeated_and_case_insensitive_keys() {
        let lookup = order_lookup(None, Some("id=7&ID=x"));
        assert_eq!(lookup.id, Some(7));
        assert_eq!(lookup.raw_id.as_deref(), Some("7,x"));
    }

    #[test]
    fn test_lookup_path_wins() {
        let lookup = order_lookup(Some("5"), Some("id=9"));
        assert_eq!(lookup.id, Some(5));
        assert_eq!(lookup.raw_id.as_deref(), Some("9"));

        let lookup = order_lookup(Some("5"), None);
        assert_eq!(lookup.id, Some(5));
        assert_eq!(lookup.raw_id, None);
    }

    #[test]
    fn test_lookup_out_of_range_id() {
        let lookup = order_lookup(None, Some("id=99999999999"));
        assert_eq!(lookup.id, None);
        assert_eq!(lookup.raw_id.as_deref(), Some("99999999999"));
    }
}
