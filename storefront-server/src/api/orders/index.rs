use axum::{
    Json,
    extract::{RawQuery, State},
    response::IntoResponse,
};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use super::{OrdersApiError, index_to_response};
use crate::api::extractors::AuthenticatedUser;
use crate::state::AppState;

/// Query parameters of the history page. Dates arrive as raw strings so
/// that an unparseable date behaves like an absent one.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct IndexQuery {
    start: Option<String>,
    end: Option<String>,
    invalid_order_search: Option<String>,
}

impl IndexQuery {
    /// Read the parameters from a raw query string. Keys match
    /// case-insensitively and the first occurrence of a key wins.
    pub(super) fn from_raw(raw_query: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw_query) = raw_query else {
            return query;
        };
        for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
            let slot = if key.eq_ignore_ascii_case("start") {
                &mut query.start
            } else if key.eq_ignore_ascii_case("end") {
                &mut query.end
            } else if key.eq_ignore_ascii_case("invalidOrderSearch") {
                &mut query.invalid_order_search
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// `GET /orders` — the requester's order history.
pub(super) async fn index(
    state: State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    RawQuery(raw_query): RawQuery,
) -> Result<impl IntoResponse, OrdersApiError> {
    let query = IndexQuery::from_raw(raw_query.as_deref());
    let start = query.start.as_deref().and_then(parse_date_param);
    let end = query.end.as_deref().and_then(parse_date_param);

    let model = state
        .review
        .index(&username, start, end, query.invalid_order_search)
        .await?;

    Ok(Json(index_to_response(&model)))
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
pub(super) fn parse_date_param(value: &str) -> Option<PrimitiveDateTime> {
    let value = value.trim();
    let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let with_minutes = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    let date_only = format_description!("[year]-[month]-[day]");

    PrimitiveDateTime::parse(value, with_seconds)
        .or_else(|_| PrimitiveDateTime::parse(value, with_minutes))
        .ok()
        .or_else(|| {
            Date::parse(value, date_only)
                .ok()
                .map(|d| d.midnight())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_date_param_formats() {
        assert_eq!(parse_date_param("2026-02-03"), Some(datetime!(2026-02-03 00:00)));
        assert_eq!(
            parse_date_param("2026-02-03T14:05"),
            Some(datetime!(2026-02-03 14:05))
        );
        assert_eq!(
            parse_date_param("2026-02-03T14:05:09"),
            Some(datetime!(2026-02-03 14:05:09))
        );
    }

    #[test]
    fn test_index_query_first_value_wins() {
        let query = IndexQuery::from_raw(Some(
            "start=2026-01-01&start=2026-02-01&END=2026-03-01&end=x&invalidOrderSearch=7&invalidordersearch=8",
        ));
        assert_eq!(
            query,
            IndexQuery {
                start: Some("2026-01-01".to_string()),
                end: Some("2026-03-01".to_string()),
                invalid_order_search: Some("7".to_string()),
            }
        );
    }

    #[test]
    fn test_index_query_absent_and_unknown_keys() {
        assert_eq!(IndexQuery::from_raw(None), IndexQuery::default());
        assert_eq!(
            IndexQuery::from_raw(Some("page=2&invalidOrderSearch=a%20b")),
            IndexQuery {
                invalid_order_search: Some("a b".to_string()),
                ..IndexQuery::default()
            }
        );
    }

    #[test]
    fn test_parse_date_param_rejects_garbage() {
        assert_eq!(parse_date_param(""), None);
        assert_eq!(parse_date_param("yesterday"), None);
        assert_eq!(parse_date_param("2026-13-01"), None);
    }
}
