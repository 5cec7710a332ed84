//! HTTP request handlers for the web server.

mod api;
mod redlining;
mod search;

use axum::extract::{rejection::QueryRejection, Query};

use super::error::ApiError;

// Re-export handlers for use by the router
pub use api::{api_status, health, not_found, panic_response};
pub use redlining::redlining;
pub use search::search_descriptions;

/// Raw query-string pairs, in request order.
type PairsQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Query parameters where a repeated key keeps its first value.
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn from_query(query: PairsQuery) -> Result<Self, ApiError> {
        let Query(pairs) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(pairs))
    }

    fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn first_owned(&self, name: &str) -> Option<String> {
        self.first(name).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_first_value_wins() {
        let p = params(&[("keyword", "mill"), ("mode", "token"), ("keyword", "rolling")]);
        assert_eq!(p.first("keyword"), Some("mill"));
        assert_eq!(p.first("mode"), Some("token"));
        assert_eq!(p.first("minLon"), None);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let p = params(&[("keyword", ""), ("keyword", "mill")]);
        assert_eq!(p.first_owned("keyword"), Some(String::new()));
    }
}
