//! Keyword search over area descriptions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::AppState;
use super::{PairsQuery, QueryParams};
use crate::models::RedliningFeature;
use crate::services::query::MISSING_KEYWORD;
use crate::services::{MatchMode, QueryError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeywordResponse<'a> {
    keyword_data: Vec<&'a RedliningFeature>,
}

/// `GET /searchDescriptions?keyword=...[&mode=substring|token]`
pub async fn search_descriptions(
    State(state): State<AppState>,
    query: PairsQuery,
) -> Result<Response, ApiError> {
    let params = QueryParams::from_query(query)?;

    // A missing keyword is reported before any other parameter problem.
    let keyword = params
        .first("keyword")
        .filter(|k| !k.is_empty())
        .ok_or(QueryError::MissingParameter(MISSING_KEYWORD))?;

    let mode = params
        .first("mode")
        .map(str::parse::<MatchMode>)
        .transpose()?
        .unwrap_or_default();

    let keyword_data = state.query.search_descriptions(Some(keyword), mode)?;

    Ok(Json(KeywordResponse { keyword_data }).into_response())
}
