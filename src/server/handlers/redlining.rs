//! Bounding-box search over redlining geometries.

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
use crate::services::RawBounds;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedliningResponse<'a> {
    redlined_data: Vec<&'a RedliningFeature>,
}

/// `GET /redlining?minLon=..&maxLon=..&minLat=..&maxLat=..`
pub async fn redlining(
    State(state): State<AppState>,
    query: PairsQuery,
) -> Result<Response, ApiError> {
    let params = QueryParams::from_query(query)?;
    let bounds = RawBounds {
        min_lon: params.first_owned("minLon"),
        max_lon: params.first_owned("maxLon"),
        min_lat: params.first_owned("minLat"),
        max_lat: params.first_owned("maxLat"),
    };

    let redlined_data = state.query.search_redlining(&bounds)?;
    Ok(Json(RedliningResponse { redlined_data }).into_response())
}
