use std::sync::Arc;

use axum::{extract::State, Json};
use madurodolar_rates::{OfficialRate, RateQuote};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Parallel USD/VES quote. Both legs must succeed or the request fails.
pub async fn get_parallel_quote(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateQuote>> {
    let quote = state.quote_source.fetch_quote().await.map_err(|e| {
        error!("Error fetching {}: {}", state.quote_source.id(), e);
        ApiError::rates("Failed to fetch parallel rate", e)
    })?;
    Ok(Json(quote))
}

/// Official BCV USD/VES rate.
pub async fn get_official_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<OfficialRate>> {
    let rate = state.official_source.fetch_official().await.map_err(|e| {
        error!("Error fetching {}: {}", state.official_source.id(), e);
        ApiError::rates("Failed to fetch official rate", e)
    })?;
    Ok(Json(rate))
}
