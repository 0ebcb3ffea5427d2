use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use madurodolar_rates::RatesError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A rate could not be produced. `context` is the route-level summary.
    #[error("{context}: {source}")]
    Rates {
        context: &'static str,
        #[source]
        source: RatesError,
    },
    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn rates(context: &'static str, source: RatesError) -> Self {
        ApiError::Rates { context, source }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // 502 when the upstream misbehaved, 500 for local failures
            ApiError::Rates { context, source } => {
                let status = if source.is_upstream() {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (
                    status,
                    ErrorBody {
                        error: context.to_string(),
                        details: Some(source.to_string()),
                    },
                )
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: self.to_string(),
                    details: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
