use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use market_client::MeterReading;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::pipeline::{CostPipeline, PipelineError};

#[derive(Debug, Serialize, Deserialize)]
pub struct EnergyCostResponse {
    pub total_cost: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors as the caller sees them. Detail stays in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidInput,
    MarketPrices,
}

impl ApiError {
    fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::MarketPrices => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::MarketPrices => "Failed to fetch market prices",
        }
    }
}

impl From<&PipelineError> for ApiError {
    fn from(e: &PipelineError) -> Self {
        match e {
            PipelineError::InvalidInput(_) | PipelineError::ReadingCount { .. } => Self::InvalidInput,
            PipelineError::MarketData(_) => Self::MarketPrices,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// HTTP surface: `POST /energy_cost` plus a liveness probe. Any origin may call.
pub fn router(pipeline: CostPipeline) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/energy_cost", post(energy_cost))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(pipeline)
}

async fn health() -> &'static str {
    "ok"
}

async fn energy_cost(
    State(pipeline): State<CostPipeline>,
    body: Bytes,
) -> Result<Json<EnergyCostResponse>, ApiError> {
    metrics::counter!("energy_cost_requests_total").increment(1);

    // Decoded by hand: no JSON content type is required, and every decode
    // failure maps to `Invalid input`.
    let res = match serde_json::from_slice::<Vec<MeterReading>>(&body) {
        Ok(readings) => pipeline.run(&readings).await,
        Err(e) => Err(PipelineError::InvalidInput(e.to_string())),
    };

    match res {
        Ok(breakdown) => Ok(Json(EnergyCostResponse {
            total_cost: breakdown.total_cost,
        })),
        Err(e) => {
            metrics::counter!("energy_cost_rejected_total", "reason" => e.reason()).increment(1);
            let api_error = ApiError::from(&e);
            match api_error {
                ApiError::InvalidInput => tracing::warn!(error = %e, "rejecting energy cost request"),
                ApiError::MarketPrices => tracing::error!(error = %e, "energy cost request failed"),
            }
            Err(api_error)
        }
    }
}
