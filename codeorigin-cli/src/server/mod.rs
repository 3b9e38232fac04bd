//! HTTP service wrapping the detector
//!
//! Endpoints:
//! - `GET  /`        service banner
//! - `GET  /health`  liveness probe
//! - `GET  /stats`   limits and supported languages
//! - `POST /detect`  score a snippet

pub mod dto;

use crate::detector::Detector;
use crate::error::DetectError;
use crate::models::Language;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use dto::{
    DetectRequest, DetectResponse, ErrorResponse, HealthResponse, StatsResponse, StatusResponse,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Room for JSON framing and escapes on top of the largest accepted snippet
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

const FEATURES_ANALYZED: &[&str] = &[
    "line_count",
    "char_count",
    "has_comments",
    "has_function_like",
    "ai_variable_name_hits",
    "ai_function_name_hits",
    "ai_comment_pattern_hits",
    "indentation_consistency",
    "comment_ratio",
    "long_descriptive_comment_count",
    "avg_line_length",
    "complexity_score",
];

#[derive(Debug, Clone)]
pub struct AppState {
    detector: Detector,
}

impl AppState {
    pub fn new(detector: Detector) -> Self {
        Self { detector }
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<DetectError> for ApiError {
    fn from(err: DetectError) -> Self {
        let status = if err.is_oversize() {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, payload).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Worst case four UTF-8 bytes per accepted character
    let body_limit = state
        .detector
        .limits()
        .max_code_length
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/stats", get(handle_stats))
        .route("/detect", post(handle_detect))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C
pub async fn start_server(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);
    let listener = bind_listener(addr).await?;
    info!("codeorigin listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn bind_listener(addr: &str) -> Result<TcpListener> {
    if let Ok(socket_addr) = addr.parse::<SocketAddr>() {
        TcpListener::bind(socket_addr)
            .await
            .with_context(|| format!("failed to bind listener on {socket_addr}"))
    } else {
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind listener on {addr}"))
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => warn!("Unable to listen for shutdown signal: {}", err),
    }
}

async fn handle_index() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        message: "AI Code Detection API",
        version: API_VERSION,
    })
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_status: "heuristic",
        api_version: API_VERSION,
    })
}

async fn handle_stats(State(state): State<SharedState>) -> Json<StatsResponse> {
    let limits = state.detector.limits();
    Json(StatsResponse {
        supported_languages: Language::SUPPORTED,
        min_code_length: limits.min_code_length,
        max_code_length: limits.max_code_length,
        features_analyzed: FEATURES_ANALYZED,
    })
}

async fn handle_detect(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let body = body.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("No JSON data provided"));
    }

    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))?;
    if is_empty_json(&value) {
        return Err(ApiError::bad_request("No JSON data provided"));
    }
    let request: DetectRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))?;

    let code = request.code.unwrap_or_default();
    let language = Language::from_hint(request.language.as_deref().unwrap_or("python"));

    let result = state.detector.detect(&code, language).map_err(|e| {
        warn!("Rejected detect request: {}", e);
        ApiError::from(e)
    })?;

    info!(
        "Prediction: {} ({:.2})",
        result.verdict, result.confidence
    );
    Ok(Json(DetectResponse::from(result)))
}

/// `null`, `{}`, `[]`, `""`, `false` and `0` carry no request
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
