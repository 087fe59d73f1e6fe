use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::analysis::{AnalysisResult, MockAnalyzer, Recording};
use crate::compare::Comparison;
use crate::config::Config;
use crate::error::{AnalysisError, ValidationError};
use crate::metrics::AnalysisSnapshot;

/// Shared state of the request handlers
pub struct AppState {
    pub analyzer: MockAnalyzer,
}

pub type SharedState = Arc<AppState>;

/// Request body of `/api/analyze/compare`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingPair {
    pub previous: Recording,
    pub current: Recording,
}

/// Request body of `/api/compare`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPair {
    pub previous: AnalysisSnapshot,
    pub current: AnalysisSnapshot,
}

/// Response of `/api/analyze/compare`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairAnalysis {
    pub previous: AnalysisResult,
    pub current: AnalysisResult,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON request body whose rejections are reported as `ErrorBody`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Errors reported to API clients with a JSON body
#[derive(Debug)]
pub enum ApiError {
    Body(JsonRejection),
    Analysis(AnalysisError),
    Validation(ValidationError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::Analysis(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };
        warn!("Rejected request: {}", error);
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Web server exposing analysis and comparison over HTTP
pub struct WebServer {
    state: SharedState,
    port: u16,
}

impl WebServer {
    /// Create a new web server
    pub fn new(config: &Config) -> Self {
        let state = Arc::new(AppState {
            analyzer: MockAnalyzer::from_config(config),
        });
        Self {
            state,
            port: config.web_port,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Build the router; exposed for tests
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the web server and serve until the process exits
    pub async fn start(self) -> Result<()> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        info!("Starting web server on http://{}", addr);

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Web UI available at http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze/compare", post(analyze_pair_handler))
        .route("/api/compare", post(compare_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the main HTML page
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../static/index.html"))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn analyze_handler(
    State(state): State<SharedState>,
    ApiJson(recording): ApiJson<Recording>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state.analyzer.analyze(&recording).await?;
    Ok(Json(result))
}

pub async fn analyze_pair_handler(
    State(state): State<SharedState>,
    ApiJson(pair): ApiJson<RecordingPair>,
) -> Result<Json<PairAnalysis>, ApiError> {
    let (previous, current) = state
        .analyzer
        .analyze_pair(&pair.previous, &pair.current)
        .await?;
    let comparison = Comparison::between(&previous.snapshot, &current.snapshot)?;
    Ok(Json(PairAnalysis {
        previous,
        current,
        comparison,
    }))
}

pub async fn compare_handler(
    ApiJson(pair): ApiJson<SnapshotPair>,
) -> Result<Json<Comparison>, ApiError> {
    let comparison = Comparison::between(&pair.previous, &pair.current)?;
    Ok(Json(comparison))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_server_creation() {
        let config = Config {
            web_port: 8080,
            ..Default::default()
        };
        let server = WebServer::new(&config);
        assert_eq!(server.port(), 8080);
    }

    #[test]
    fn test_error_status() {
        let response = ApiError::Analysis(AnalysisError::EmptyRecording("a.wav".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_snapshot_pair_deserialization() {
        let json = r#"{
            "previous": {"samples": [
                {"name": "pitch_accuracy", "value": 70.0},
                {"name": "rhythm_accuracy", "value": 80.0},
                {"name": "vocal_stability", "value": 75.0},
                {"name": "dynamic_range", "value": 20.0}
            ]},
            "current": {"samples": [
                {"name": "pitch_accuracy", "value": 85.0, "higher_is_better": true},
                {"name": "rhythm_accuracy", "value": 80.0},
                {"name": "vocal_stability", "value": 75.0},
                {"name": "dynamic_range", "value": 20.0}
            ]}
        }"#;
        let pair: SnapshotPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.current.samples().len(), 4);
    }
}
