//! HTTP layer for lexicoach.
//!
//! Thin plumbing over [`lexicoach_core::engine::Evaluator`]: two routes,
//! JSON in, JSON out. The evaluator is built once before the server accepts
//! its first request and shared read-only behind an `Arc` — no locks at
//! request time.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lexicoach_core::engine::Evaluator;
use lexicoach_core::model::EvaluationResult;

/// Errors that can occur in the lexicoach server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Unexpected fault while evaluating a request. Surfaced to the client
    /// as an opaque 500; details go to the log only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");
        let body = Json(serde_json::json!({ "error": "internal server error" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Shared server state: the frozen evaluator.
#[derive(Debug)]
pub struct AppState {
    pub evaluator: Evaluator,
}

/// A student's submission for evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The question, in English.
    pub question: String,
    /// The student's answer.
    pub answer: String,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/evaluate", post(evaluate))
        .with_state(state)
}

/// Welcome payload with usage instructions.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub instructions: Vec<String>,
    pub example: EvaluateRequest,
}

/// GET / — instructions for using the API.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Welcome to the lexicoach English evaluation service!".to_string(),
        instructions: vec![
            "1. POST a question and answer in English to /evaluate".to_string(),
            "2. You will receive feedback on your answer".to_string(),
            "3. If there are mistakes, the feedback explains how to improve".to_string(),
        ],
        example: EvaluateRequest {
            question: "How are you?".to_string(),
            answer: "I am fine, thank you".to_string(),
        },
    })
}

/// POST /evaluate — evaluate a student's answer.
///
/// Evaluation is bounded CPU work over short strings, so it runs inline;
/// any unexpected fault inside the engine becomes an opaque 500 instead of
/// tearing down the connection.
async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, ServerError> {
    let result = state
        .evaluator
        .try_evaluate(&request.question, &request.answer)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    tracing::debug!(
        is_correct = result.is_correct,
        error_type = %result.error_type,
        "evaluated answer"
    );
    Ok(Json(result))
}

/// Bind and serve until shutdown.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}
