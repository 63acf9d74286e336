//! JSON API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::error::SpamError;
use crate::model::Label;
use crate::service::SpamService;

/// Classification request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub message: String,
}

/// Classification response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// 0 = not-spam, 1 = spam
    pub label: u8,
    pub prediction: String,
    pub is_spam: bool,
    pub normalized: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub vocabulary_size: usize,
    pub classifier: String,
    pub vectorizer: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

impl ClassifyResponse {
    fn new(label: Label, normalized: String) -> Self {
        Self {
            label: label.as_u8(),
            prediction: label.to_string(),
            is_spam: label.is_spam(),
            normalized,
        }
    }
}

/// POST /api/classify - Classify one message
pub async fn classify(
    State(service): State<Arc<SpamService>>,
    Json(req): Json<ClassifyRequest>,
) -> impl IntoResponse {
    match service.check(&req.message) {
        Ok(prediction) => (
            StatusCode::OK,
            Json(ClassifyResponse::new(prediction.label, prediction.normalized)),
        )
            .into_response(),
        Err(SpamError::EmptyMessage) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Message must not be empty")),
        )
            .into_response(),
        Err(e) => {
            error!("Classification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Classification failed")),
            )
                .into_response()
        }
    }
}

/// GET /api/health - Health check endpoint
pub async fn health(State(service): State<Arc<SpamService>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "spam-rs".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        vocabulary_size: service.vocabulary_size(),
        classifier: service.model_kind().to_string(),
        vectorizer: service.vectorizer_kind().to_string(),
    })
}
