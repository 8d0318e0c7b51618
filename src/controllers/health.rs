use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::tts::{TtsService, TtsServiceApi};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(tts_service): State<Arc<TtsService>>) -> impl IntoResponse {
    let voice = if tts_service.voice_cached() {
        "cached"
    } else {
        "unresolved"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts": "available",
            "voice": voice
        })),
    )
}
