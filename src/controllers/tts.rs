use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::tts::{
        dto::{SynthesizeRequest, SynthesizeResponse, VoicesResponse},
        SynthesisRequest, TtsService, TtsServiceApi,
    },
    error::AppResult,
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts/synthesize - Convert text to a playable audio URL
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<SynthesizeRequest>,
    ) -> AppResult<Json<SynthesizeResponse>> {
        let synthesis = SynthesisRequest {
            text: request.text.unwrap_or_default(),
            voice_id: request.voice_id,
        };

        let audio_url = controller.tts_service.synthesize(synthesis).await?;

        Ok(Json(SynthesizeResponse {
            audio_url: audio_url.into_inner(),
        }))
    }

    /// GET /api/tts/voices - Voices available on the vendor account
    pub async fn list_voices(
        State(controller): State<Arc<TtsController>>,
    ) -> AppResult<Json<VoicesResponse>> {
        let voices = controller.tts_service.list_voices().await?;

        Ok(Json(VoicesResponse { voices }))
    }
}
