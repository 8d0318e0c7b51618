use super::error::SynthesisError;
use super::model::{AudioUrl, SynthesisRequest, SynthesisSettings, VendorVoice};
use super::strategy::{AsyncPollingStrategy, StrategyOutcome, SynchronousStrategy, SynthesisJob, SynthesisStrategy};
use super::voice::VoiceResolver;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

const LOG_PREVIEW_CHARS: usize = 50;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    voices: VoiceResolver,
    strategies: Vec<Box<dyn SynthesisStrategy>>,
    max_text_chars: usize,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        settings: SynthesisSettings,
        pinned_voice: Option<String>,
    ) -> Self {
        // Synchronous first; clip polling only when it comes back retryable
        let strategies: Vec<Box<dyn SynthesisStrategy>> = vec![
            Box::new(SynchronousStrategy::new(tts_repo.clone(), &settings)),
            Box::new(AsyncPollingStrategy::new(tts_repo.clone(), &settings)),
        ];

        Self {
            voices: VoiceResolver::new(tts_repo.clone(), pinned_voice),
            tts_repo,
            strategies,
            max_text_chars: settings.max_text_chars,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn text into a playable audio URL
    ///
    /// This operation:
    /// - Validates the text (non-empty after trimming, bounded length)
    /// - Resolves the voice (request, pinned, or the cached account default)
    /// - Tries synchronous synthesis, then clip creation with polling
    ///
    /// No network call is made when validation fails.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioUrl, SynthesisError>;

    /// Voices configured on the vendor account (first page)
    async fn list_voices(&self) -> Result<Vec<VendorVoice>, SynthesisError>;

    /// Whether a default voice is available without a vendor lookup
    fn voice_cached(&self) -> bool;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioUrl, SynthesisError> {
        let start_time = std::time::Instant::now();

        // 1. Validate
        let text = self.validate_text(&request.text)?;

        tracing::info!(
            text_length = text.chars().count(),
            text_preview = %preview(text),
            "TTS synthesis request"
        );

        // 2. Resolve voice
        let requested_voice = request
            .voice_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let voice_id = self.voices.resolve(requested_voice).await?;

        // 3. Try each strategy in order
        let job = SynthesisJob {
            text,
            voice_id: &voice_id,
        };
        let mut retryable: Option<SynthesisError> = None;

        for strategy in &self.strategies {
            match strategy.attempt(job).await {
                StrategyOutcome::Success(url) => {
                    if let Some(earlier) = &retryable {
                        tracing::info!(
                            strategy = strategy.name(),
                            earlier_failure = %earlier,
                            "Synthesis recovered through fallback"
                        );
                    }
                    tracing::info!(
                        strategy = strategy.name(),
                        voice_id = %voice_id,
                        latency_ms = start_time.elapsed().as_millis(),
                        "TTS synthesis completed"
                    );
                    return Ok(url);
                }
                StrategyOutcome::Retryable(err) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %err,
                        "Synthesis strategy failed, falling back"
                    );
                    retryable = Some(err);
                }
                StrategyOutcome::Fatal(err) => {
                    tracing::error!(
                        strategy = strategy.name(),
                        error = %err,
                        latency_ms = start_time.elapsed().as_millis(),
                        "TTS synthesis failed"
                    );
                    return Err(err);
                }
            }
        }

        Err(retryable.unwrap_or_else(|| SynthesisError::VendorRequestFailed {
            operation: "synthesize",
            status: None,
            detail: "no synthesis strategy available".to_string(),
        }))
    }

    async fn list_voices(&self) -> Result<Vec<VendorVoice>, SynthesisError> {
        let voices = self
            .tts_repo
            .list_voices()
            .await
            .map_err(|e| SynthesisError::vendor("list_voices", e))?;

        tracing::info!(voice_count = voices.len(), "Listed vendor voices");

        Ok(voices)
    }

    fn voice_cached(&self) -> bool {
        self.voices.is_resolved()
    }
}

impl TtsService {
    fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, SynthesisError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(SynthesisError::InvalidInput(
                "Text is required for TTS generation".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_text_chars {
            return Err(SynthesisError::InvalidInput(format!(
                "Text must be {} characters or less",
                self.max_text_chars
            )));
        }

        Ok(trimmed)
    }
}

/// First characters of the text for logs, cut on a char boundary
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
