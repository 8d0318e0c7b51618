use super::error::SynthesisError;
use crate::infrastructure::repositories::TtsRepository;
use moka::future::Cache;
use std::sync::Arc;

const DEFAULT_VOICE_KEY: &str = "default";

/// Resolves which vendor voice a synthesis call speaks with.
///
/// The account's first voice is looked up once and kept for the lifetime of
/// the process. Concurrent first callers share a single vendor lookup.
pub struct VoiceResolver {
    tts_repo: Arc<dyn TtsRepository>,
    pinned_voice: Option<String>,
    cache: Cache<&'static str, String>,
}

impl VoiceResolver {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, pinned_voice: Option<String>) -> Self {
        Self {
            tts_repo,
            pinned_voice,
            // No TTL and no capacity bound: the default voice is never refreshed or evicted
            cache: Cache::builder().initial_capacity(1).build(),
        }
    }

    /// Pick the voice for one call: explicit request, pinned config, then the cached default
    pub async fn resolve(&self, requested: Option<&str>) -> Result<String, SynthesisError> {
        if let Some(voice_id) = requested {
            return Ok(voice_id.to_string());
        }

        if let Some(voice_id) = &self.pinned_voice {
            return Ok(voice_id.clone());
        }

        self.cache
            .try_get_with(DEFAULT_VOICE_KEY, self.fetch_default_voice())
            .await
            .map_err(|e| (*e).clone())
    }

    pub fn is_resolved(&self) -> bool {
        self.pinned_voice.is_some() || self.cache.contains_key(DEFAULT_VOICE_KEY)
    }

    async fn fetch_default_voice(&self) -> Result<String, SynthesisError> {
        let voices = self
            .tts_repo
            .list_voices()
            .await
            .map_err(|e| SynthesisError::vendor("list_voices", e))?;

        let voice = voices
            .into_iter()
            .next()
            .ok_or(SynthesisError::NoVoiceConfigured)?;

        tracing::info!(voice_id = %voice.id, "Cached default voice");

        Ok(voice.id)
    }
}
