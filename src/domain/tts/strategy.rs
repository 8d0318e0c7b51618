use super::error::SynthesisError;
use super::model::{AudioUrl, SynthesisSettings};
use super::polling::ClipPoller;
use crate::infrastructure::repositories::{SpeechParams, TtsRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// What a strategy tells the service after one attempt
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Success(AudioUrl),
    /// The next strategy may still succeed
    Retryable(SynthesisError),
    Fatal(SynthesisError),
}

/// Text and voice for one synthesis attempt
#[derive(Debug, Clone, Copy)]
pub struct SynthesisJob<'a> {
    pub text: &'a str,
    pub voice_id: &'a str,
}

/// One way of turning text into an audio URL.
/// The service tries strategies in order and advances only on `Retryable`.
#[async_trait]
pub trait SynthesisStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, job: SynthesisJob<'_>) -> StrategyOutcome;
}

/// Single request/response synthesis call
pub struct SynchronousStrategy {
    tts_repo: Arc<dyn TtsRepository>,
    sample_rate: u32,
    output_format: String,
}

impl SynchronousStrategy {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, settings: &SynthesisSettings) -> Self {
        Self {
            tts_repo,
            sample_rate: settings.sample_rate,
            output_format: settings.output_format.clone(),
        }
    }
}

#[async_trait]
impl SynthesisStrategy for SynchronousStrategy {
    fn name(&self) -> &'static str {
        "synchronous"
    }

    async fn attempt(&self, job: SynthesisJob<'_>) -> StrategyOutcome {
        let params = SpeechParams {
            voice_id: job.voice_id,
            text: job.text,
            sample_rate: self.sample_rate,
            output_format: &self.output_format,
        };

        match self.tts_repo.synthesize_sync(params).await {
            Ok(raw) => match AudioUrl::from_vendor(raw.as_deref()) {
                Some(url) => StrategyOutcome::Success(url),
                None => StrategyOutcome::Retryable(SynthesisError::VendorRequestFailed {
                    operation: "sync_synthesis",
                    status: None,
                    detail: "No audio URL in response".to_string(),
                }),
            },
            Err(e) => StrategyOutcome::Retryable(SynthesisError::vendor("sync_synthesis", e)),
        }
    }
}

/// Clip creation under the account's first project, then fixed-interval polling
pub struct AsyncPollingStrategy {
    tts_repo: Arc<dyn TtsRepository>,
    sample_rate: u32,
    output_format: String,
    poller: ClipPoller,
}

impl AsyncPollingStrategy {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, settings: &SynthesisSettings) -> Self {
        Self {
            poller: ClipPoller::new(
                tts_repo.clone(),
                settings.poll_interval,
                settings.max_poll_attempts,
            ),
            tts_repo,
            sample_rate: settings.sample_rate,
            output_format: settings.output_format.clone(),
        }
    }

    async fn resolve_project(&self) -> Result<String, SynthesisError> {
        let projects = self
            .tts_repo
            .list_projects()
            .await
            .map_err(|e| SynthesisError::vendor("list_projects", e))?;

        projects
            .into_iter()
            .next()
            .map(|p| p.id)
            .ok_or(SynthesisError::NoProjectConfigured)
    }

    async fn run(&self, job: SynthesisJob<'_>) -> Result<AudioUrl, SynthesisError> {
        let project_id = self.resolve_project().await?;

        let params = SpeechParams {
            voice_id: job.voice_id,
            text: job.text,
            sample_rate: self.sample_rate,
            output_format: &self.output_format,
        };

        let clip = self
            .tts_repo
            .create_clip(&project_id, params)
            .await
            .map_err(|e| SynthesisError::vendor("create_clip", e))?;

        tracing::info!(
            project_id = %project_id,
            clip_id = %clip.clip_id,
            "Clip submitted"
        );

        self.poller.run(clip).await
    }
}

#[async_trait]
impl SynthesisStrategy for AsyncPollingStrategy {
    fn name(&self) -> &'static str {
        "async_polling"
    }

    async fn attempt(&self, job: SynthesisJob<'_>) -> StrategyOutcome {
        match self.run(job).await {
            Ok(url) => StrategyOutcome::Success(url),
            Err(err) => StrategyOutcome::Fatal(err),
        }
    }
}
