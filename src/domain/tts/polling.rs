use super::error::SynthesisError;
use super::model::{AudioUrl, ClipJob};
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of an asynchronous clip
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Submitted(ClipJob),
    Polling { job: ClipJob, attempts: u32 },
    Ready(AudioUrl),
    TimedOut { attempts: u32 },
    Failed(SynthesisError),
}

/// Drives a submitted clip to a terminal state.
///
/// Every poll waits the same fixed interval before checking, and the number of
/// polls never exceeds `max_attempts`. There is no backoff.
pub struct ClipPoller {
    tts_repo: Arc<dyn TtsRepository>,
    interval: Duration,
    max_attempts: u32,
}

impl ClipPoller {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, interval: Duration, max_attempts: u32) -> Self {
        Self {
            tts_repo,
            interval,
            max_attempts,
        }
    }

    pub async fn run(&self, job: ClipJob) -> Result<AudioUrl, SynthesisError> {
        let mut state = JobState::Submitted(job);

        loop {
            state = match self.step(state).await {
                JobState::Ready(url) => return Ok(url),
                JobState::TimedOut { attempts } => {
                    tracing::warn!(attempts, "Clip polling budget exhausted");
                    return Err(SynthesisError::SynthesisTimeout { attempts });
                }
                JobState::Failed(err) => return Err(err),
                pending => pending,
            };
        }
    }

    async fn step(&self, state: JobState) -> JobState {
        match state {
            JobState::Submitted(job) => {
                if let Some(url) = AudioUrl::from_vendor(job.audio_url.as_deref()) {
                    tracing::info!(clip_id = %job.clip_id, "Clip audio ready on creation");
                    JobState::Ready(url)
                } else if job.has_failed() {
                    JobState::Failed(clip_failed(&job))
                } else {
                    JobState::Polling { job, attempts: 0 }
                }
            }
            JobState::Polling { attempts, .. } if attempts >= self.max_attempts => {
                JobState::TimedOut { attempts }
            }
            JobState::Polling { job, attempts } => self.poll_once(job, attempts + 1).await,
            terminal => terminal,
        }
    }

    async fn poll_once(&self, job: ClipJob, attempt: u32) -> JobState {
        tokio::time::sleep(self.interval).await;

        match self.tts_repo.get_clip(&job.project_id, &job.clip_id).await {
            Ok(clip) => {
                if let Some(url) = AudioUrl::from_vendor(clip.audio_url.as_deref()) {
                    tracing::info!(clip_id = %job.clip_id, attempt, "Clip audio ready");
                    JobState::Ready(url)
                } else if clip.has_failed() {
                    JobState::Failed(clip_failed(&clip))
                } else {
                    tracing::debug!(
                        clip_id = %job.clip_id,
                        attempt,
                        status = ?clip.status,
                        "Clip still rendering"
                    );
                    JobState::Polling { job, attempts: attempt }
                }
            }
            Err(e) => {
                // A failed status check still spends one attempt
                tracing::warn!(clip_id = %job.clip_id, attempt, error = %e, "Clip status check failed");
                JobState::Polling { job, attempts: attempt }
            }
        }
    }
}

fn clip_failed(clip: &ClipJob) -> SynthesisError {
    SynthesisError::VendorRequestFailed {
        operation: "get_clip",
        status: None,
        detail: format!(
            "clip {} reported status {}",
            clip.clip_id,
            clip.status.as_deref().unwrap_or("unknown")
        ),
    }
}
