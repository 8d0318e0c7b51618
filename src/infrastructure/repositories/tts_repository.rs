use crate::domain::tts::{ClipJob, VendorProject, VendorVoice};
use async_trait::async_trait;

/// Failure talking to the speech vendor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VendorError {
    #[error("vendor returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl VendorError {
    pub fn status(&self) -> Option<u16> {
        match self {
            VendorError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Parameters for both the synchronous call and clip creation
#[derive(Debug, Clone)]
pub struct SpeechParams<'a> {
    pub voice_id: &'a str,
    pub text: &'a str,
    pub sample_rate: u32,
    pub output_format: &'a str,
}

/// Repository for the third-party speech vendor.
/// Abstracts the vendor's two synthesis mechanisms (synchronous and clip jobs)
/// and the account listings they depend on.
///
/// Implementations are responsible for:
/// - Authentication and wire format
/// - Unwrapping the vendor's response envelopes
/// - Reporting non-2xx responses with status and body
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// First page of voices configured on the account
    async fn list_voices(&self) -> Result<Vec<VendorVoice>, VendorError>;

    /// Synthesize within one request/response cycle.
    ///
    /// Returns `Ok(None)` when the vendor answered successfully but did not
    /// include an audio URL.
    async fn synthesize_sync(&self, params: SpeechParams<'_>) -> Result<Option<String>, VendorError>;

    /// First page of projects on the account
    async fn list_projects(&self) -> Result<Vec<VendorProject>, VendorError>;

    /// Submit an asynchronous clip under a project
    async fn create_clip(
        &self,
        project_id: &str,
        params: SpeechParams<'_>,
    ) -> Result<ClipJob, VendorError>;

    /// Current state of a previously created clip
    async fn get_clip(&self, project_id: &str, clip_id: &str) -> Result<ClipJob, VendorError>;
}
