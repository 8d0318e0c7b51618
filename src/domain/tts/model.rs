use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playable audio location returned by the vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioUrl(String);

impl AudioUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Vendor payloads mark "not ready" with a missing or blank URL
    pub fn from_vendor(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|url| !url.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AudioUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single synthesis call as seen by the service
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    /// Overrides the default voice when present
    pub voice_id: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
        }
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }
}

/// Voice entry from the vendor's voice listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorVoice {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorProject {
    pub id: String,
    pub name: Option<String>,
}

/// Vendor-side asynchronous clip, as returned by creation and status calls
#[derive(Debug, Clone, PartialEq)]
pub struct ClipJob {
    pub project_id: String,
    pub clip_id: String,
    pub audio_url: Option<String>,
    pub status: Option<String>,
}

impl ClipJob {
    /// Vendor marked the render as failed; further polling is pointless.
    pub fn has_failed(&self) -> bool {
        matches!(
            self.status.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("failed") | Some("error")
        )
    }
}

/// Knobs shared by both synthesis strategies
#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    pub sample_rate: u32,
    pub output_format: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub max_text_chars: usize,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            output_format: "mp3".to_string(),
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 20,
            max_text_chars: 3000,
        }
    }
}
