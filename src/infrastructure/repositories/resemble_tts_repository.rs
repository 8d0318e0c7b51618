use super::tts_repository::{SpeechParams, TtsRepository, VendorError};
use crate::domain::tts::{ClipJob, VendorProject, VendorVoice};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://app.resemble.ai/api/v2";

/// Listings only ever look at the first page
const LIST_QUERY: [(&str, &str); 2] = [("page", "1"), ("page_size", "10")];

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Single objects come back either wrapped in `item` or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { item: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { item } => item,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VoicePayload {
    uuid: String,
    name: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    uuid: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SyncClipPayload {
    audio_src: Option<String>,
}

/// Status responses may omit the uuid; creation responses must carry it
#[derive(Debug, Deserialize)]
struct ClipPayload {
    uuid: Option<String>,
    audio_src: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct SyncClipBody<'a> {
    voice_uuid: &'a str,
    body: &'a str,
    sample_rate: u32,
    output_format: &'a str,
    precision: &'static str,
}

#[derive(Debug, Serialize)]
struct CreateClipBody<'a> {
    voice_uuid: &'a str,
    body: &'a str,
    is_public: bool,
    sample_rate: u32,
    output_format: &'a str,
}

/// Resemble-style REST implementation of the TTS repository
pub struct ResembleTtsRepository {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl ResembleTtsRepository {
    pub fn new(http_client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Send the request and decode a 2xx body, capturing status and body otherwise
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<T, VendorError> {
        let start_time = std::time::Instant::now();

        let response = self.authorized(builder).send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Speech vendor request could not be sent");
            VendorError::Transport(e.to_string())
        })?;

        let response = Self::ensure_success(operation, response).await?;

        let payload = response.json::<T>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to decode speech vendor response");
            VendorError::Decode(e.to_string())
        })?;

        tracing::debug!(
            operation,
            latency_ms = start_time.elapsed().as_millis(),
            "Speech vendor request completed"
        );

        Ok(payload)
    }

    async fn ensure_success(operation: &'static str, response: Response) -> Result<Response, VendorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!(
            operation,
            status = status.as_u16(),
            body = %body,
            "Speech vendor returned an error"
        );

        Err(VendorError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Blank `audio_src` means the audio is not ready yet
fn non_blank(audio_src: Option<String>) -> Option<String> {
    audio_src.filter(|url| !url.trim().is_empty())
}

fn clip_for_project(project_id: &str, clip_id: String, payload: ClipPayload) -> ClipJob {
    ClipJob {
        project_id: project_id.to_string(),
        clip_id,
        audio_url: non_blank(payload.audio_src),
        status: payload.status,
    }
}

#[async_trait]
impl TtsRepository for ResembleTtsRepository {
    async fn list_voices(&self) -> Result<Vec<VendorVoice>, VendorError> {
        let page: Page<VoicePayload> = self
            .execute(
                "list_voices",
                self.http_client.get(self.url("/voices")).query(&LIST_QUERY),
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|v| VendorVoice {
                id: v.uuid,
                name: v.name,
                status: v.status,
            })
            .collect())
    }

    async fn synthesize_sync(&self, params: SpeechParams<'_>) -> Result<Option<String>, VendorError> {
        let body = SyncClipBody {
            voice_uuid: params.voice_id,
            body: params.text,
            sample_rate: params.sample_rate,
            output_format: params.output_format,
            precision: "PCM_16",
        };

        let clip: Envelope<SyncClipPayload> = self
            .execute(
                "sync_synthesis",
                self.http_client.post(self.url("/clips/sync")).json(&body),
            )
            .await?;

        Ok(non_blank(clip.into_inner().audio_src))
    }

    async fn list_projects(&self) -> Result<Vec<VendorProject>, VendorError> {
        let page: Page<ProjectPayload> = self
            .execute(
                "list_projects",
                self.http_client.get(self.url("/projects")).query(&LIST_QUERY),
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|p| VendorProject {
                id: p.uuid,
                name: p.name,
            })
            .collect())
    }

    async fn create_clip(
        &self,
        project_id: &str,
        params: SpeechParams<'_>,
    ) -> Result<ClipJob, VendorError> {
        let body = CreateClipBody {
            voice_uuid: params.voice_id,
            body: params.text,
            is_public: false,
            sample_rate: params.sample_rate,
            output_format: params.output_format,
        };

        let clip: Envelope<ClipPayload> = self
            .execute(
                "create_clip",
                self.http_client
                    .post(self.url(&format!("/projects/{}/clips", project_id)))
                    .json(&body),
            )
            .await?;

        let clip = clip.into_inner();
        let clip_id = clip.uuid.clone().ok_or_else(|| {
            tracing::error!(project_id, "Speech vendor created a clip without a uuid");
            VendorError::Decode("created clip has no uuid".to_string())
        })?;

        Ok(clip_for_project(project_id, clip_id, clip))
    }

    async fn get_clip(&self, project_id: &str, clip_id: &str) -> Result<ClipJob, VendorError> {
        let clip: Envelope<ClipPayload> = self
            .execute(
                "get_clip",
                self.http_client
                    .get(self.url(&format!("/projects/{}/clips/{}", project_id, clip_id))),
            )
            .await?;

        Ok(clip_for_project(project_id, clip_id.to_string(), clip.into_inner()))
    }
}
