use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const TEST_API_KEY: &str = "test-resemble-api-key";
pub const SYNC_AUDIO_URL: &str = "https://cdn.vendor.test/sync.mp3";
pub const CLIP_AUDIO_URL: &str = "https://cdn.vendor.test/clip.mp3";
pub const VENDOR_ERROR_BODY: &str = "vendor internal failure: trace id 0xdeadbeef";

/// Scripted behavior and call log of the mock vendor
pub struct MockVendorState {
    pub voices: Vec<Value>,
    pub voices_status: StatusCode,
    pub sync_status: StatusCode,
    pub sync_audio: Option<String>,
    pub projects: Vec<Value>,
    pub create_audio: Option<String>,
    /// 1-based poll that first carries the audio URL
    pub ready_on_poll: Option<u32>,
    /// 1-based poll that reports the clip as failed
    pub failed_on_poll: Option<u32>,

    pub voices_calls: u32,
    pub sync_calls: u32,
    pub projects_calls: u32,
    pub create_calls: u32,
    pub poll_calls: u32,
    pub unauthorized_calls: u32,
    pub sync_bodies: Vec<Value>,
    pub create_bodies: Vec<Value>,
}

impl Default for MockVendorState {
    fn default() -> Self {
        Self {
            voices: vec![
                json!({ "uuid": "voice-1", "name": "Narrator", "status": "finished" }),
                json!({ "uuid": "voice-2", "name": "Backup", "status": "finished" }),
            ],
            voices_status: StatusCode::OK,
            sync_status: StatusCode::OK,
            sync_audio: Some(SYNC_AUDIO_URL.to_string()),
            projects: vec![json!({ "uuid": "project-1", "name": "Portfolio" })],
            create_audio: None,
            ready_on_poll: Some(1),
            failed_on_poll: None,
            voices_calls: 0,
            sync_calls: 0,
            projects_calls: 0,
            create_calls: 0,
            poll_calls: 0,
            unauthorized_calls: 0,
            sync_bodies: Vec::new(),
            create_bodies: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<MockVendorState>>;

pub struct MockVendor {
    pub base_url: String,
    state: Shared,
}

impl MockVendor {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockVendorState::default()));

        let app = Router::new()
            .route("/api/v2/voices", get(list_voices))
            .route("/api/v2/clips/sync", post(sync_clip))
            .route("/api/v2/projects", get(list_projects))
            .route("/api/v2/projects/:project/clips", post(create_clip))
            .route("/api/v2/projects/:project/clips/:clip", get(get_clip))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock vendor");
        let addr = listener.local_addr().expect("Failed to get mock vendor addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api/v2", addr),
            state,
        }
    }

    /// Change the scripted behavior
    pub fn configure(&self, configure: impl FnOnce(&mut MockVendorState)) {
        configure(&mut self.state.lock());
    }

    /// Read the call log
    pub fn inspect<T>(&self, read: impl FnOnce(&MockVendorState) -> T) -> T {
        read(&self.state.lock())
    }
}

fn authorized(state: &mut MockVendorState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TEST_API_KEY);
    let ok = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !ok {
        state.unauthorized_calls += 1;
    }
    ok
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "invalid api key").into_response()
}

async fn list_voices(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock();
    if !authorized(&mut state, &headers) {
        return unauthorized();
    }
    state.voices_calls += 1;

    if state.voices_status != StatusCode::OK {
        return (state.voices_status, VENDOR_ERROR_BODY).into_response();
    }
    Json(json!({ "success": true, "page": 1, "items": state.voices })).into_response()
}

async fn sync_clip(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock();
    if !authorized(&mut state, &headers) {
        return unauthorized();
    }
    state.sync_calls += 1;
    state.sync_bodies.push(body);

    if state.sync_status != StatusCode::OK {
        return (state.sync_status, VENDOR_ERROR_BODY).into_response();
    }
    Json(json!({ "success": true, "item": { "audio_src": state.sync_audio } })).into_response()
}

async fn list_projects(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock();
    if !authorized(&mut state, &headers) {
        return unauthorized();
    }
    state.projects_calls += 1;
    Json(json!({ "success": true, "page": 1, "items": state.projects })).into_response()
}

async fn create_clip(
    State(state): State<Shared>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock();
    if !authorized(&mut state, &headers) {
        return unauthorized();
    }
    state.create_calls += 1;
    state.create_bodies.push(body);

    Json(json!({
        "success": true,
        "item": {
            "uuid": format!("{}-clip-{}", project, state.create_calls),
            "status": "pending",
            "audio_src": state.create_audio,
        }
    }))
    .into_response()
}

async fn get_clip(
    State(state): State<Shared>,
    Path((_project, _clip)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock();
    if !authorized(&mut state, &headers) {
        return unauthorized();
    }
    state.poll_calls += 1;

    let failed = state.failed_on_poll == Some(state.poll_calls);
    let ready = !failed
        && state
            .ready_on_poll
            .is_some_and(|ready| state.poll_calls >= ready);
    let status = match (failed, ready) {
        (true, _) => "failed",
        (_, true) => "finished",
        _ => "pending",
    };
    // Pending clips report a blank audio_src; status bodies carry no uuid
    let audio_src = if ready { CLIP_AUDIO_URL } else { "" };

    Json(json!({
        "success": true,
        "item": { "status": status, "audio_src": audio_src }
    }))
    .into_response()
}
