//! Stub advisor backend for end-to-end tests.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use domain::{RequestPayload, ResponsePayload};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// What the stub answers on the chat route.
#[derive(Debug, Clone)]
pub enum StubReply {
    Json(ResponsePayload),
    Raw { status: u16, body: String },
}

impl StubReply {
    pub fn text(reply: &str) -> Self {
        Self::Json(ResponsePayload::text(reply))
    }
}

#[derive(Debug)]
pub struct StubState {
    reply: Mutex<StubReply>,
    requests: Mutex<Vec<RequestPayload>>,
    healthy: bool,
}

impl StubState {
    pub fn requests(&self) -> Vec<RequestPayload> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_reply(&self, reply: StubReply) {
        *self.reply.lock().unwrap() = reply;
    }
}

pub struct StubBackend {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub fn chat_url(&self) -> String {
        format!("http://{}/api/chat/respond", self.addr)
    }
}

/// Start a healthy stub on an ephemeral port.
pub async fn start_stub(reply: StubReply) -> StubBackend {
    start_stub_with_health(reply, true).await
}

pub async fn start_stub_with_health(reply: StubReply, healthy: bool) -> StubBackend {
    let state = Arc::new(StubState {
        reply: Mutex::new(reply),
        requests: Mutex::new(Vec::new()),
        healthy,
    });

    let app = Router::new()
        .route("/api/chat/respond", post(respond))
        .route("/health", get(health))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubBackend { addr, state }
}

async fn respond(
    State(state): State<Arc<StubState>>,
    Json(request): Json<RequestPayload>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(request);
    let (status, body) = match state.reply.lock().unwrap().clone() {
        StubReply::Json(payload) => (200, serde_json::to_string(&payload).unwrap()),
        StubReply::Raw { status, body } => (status, body),
    };
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

async fn health(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    let status = if state.healthy { "ok" } else { "degraded" };
    Json(serde_json::json!({ "status": status }))
}
