#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

/// Send `body` to `POST /translate` as JSON and return status plus decoded body
pub async fn post_translate(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// What the stub provider saw for one call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// OpenAI-compatible chat-completions endpoint served from a local port
pub struct StubProvider {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubProvider {
    /// Answer every call with `status` and the raw `reply` body
    pub async fn start(status: StatusCode, reply: impl Into<String>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply: reply.into(),
            calls: calls.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(stub_completion))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            calls,
        }
    }

    /// Successful completion whose first choice carries `content`
    pub async fn replying(content: &str) -> Self {
        let reply = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        });
        Self::start(StatusCode::OK, reply.to_string()).await
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn stub_completion(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    state
        .calls
        .lock()
        .unwrap()
        .push(RecordedCall { authorization, body });

    (
        state.status,
        [("content-type", "application/json")],
        state.reply.clone(),
    )
}
