//! Mock Paper MCP endpoint for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use paper_mcp_tools::client::PaperClient;
use paper_mcp_tools::config::ClientConfig;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// How the mock answers one request.
pub enum Reply {
    Json(Value),
    Sse(Value),
    Status(u16),
    Delayed(Duration, Value),
}

type ReplyFn = dyn Fn(&Value) -> Reply + Send + Sync;

#[derive(Clone)]
struct MockState {
    received: Arc<Mutex<Vec<Value>>>,
    reply: Arc<ReplyFn>,
}

pub struct MockPaper {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
    task: JoinHandle<()>,
}

impl MockPaper {
    pub async fn start(reply: impl Fn(&Value) -> Reply + Send + Sync + 'static) -> Self {
        let st = MockState {
            received: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(reply),
        };

        let app = Router::new().route("/mcp", post(handle)).with_state(st.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{addr}/mcp"),
            received: st.received,
            task,
        }
    }

    /// Mock that answers every `tools/call` with a single text block.
    pub async fn echo_ok() -> Self {
        Self::start(|req| Reply::Json(success(req, text_result("ok")))).await
    }

    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }

    pub fn client(&self) -> Arc<PaperClient> {
        Arc::new(PaperClient::new(&ClientConfig::with_endpoint(self.url.clone())).unwrap())
    }
}

impl Drop for MockPaper {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(State(st): State<MockState>, body: String) -> Response {
    let req: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    st.received.lock().await.push(req.clone());

    match (st.reply)(&req) {
        Reply::Json(v) => json_response(&v),
        Reply::Sse(v) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/event-stream")],
            format!("event: message\ndata: {v}\n\n"),
        )
            .into_response(),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            [(header::CONTENT_TYPE, "text/plain")],
            "mock says no",
        )
            .into_response(),
        Reply::Delayed(delay, v) => {
            tokio::time::sleep(delay).await;
            json_response(&v)
        }
    }
}

fn json_response(v: &Value) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        v.to_string(),
    )
        .into_response()
}

/// JSON-RPC success envelope echoing the request id.
pub fn success(req: &Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": req["id"], "result": result })
}

/// JSON-RPC error envelope echoing the request id.
pub fn failure(req: &Value, code: i32, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": req["id"], "error": { "code": code, "message": message } })
}

pub fn text_result(text: &str) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

/// Client config for a loopback port nothing listens on.
pub fn closed_port_config() -> ClientConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ClientConfig::with_endpoint(format!("http://127.0.0.1:{port}/mcp"))
}
