use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::protocol::{JsonRpcRequest, RpcId};
use crate::sse;

/// Request ids are unique for the lifetime of the process, across clients.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate the next JSON-RPC request id.
pub fn next_request_id() -> RpcId {
    RpcId::Number(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed) as i64)
}

/// Why a call to Paper did not produce a result.
///
/// The `Display` text is what the agent ends up seeing, so every variant
/// reads as a complete sentence on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error(
        "Paper is not running (could not connect to {endpoint}). \
         Open the Paper desktop app and try again."
    )]
    Unreachable { endpoint: String },
    #[error("Paper MCP request failed: HTTP {status}{}", with_leading_space(.reason))]
    Http { status: u16, reason: String },
    #[error("{message}")]
    Remote { code: Option<i64>, message: String },
    #[error("Paper MCP request was aborted (timed out or cancelled)")]
    Aborted,
    #[error("Invalid response from Paper MCP: {0}")]
    InvalidResponse(String),
    #[error("Paper MCP request failed: {0}")]
    Transport(String),
}

fn with_leading_space(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}

/// Reply envelope as read on the client side.
///
/// Replies are paired with requests by the HTTP exchange, so `id` is ignored,
/// and `error` is kept as raw JSON so a malformed error object still surfaces.
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl Reply {
    fn into_result(self) -> Result<Value, CallError> {
        match self.error {
            Some(error) => Err(remote_error(error)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

fn remote_error(error: Value) -> CallError {
    let code = error.get("code").and_then(Value::as_i64);
    let message = match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    };
    CallError::Remote { code, message }
}

/// JSON-RPC client for Paper's local MCP endpoint.
///
/// Stateless apart from the shared HTTP connection pool: every call is one
/// POST with its own id, deadline and optional cancellation token.
#[derive(Debug, Clone)]
pub struct PaperClient {
    http: reqwest::Client,
    endpoint: String,
    call_timeout: Duration,
    probe_timeout: Duration,
}

impl PaperClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CallError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| CallError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            call_timeout: config.call_timeout,
            probe_timeout: config.probe_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Invoke a remote Paper method through `tools/call`.
    ///
    /// The configured timeout bounds the whole exchange, body read included.
    /// If `cancel` fires first the in-flight request is dropped; both cases
    /// surface as [`CallError::Aborted`].
    pub async fn call(
        &self,
        method: &str,
        arguments: Map<String, Value>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Value, CallError> {
        let request = JsonRpcRequest::new(
            next_request_id(),
            "tools/call",
            Some(serde_json::json!({
                "name": method,
                "arguments": arguments,
            })),
        );
        debug!(id = ?request.id, method, "calling Paper");

        let cancelled = async {
            match cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        let outcome = tokio::select! {
            res = tokio::time::timeout(self.call_timeout, self.exchange(&request)) => {
                res.unwrap_or(Err(CallError::Aborted))
            }
            _ = cancelled => Err(CallError::Aborted),
        };

        if let Err(err) = &outcome {
            warn!(method, error = %err, "Paper call failed");
        }
        outcome
    }

    async fn exchange(&self, request: &JsonRpcRequest) -> Result<Value, CallError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CallError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;
        let json = sse::parse_body(&body).map_err(|e| CallError::InvalidResponse(e.to_string()))?;
        let reply: Reply =
            serde_json::from_value(json).map_err(|e| CallError::InvalidResponse(e.to_string()))?;
        reply.into_result()
    }

    fn classify(&self, err: reqwest::Error) -> CallError {
        if err.is_connect() {
            CallError::Unreachable {
                endpoint: self.endpoint.clone(),
            }
        } else if err.is_timeout() {
            CallError::Aborted
        } else {
            CallError::Transport(err.to_string())
        }
    }
}
