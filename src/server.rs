use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapter::ToolSet;
use crate::handlers;
use crate::protocol::{CancelledParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize response: {0}")]
    Json(#[from] serde_json::Error),
}

type InFlight = Arc<Mutex<HashMap<RpcId, CancellationToken>>>;

/// MCP server that exposes the Paper tools over newline-delimited JSON-RPC 2.0.
///
/// `tools/call` requests run as separate tasks so that `notifications/cancelled`
/// and other requests are served while Paper is working. All responses go
/// through one writer task.
pub struct McpServer {
    tools: Arc<ToolSet>,
    initialized: bool,
    in_flight: InFlight,
}

impl McpServer {
    pub fn new(tools: ToolSet) -> Self {
        Self {
            tools: Arc::new(tools),
            initialized: false,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!(tools = self.tools.len(), "serving Paper tools on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve on an arbitrary transport until `input` reaches EOF.
    ///
    /// Waits for in-flight tool calls to finish before returning.
    pub async fn serve<R, W>(&mut self, input: R, output: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer = tokio::spawn(write_responses(output, rx));
        let mut calls = JoinSet::new();

        let mut reader = BufReader::new(input);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            // Reap finished calls so the set does not grow unbounded.
            while calls.try_join_next().is_some() {}

            if n > MAX_MESSAGE_BYTES {
                warn!("Message too large: {n} bytes (limit {MAX_MESSAGE_BYTES})");
                let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Parse error: {e}");
                    let _ = tx.send(JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            // Validate jsonrpc version
            if req.jsonrpc != "2.0" {
                let _ = tx.send(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request(),
                ));
                continue;
            }

            // Initialization gate: only `initialize` is allowed before handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                let _ = tx.send(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_request_with("Server not initialized"),
                ));
                continue;
            }

            if req.method == "notifications/cancelled" {
                self.cancel(&req).await;
                continue;
            }

            if req.method == "tools/call" {
                self.spawn_call(req, &mut calls, tx.clone()).await;
                continue;
            }

            if let Some(resp) =
                handlers::dispatch(&req, &self.tools, CancellationToken::new()).await
            {
                let _ = tx.send(resp);
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        while calls.join_next().await.is_some() {}
        drop(tx);

        match writer.await {
            Ok(res) => res,
            Err(join_err) => {
                warn!("Writer task failed: {join_err}");
                Ok(())
            }
        }
    }

    async fn spawn_call(
        &self,
        req: JsonRpcRequest,
        calls: &mut JoinSet<()>,
        tx: mpsc::UnboundedSender<JsonRpcResponse>,
    ) {
        let token = CancellationToken::new();
        if let Some(id) = &req.id {
            self.in_flight.lock().await.insert(id.clone(), token.clone());
        }

        let tools = Arc::clone(&self.tools);
        let in_flight = Arc::clone(&self.in_flight);
        calls.spawn(async move {
            let resp = handlers::dispatch(&req, &tools, token.clone()).await;
            if let Some(id) = &req.id {
                in_flight.lock().await.remove(id);
            }

            // A cancelled request gets no response.
            if token.is_cancelled() {
                debug!(id = ?req.id, "tool call cancelled by client");
                return;
            }
            if let Some(resp) = resp {
                let _ = tx.send(resp);
            }
        });
    }

    async fn cancel(&self, req: &JsonRpcRequest) {
        let Some(params) = req
            .params
            .clone()
            .and_then(|v| serde_json::from_value::<CancelledParams>(v).ok())
        else {
            return;
        };

        if let Some(token) = self.in_flight.lock().await.get(&params.request_id) {
            debug!(id = ?params.request_id, reason = ?params.reason, "cancelling tool call");
            token.cancel();
        }
    }
}

async fn write_responses<W>(
    mut output: W,
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(resp) = rx.recv().await {
        let out = serde_json::to_string(&resp)?;
        output.write_all(out.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
