use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::client::{next_request_id, PaperClient};
use crate::protocol::{InitializeParams, JsonRpcRequest};

/// Best-effort check that Paper is listening on its MCP endpoint.
///
/// Sends a bare `initialize` and reports whether the HTTP status was 2xx.
/// Refused connections, timeouts and error statuses all read as "not reachable".
pub async fn is_remote_reachable(client: &PaperClient) -> bool {
    let params = match serde_json::to_value(InitializeParams::for_this_client()) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let request = JsonRpcRequest::new(next_request_id(), "initialize", Some(params));

    let send = client
        .http()
        .post(client.endpoint())
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json, text/event-stream")
        .json(&request)
        .send();

    match tokio::time::timeout(client.probe_timeout(), send).await {
        Ok(Ok(resp)) => resp.status().is_success(),
        Ok(Err(e)) => {
            debug!(error = %e, "Paper probe failed");
            false
        }
        Err(_) => {
            debug!("Paper probe timed out after {:?}", client.probe_timeout());
            false
        }
    }
}
