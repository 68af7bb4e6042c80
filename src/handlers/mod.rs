pub mod call_tool;
pub mod list_tools;
pub mod prompts;

use tokio_util::sync::CancellationToken;

use crate::adapter::ToolSet;
use crate::protocol::{
    GetPromptParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, ToolCallParams,
    PROTOCOL_VERSION,
};

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required). `cancel` is
/// handed to the tool when the request is a `tools/call`.
pub async fn dispatch(
    req: &JsonRpcRequest,
    tools: &ToolSet,
    cancel: CancellationToken,
) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "prompts": {}
                },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" | "notifications/cancelled" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            list_tools::handle(tools),
        )),

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req, "tools/call") {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(req.id.clone(), e)),
            };

            let call_id = call_id(req.id.as_ref());
            let tool_result = call_tool::handle(params, tools, &call_id, cancel).await;
            Some(match serde_json::to_value(&tool_result) {
                Ok(v) => JsonRpcResponse::success(req.id.clone(), v),
                Err(e) => JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Cannot serialize tool result: {e}")),
                ),
            })
        }

        "prompts/list" => Some(JsonRpcResponse::success(req.id.clone(), prompts::list())),

        "prompts/get" => {
            let params: GetPromptParams = match parse_params(req, "prompts/get") {
                Ok(p) => p,
                Err(e) => return Some(JsonRpcResponse::error(req.id.clone(), e)),
            };
            Some(match prompts::get(params, tools) {
                Ok(v) => JsonRpcResponse::success(req.id.clone(), v),
                Err(e) => JsonRpcResponse::error(req.id.clone(), e),
            })
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    req: &JsonRpcRequest,
    method: &str,
) -> Result<T, JsonRpcError> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid {method} params: {e}"))),
        None => Err(JsonRpcError::invalid_params(format!(
            "Missing params for {method}"
        ))),
    }
}

fn call_id(id: Option<&RpcId>) -> String {
    match id {
        Some(RpcId::Number(n)) => n.to_string(),
        Some(RpcId::Str(s)) => s.clone(),
        None => "notification".to_string(),
    }
}
