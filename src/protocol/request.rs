use serde::{Deserialize, Serialize};

/// MCP protocol revision spoken on both sides of the bridge.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RpcId, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: Some(id),
            method: method.into(),
            params,
        }
    }
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<serde_json::Value>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

impl InitializeParams {
    /// Params this crate sends when it is the initiating side.
    pub fn for_this_client() -> Self {
        Self {
            protocol_version: Some(PROTOCOL_VERSION.into()),
            capabilities: Some(serde_json::json!({})),
            client_info: Some(ClientInfo {
                name: Some(env!("CARGO_PKG_NAME").into()),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
        }
    }
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

/// Parameters for `notifications/cancelled`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelledParams {
    #[serde(rename = "requestId")]
    pub request_id: RpcId,
    pub reason: Option<String>,
}

/// Parameters for `prompts/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetPromptParams {
    pub name: String,
}
