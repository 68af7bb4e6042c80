pub mod request;
pub mod response;

pub use request::{
    CancelledParams, ClientInfo, GetPromptParams, InitializeParams, JsonRpcRequest, RpcId,
    ToolCallParams, PROTOCOL_VERSION,
};
pub use response::{ContentBlock, JsonRpcError, JsonRpcResponse, ToolResult};
