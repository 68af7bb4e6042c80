use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::adapter::ToolSet;
use crate::protocol::{ToolCallParams, ToolResult};
use crate::schema::validate_arguments;

/// Handle a `tools/call` request.
///
/// Unknown tools and arguments that violate the tool's input schema are
/// answered with an `isError` result without contacting Paper.
pub async fn handle(
    params: ToolCallParams,
    tools: &ToolSet,
    call_id: &str,
    cancel: CancellationToken,
) -> ToolResult {
    let Some(tool) = tools.get(&params.name) else {
        return ToolResult::error(format!("Unknown tool: {}", params.name));
    };

    let arguments = match params.arguments {
        Some(Value::Null) | None => Value::Object(Default::default()),
        Some(v) => v,
    };

    if let Err(e) = validate_arguments(tool.input_schema(), &arguments) {
        debug!(tool = %params.name, error = %e, "rejected tool arguments");
        return ToolResult::error(format!("{} rejected: {e}", params.name));
    }

    tool.execute(call_id, Some(arguments), Some(cancel)).await.into()
}
