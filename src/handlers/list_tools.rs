use serde_json::{json, Value};

use crate::adapter::ToolSet;

/// Handle `tools/list`: advertise every tool in the set, in order.
pub fn handle(tools: &ToolSet) -> Value {
    let listed: Vec<Value> = tools
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "title": tool.label(),
                "description": tool.description(),
                "inputSchema": tool.input_schema(),
                "annotations": {
                    "readOnlyHint": tool.read_only()
                }
            })
        })
        .collect();

    json!({ "tools": listed })
}
