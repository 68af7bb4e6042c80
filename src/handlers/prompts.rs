use serde_json::{json, Value};

use crate::adapter::ToolSet;
use crate::prompt::{guidelines, GUIDELINES_PROMPT};
use crate::protocol::{GetPromptParams, JsonRpcError};

/// Handle `prompts/list`.
pub fn list() -> Value {
    json!({
        "prompts": [
            {
                "name": GUIDELINES_PROMPT,
                "description": "How to drive the Paper design app with the paper_* tools"
            }
        ]
    })
}

/// Handle `prompts/get`.
pub fn get(params: GetPromptParams, tools: &ToolSet) -> Result<Value, JsonRpcError> {
    if params.name != GUIDELINES_PROMPT {
        return Err(JsonRpcError::invalid_params(format!(
            "Unknown prompt: {}",
            params.name
        )));
    }

    Ok(json!({
        "description": "How to drive the Paper design app with the paper_* tools",
        "messages": [
            {
                "role": "user",
                "content": { "type": "text", "text": guidelines(tools) }
            }
        ]
    }))
}
