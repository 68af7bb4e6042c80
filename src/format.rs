use serde::Deserialize;
use serde_json::Value;

use crate::protocol::ContentBlock;

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// One entry of a remote `result.content` array, as Paper may send it.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RemoteContent {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: Option<String>,
    },
    #[serde(other)]
    Unrecognized,
}

impl RemoteContent {
    fn parse(item: &Value) -> Self {
        Self::deserialize(item).unwrap_or(Self::Unrecognized)
    }

    fn into_block(self) -> Option<ContentBlock> {
        match self {
            Self::Text { text } => Some(ContentBlock::Text { text }),
            Self::Image { data, mime_type } => Some(ContentBlock::Image {
                data,
                mime_type: mime_type.unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            }),
            Self::Unrecognized => None,
        }
    }
}

/// Normalize a raw `tools/call` result into content blocks.
///
/// Never returns an empty vector: anything without recognizable content is
/// rendered as a single pretty-printed JSON text block.
pub fn format_result(raw: &Value) -> Vec<ContentBlock> {
    let blocks: Vec<ContentBlock> = match raw.get("content").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| RemoteContent::parse(item).into_block())
            .collect(),
        None => Vec::new(),
    };

    if blocks.is_empty() {
        vec![raw_json_block(raw)]
    } else {
        blocks
    }
}

fn raw_json_block(raw: &Value) -> ContentBlock {
    let text = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    ContentBlock::text(text)
}
