use paper_mcp_tools::format::format_result;
use paper_mcp_tools::protocol::ContentBlock;
use serde_json::json;

#[test]
fn keeps_text_and_image_and_drops_unknown_items() {
    let raw = json!({
        "content": [
            { "type": "text", "text": "hello" },
            { "type": "image", "data": "AAA", "mimeType": "image/png" },
            { "type": "bogus" }
        ]
    });

    let blocks = format_result(&raw);
    assert_eq!(
        blocks,
        vec![
            ContentBlock::Text { text: "hello".into() },
            ContentBlock::Image {
                data: "AAA".into(),
                mime_type: "image/png".into()
            },
        ]
    );
}

#[test]
fn empty_content_falls_back_to_pretty_json() {
    let raw = json!({ "content": [] });
    let blocks = format_result(&raw);
    assert_eq!(
        blocks,
        vec![ContentBlock::text(serde_json::to_string_pretty(&raw).unwrap())]
    );
}

#[test]
fn missing_content_falls_back_to_pretty_json() {
    let raw = json!({ "nodes": [{ "id": "n1", "name": "Frame" }] });
    let blocks = format_result(&raw);
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].as_text().unwrap(),
        "{\n  \"nodes\": [\n    {\n      \"id\": \"n1\",\n      \"name\": \"Frame\"\n    }\n  ]\n}"
    );
}

#[test]
fn only_unknown_items_fall_back_to_pretty_json() {
    let raw = json!({ "content": [{ "type": "resource", "uri": "paper://x" }, 7, null] });
    let blocks = format_result(&raw);
    assert_eq!(
        blocks,
        vec![ContentBlock::text(serde_json::to_string_pretty(&raw).unwrap())]
    );
}

#[test]
fn content_blocks_serialize_in_mcp_shape() {
    let blocks = vec![
        ContentBlock::text("hi"),
        ContentBlock::Image {
            data: "AAA".into(),
            mime_type: "image/jpeg".into(),
        },
    ];
    assert_eq!(
        serde_json::to_value(&blocks).unwrap(),
        json!([
            { "type": "text", "text": "hi" },
            { "type": "image", "data": "AAA", "mimeType": "image/jpeg" }
        ])
    );
}
