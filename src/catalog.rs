//! The fixed set of Paper tools exposed to agents.
//!
//! Agent-facing names and fields are deliberately more uniform than Paper's
//! own method parameters (`id` everywhere instead of `nodeId`, `ids` instead
//! of `nodeIds`); each definition carries the renames needed on the way out.

use std::sync::OnceLock;

use serde_json::{json, Value};

use crate::remap::FieldRename;

/// Immutable description of one agent-facing tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub remote_method: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub read_only: bool,
    pub renames: &'static [FieldRename],
}

const ID_TO_NODE_ID: &[FieldRename] = &[FieldRename::new("id", "nodeId")];
const IDS_TO_NODE_IDS: &[FieldRename] = &[FieldRename::new("ids", "nodeIds")];
const BATCH_UPDATES: &[FieldRename] =
    &[FieldRename::each_item("updates", "updates", ID_TO_NODE_ID)];
const FONT_FAMILIES: &[FieldRename] = &[FieldRename::new("families", "familyNames")];
const WRITE_TARGET: &[FieldRename] = &[FieldRename::new("parentId", "targetNodeId")];
const SET_TEXT: &[FieldRename] = &[
    FieldRename::new("id", "nodeId"),
    FieldRename::new("text", "textContent"),
];

/// Every tool definition, built once per process.
pub fn catalog() -> &'static [ToolDefinition] {
    static CATALOG: OnceLock<Vec<ToolDefinition>> = OnceLock::new();
    CATALOG.get_or_init(definitions)
}

/// Look up a definition by its agent-facing name.
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    catalog().iter().find(|def| def.name == name)
}

fn object_schema(required: &[&str], properties: Value) -> Value {
    json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

fn node_id_property() -> Value {
    json!({ "type": "string", "description": "Node id, as returned by other Paper tools" })
}

fn node_ids_property() -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": "Node ids, as returned by other Paper tools"
    })
}

fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "paper_get_basic_info",
            remote_method: "get_basic_info",
            label: "Paper: file info",
            description: "Get the open Paper file's name, current page and its top-level artboards \
                          with their ids and sizes. Start here to orient yourself.",
            input_schema: object_schema(&[], json!({})),
            read_only: true,
            renames: &[],
        },
        ToolDefinition {
            name: "paper_get_selection",
            remote_method: "get_selection",
            label: "Paper: selection",
            description: "Get the nodes the user currently has selected in Paper.",
            input_schema: object_schema(&[], json!({})),
            read_only: true,
            renames: &[],
        },
        ToolDefinition {
            name: "paper_get_node",
            remote_method: "get_node_info",
            label: "Paper: node info",
            description: "Get details for a single node: type, name, size, position, \
                          parent and child ids.",
            input_schema: object_schema(&["id"], json!({ "id": node_id_property() })),
            read_only: true,
            renames: ID_TO_NODE_ID,
        },
        ToolDefinition {
            name: "paper_get_children",
            remote_method: "get_children",
            label: "Paper: children",
            description: "List the direct children of a node with their ids, names and types.",
            input_schema: object_schema(&["id"], json!({ "id": node_id_property() })),
            read_only: true,
            renames: ID_TO_NODE_ID,
        },
        ToolDefinition {
            name: "paper_get_tree",
            remote_method: "get_tree_summary",
            label: "Paper: tree summary",
            description: "Get a compact outline of the subtree under a node, down to an \
                          optional depth.",
            input_schema: object_schema(
                &["id"],
                json!({
                    "id": node_id_property(),
                    "depth": { "type": "number", "description": "Maximum depth to descend (default 3)" }
                }),
            ),
            read_only: true,
            renames: ID_TO_NODE_ID,
        },
        ToolDefinition {
            name: "paper_screenshot",
            remote_method: "get_screenshot",
            label: "Paper: screenshot",
            description: "Render a node (usually an artboard) to an image. Use it to check \
                          your work visually after making changes.",
            input_schema: object_schema(
                &["id"],
                json!({
                    "id": node_id_property(),
                    "scale": { "type": "number", "description": "Render scale, 1 or 2 (default 1)" }
                }),
            ),
            read_only: true,
            renames: ID_TO_NODE_ID,
        },
        ToolDefinition {
            name: "paper_get_jsx",
            remote_method: "get_jsx",
            label: "Paper: JSX",
            description: "Export a node and its subtree as JSX, for reading structure and \
                          styles or handing off to code.",
            input_schema: object_schema(
                &["id"],
                json!({
                    "id": node_id_property(),
                    "format": {
                        "type": "string",
                        "enum": ["tailwind", "inline-styles"],
                        "description": "Styling flavour of the output (default tailwind)"
                    }
                }),
            ),
            read_only: true,
            renames: ID_TO_NODE_ID,
        },
        ToolDefinition {
            name: "paper_get_styles",
            remote_method: "get_computed_styles",
            label: "Paper: computed styles",
            description: "Get the computed CSS styles of one or more nodes.",
            input_schema: object_schema(&["ids"], json!({ "ids": node_ids_property() })),
            read_only: true,
            renames: IDS_TO_NODE_IDS,
        },
        ToolDefinition {
            name: "paper_get_fonts",
            remote_method: "get_font_family_info",
            label: "Paper: font families",
            description: "Check whether font families are available in Paper and list their \
                          weights and styles. Call before using a font you have not used yet.",
            input_schema: object_schema(
                &["families"],
                json!({
                    "families": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Font family names, e.g. [\"Inter\"]"
                    }
                }),
            ),
            read_only: true,
            renames: FONT_FAMILIES,
        },
        ToolDefinition {
            name: "paper_create_artboard",
            remote_method: "create_artboard",
            label: "Paper: create artboard",
            description: "Create a new artboard on the current page.",
            input_schema: object_schema(
                &["name"],
                json!({
                    "name": { "type": "string", "description": "Artboard name" },
                    "width": { "type": "number", "description": "Width in px" },
                    "height": { "type": "number", "description": "Height in px" },
                    "styles": { "type": "object", "description": "Extra CSS properties for the artboard" }
                }),
            ),
            read_only: false,
            renames: &[],
        },
        ToolDefinition {
            name: "paper_write_html",
            remote_method: "write_html",
            label: "Paper: write HTML",
            description: "Insert HTML into the design as Paper nodes, inside a parent node. \
                          Build designs incrementally, a section at a time.",
            input_schema: object_schema(
                &["html", "parentId"],
                json!({
                    "html": { "type": "string", "description": "HTML with inline styles" },
                    "parentId": { "type": "string", "description": "Node to insert into" },
                    "mode": {
                        "type": "string",
                        "enum": ["insert-children", "replace"],
                        "description": "Append as children (default) or replace the parent's contents"
                    }
                }),
            ),
            read_only: false,
            renames: WRITE_TARGET,
        },
        ToolDefinition {
            name: "paper_set_text",
            remote_method: "set_text_content",
            label: "Paper: set text",
            description: "Replace the text content of a text node.",
            input_schema: object_schema(
                &["id", "text"],
                json!({
                    "id": node_id_property(),
                    "text": { "type": "string", "description": "New text content" }
                }),
            ),
            read_only: false,
            renames: SET_TEXT,
        },
        ToolDefinition {
            name: "paper_update_styles",
            remote_method: "update_styles",
            label: "Paper: update styles",
            description: "Update CSS styles on several nodes in one call.",
            input_schema: object_schema(
                &["updates"],
                json!({
                    "updates": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["id", "styles"],
                            "properties": {
                                "id": node_id_property(),
                                "styles": { "type": "object", "description": "CSS properties to set" }
                            }
                        }
                    }
                }),
            ),
            read_only: false,
            renames: BATCH_UPDATES,
        },
        ToolDefinition {
            name: "paper_rename",
            remote_method: "rename_nodes",
            label: "Paper: rename nodes",
            description: "Rename several nodes in one call.",
            input_schema: object_schema(
                &["updates"],
                json!({
                    "updates": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["id", "name"],
                            "properties": {
                                "id": node_id_property(),
                                "name": { "type": "string", "description": "New layer name" }
                            }
                        }
                    }
                }),
            ),
            read_only: false,
            renames: BATCH_UPDATES,
        },
        ToolDefinition {
            name: "paper_duplicate",
            remote_method: "duplicate_nodes",
            label: "Paper: duplicate nodes",
            description: "Duplicate nodes next to their originals. Returns the new node ids.",
            input_schema: object_schema(&["ids"], json!({ "ids": node_ids_property() })),
            read_only: false,
            renames: IDS_TO_NODE_IDS,
        },
        ToolDefinition {
            name: "paper_delete",
            remote_method: "delete_nodes",
            label: "Paper: delete nodes",
            description: "Delete nodes and their subtrees.",
            input_schema: object_schema(&["ids"], json!({ "ids": node_ids_property() })),
            read_only: false,
            renames: IDS_TO_NODE_IDS,
        },
        ToolDefinition {
            name: "paper_start_working",
            remote_method: "start_working_on_nodes",
            label: "Paper: start working",
            description: "Mark nodes as being edited by the agent, so the user sees where \
                          you are working. Call before a series of edits.",
            input_schema: object_schema(&["ids"], json!({ "ids": node_ids_property() })),
            read_only: false,
            renames: IDS_TO_NODE_IDS,
        },
        ToolDefinition {
            name: "paper_finish_working",
            remote_method: "finish_working_on_nodes",
            label: "Paper: finish working",
            description: "Clear the working indicator set by paper_start_working.",
            input_schema: object_schema(&["ids"], json!({ "ids": node_ids_property() })),
            read_only: false,
            renames: IDS_TO_NODE_IDS,
        },
    ]
}
