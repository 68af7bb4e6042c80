use jsonschema::validator_for;
use paper_mcp_tools::catalog::{catalog, find};
use paper_mcp_tools::schema::{validate_arguments, SchemaValidationError};
use serde_json::json;

#[test]
fn every_catalog_schema_compiles() {
    for def in catalog() {
        validator_for(&def.input_schema)
            .unwrap_or_else(|e| panic!("{} has an invalid input schema: {e}", def.name));
    }
}

#[test]
fn well_formed_arguments_pass() {
    let update = find("paper_update_styles").unwrap();
    validate_arguments(
        &update.input_schema,
        &json!({ "updates": [{ "id": "n1", "styles": { "color": "#111" } }] }),
    )
    .expect("schema validation failed");

    let info = find("paper_get_basic_info").unwrap();
    validate_arguments(&info.input_schema, &json!({})).expect("schema validation failed");
}

#[test]
fn every_violation_is_reported() {
    let write = find("paper_write_html").unwrap();
    let err = validate_arguments(&write.input_schema, &json!({ "mode": "sideways" })).unwrap_err();

    match err {
        SchemaValidationError::ValidationFailed(violations) => {
            // missing html, missing parentId, bad enum value
            assert!(violations.len() >= 2, "{violations:?}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn broken_schema_is_a_compile_error() {
    let err = validate_arguments(&json!({ "type": 12 }), &json!({})).unwrap_err();
    assert!(matches!(err, SchemaValidationError::SchemaCompile(_)));
}
