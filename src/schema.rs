use jsonschema::validator_for;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Invalid arguments: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}

/// Validate tool arguments against a tool's input schema.
/// Returns every violation found, not just the first.
pub fn validate_arguments(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    let violations: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed(violations))
    }
}
