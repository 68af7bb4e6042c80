//! Declarative argument renaming between the agent-facing tool vocabulary
//! and the parameter names Paper's methods expect.

use serde_json::{Map, Value};

/// Rename `from` to `to`, optionally reshaping the value on the way.
#[derive(Debug, Clone, Copy)]
pub struct FieldRename {
    pub from: &'static str,
    pub to: &'static str,
    pub transform: Option<Transform>,
}

impl FieldRename {
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to, transform: None }
    }

    pub const fn each_item(
        from: &'static str,
        to: &'static str,
        rules: &'static [FieldRename],
    ) -> Self {
        Self {
            from,
            to,
            transform: Some(Transform::EachItem(rules)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// Apply nested rules to every object in an array value.
    EachItem(&'static [FieldRename]),
}

impl Transform {
    fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Self::EachItem(rules), Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => Value::Object(remap_arguments(map, rules)),
                        other => other,
                    })
                    .collect(),
            ),
            (_, other) => other,
        }
    }
}

/// Apply `rules` in order. Keys without a rule are passed through unchanged.
pub fn remap_arguments(mut args: Map<String, Value>, rules: &[FieldRename]) -> Map<String, Value> {
    for rule in rules {
        if let Some(value) = args.remove(rule.from) {
            let value = match &rule.transform {
                Some(t) => t.apply(value),
                None => value,
            };
            args.insert(rule.to.to_string(), value);
        }
    }
    args
}

/// Coerce untyped tool params into an argument map.
pub fn coerce_params(params: Option<Value>) -> Map<String, Value> {
    match params {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
