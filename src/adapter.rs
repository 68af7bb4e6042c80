//! Tool adapters: wrap catalog definitions as invocable agent tools.
//!
//! The host agent framework reads `name`/`description`/`input_schema` to
//! advertise a tool to the model and calls `execute` when the model uses it.
//! `execute` always returns a well-formed [`ToolOutput`]; failures become a
//! single text block instead of an `Err`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info_span, Instrument};

use crate::catalog::{self, ToolDefinition};
use crate::client::PaperClient;
use crate::format::format_result;
use crate::probe::is_remote_reachable;
use crate::protocol::{ContentBlock, ToolResult};
use crate::remap::{coerce_params, remap_arguments};

/// Structured detail attached to every tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolDetails {
    /// The remote method that produced the content.
    Invoked { method: String },
    /// The call failed; `error` is the same text shown in the content.
    Failed { error: String },
    /// Outcome of a liveness probe.
    Probe { reachable: bool, endpoint: String },
}

/// What a tool execution hands back to the agent framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    pub details: ToolDetails,
}

impl ToolOutput {
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            content: vec![ContentBlock::text(error.clone())],
            details: ToolDetails::Failed { error },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.details, ToolDetails::Failed { .. })
    }
}

impl From<ToolOutput> for ToolResult {
    fn from(output: ToolOutput) -> Self {
        let is_error = output.is_error();
        Self {
            content: output.content,
            structured_content: serde_json::to_value(&output.details).ok(),
            is_error,
        }
    }
}

/// An invocable tool as seen by the agent framework.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;

    fn label(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> &Value;

    /// Hint that the tool never modifies the design.
    fn read_only(&self) -> bool;

    async fn execute(
        &self,
        call_id: &str,
        params: Option<Value>,
        cancel: Option<CancellationToken>,
    ) -> ToolOutput;
}

/// A catalog definition bound to a Paper client.
pub struct ToolAdapter {
    def: &'static ToolDefinition,
    client: Arc<PaperClient>,
}

impl ToolAdapter {
    pub fn new(def: &'static ToolDefinition, client: Arc<PaperClient>) -> Self {
        Self { def, client }
    }
}

#[async_trait]
impl AgentTool for ToolAdapter {
    fn name(&self) -> &str {
        self.def.name
    }

    fn label(&self) -> &str {
        self.def.label
    }

    fn description(&self) -> &str {
        self.def.description
    }

    fn input_schema(&self) -> &Value {
        &self.def.input_schema
    }

    fn read_only(&self) -> bool {
        self.def.read_only
    }

    async fn execute(
        &self,
        call_id: &str,
        params: Option<Value>,
        cancel: Option<CancellationToken>,
    ) -> ToolOutput {
        let arguments = remap_arguments(coerce_params(params), self.def.renames);
        let span = info_span!("paper_tool", tool = self.def.name, call_id);

        let outcome = self
            .client
            .call(self.def.remote_method, arguments, cancel.as_ref())
            .instrument(span)
            .await;

        match outcome {
            Ok(raw) => ToolOutput {
                content: format_result(&raw),
                details: ToolDetails::Invoked {
                    method: self.def.remote_method.to_string(),
                },
            },
            Err(err) => ToolOutput::failed(err.to_string()),
        }
    }
}

/// Local tool reporting whether Paper is reachable.
pub struct StatusTool {
    client: Arc<PaperClient>,
    schema: Value,
}

impl StatusTool {
    pub const NAME: &'static str = "paper_status";

    pub fn new(client: Arc<PaperClient>) -> Self {
        Self {
            client,
            schema: json!({ "type": "object", "properties": {} }),
        }
    }
}

#[async_trait]
impl AgentTool for StatusTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "Paper: status"
    }

    fn description(&self) -> &str {
        "Check whether the Paper desktop app is running and reachable. \
         Use it when other Paper tools report that Paper is not running."
    }

    fn input_schema(&self) -> &Value {
        &self.schema
    }

    fn read_only(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        _call_id: &str,
        _params: Option<Value>,
        cancel: Option<CancellationToken>,
    ) -> ToolOutput {
        let endpoint = self.client.endpoint().to_string();
        let reachable = match cancel {
            Some(token) => tokio::select! {
                r = is_remote_reachable(&self.client) => r,
                _ = token.cancelled() => false,
            },
            None => is_remote_reachable(&self.client).await,
        };

        let text = if reachable {
            format!("Paper is running and reachable at {endpoint}.")
        } else {
            format!(
                "Paper is not running (nothing answered at {endpoint}). \
                 Open the Paper desktop app."
            )
        };

        ToolOutput {
            content: vec![ContentBlock::text(text)],
            details: ToolDetails::Probe { reachable, endpoint },
        }
    }
}

/// Every tool the crate exposes, in catalog order, status tool last.
pub struct ToolSet {
    tools: Vec<Arc<dyn AgentTool>>,
}

impl ToolSet {
    pub fn from_catalog(client: Arc<PaperClient>) -> Self {
        let mut tools: Vec<Arc<dyn AgentTool>> = catalog::catalog()
            .iter()
            .map(|def| Arc::new(ToolAdapter::new(def, Arc::clone(&client))) as Arc<dyn AgentTool>)
            .collect();
        tools.push(Arc::new(StatusTool::new(client)));
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentTool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AgentTool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
