//! Agent tools for the Paper design app.
//!
//! A fixed catalog of `paper_*` tools, each forwarded as a JSON-RPC 2.0
//! `tools/call` to the MCP endpoint the Paper desktop app serves on loopback.
//! The tools can be embedded in an agent framework through [`adapter::ToolSet`]
//! or served to any MCP-aware agent over stdio by the `paper-mcp-tools` binary.

pub mod adapter;
pub mod catalog;
pub mod client;
pub mod config;
pub mod format;
pub mod handlers;
pub mod probe;
pub mod prompt;
pub mod protocol;
pub mod remap;
pub mod schema;
pub mod server;
pub mod sse;
