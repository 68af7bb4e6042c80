use std::sync::Arc;

use paper_mcp_tools::adapter::ToolSet;
use paper_mcp_tools::client::PaperClient;
use paper_mcp_tools::config::ClientConfig;
use paper_mcp_tools::server::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries protocol traffic; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("paper-mcp-tools: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let client = match PaperClient::new(&config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("paper-mcp-tools: cannot create HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let mut server = McpServer::new(ToolSet::from_catalog(client));
    if let Err(e) = server.run().await {
        eprintln!("paper-mcp-tools: fatal error: {e}");
        std::process::exit(1);
    }
}
