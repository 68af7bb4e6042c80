//! End-to-end tests of the stdio gateway over an in-memory transport.

mod common;

use std::time::Duration;

use common::{success, text_result, MockPaper, Reply};
use paper_mcp_tools::adapter::ToolSet;
use paper_mcp_tools::server::McpServer;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::task::JoinHandle;

struct Session {
    input: Option<DuplexStream>,
    output: Lines<BufReader<DuplexStream>>,
    server: JoinHandle<()>,
}

impl Session {
    fn start(tools: ToolSet) -> Self {
        let (input, server_in) = tokio::io::duplex(64 * 1024);
        let (server_out, output) = tokio::io::duplex(64 * 1024);

        let server = tokio::spawn(async move {
            let mut server = McpServer::new(tools);
            server.serve(server_in, server_out).await.unwrap();
        });

        Self {
            input: Some(input),
            output: BufReader::new(output).lines(),
            server,
        }
    }

    async fn send(&mut self, msg: Value) {
        let input = self.input.as_mut().unwrap();
        input.write_all(format!("{msg}\n").as_bytes()).await.unwrap();
    }

    async fn send_raw(&mut self, line: &str) {
        let input = self.input.as_mut().unwrap();
        input.write_all(line.as_bytes()).await.unwrap();
        input.write_all(b"\n").await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let line = tokio::time::timeout(Duration::from_secs(5), self.output.next_line())
            .await
            .expect("timed out waiting for a response")
            .unwrap()
            .expect("server closed its output");
        serde_json::from_str(&line).unwrap()
    }

    async fn initialize(&mut self) {
        self.send(json!({"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {}}))
            .await;
        let resp = self.recv().await;
        assert_eq!(resp["id"], 0);
        self.send(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
    }

    /// Close stdin and collect whatever the server still writes.
    async fn finish(mut self) -> Vec<Value> {
        drop(self.input.take());
        let mut rest = Vec::new();
        while let Some(line) = self.output.next_line().await.unwrap() {
            rest.push(serde_json::from_str(&line).unwrap());
        }
        self.server.await.unwrap();
        rest
    }
}

fn slow_mock(delay: Duration) -> impl Fn(&Value) -> Reply + Send + Sync + 'static {
    move |req: &Value| Reply::Delayed(delay, success(req, text_result("slow")))
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let mock = MockPaper::echo_ok().await;
    let mut session = Session::start(ToolSet::from_catalog(mock.client()));

    session
        .send(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
        .await;
    let resp = session.recv().await;
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["error"]["message"], "Server not initialized");

    session.initialize().await;
    session
        .send(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;
    let resp = session.recv().await;
    assert!(resp["result"]["tools"].as_array().unwrap().len() > 1);

    assert!(session.finish().await.is_empty());
}

#[tokio::test]
async fn malformed_lines_get_parse_errors() {
    let mock = MockPaper::echo_ok().await;
    let mut session = Session::start(ToolSet::from_catalog(mock.client()));

    session.send_raw("{not json").await;
    assert_eq!(session.recv().await["error"]["code"], -32700);

    session
        .send(json!({"jsonrpc": "1.0", "id": 3, "method": "ping"}))
        .await;
    let resp = session.recv().await;
    assert_eq!(resp["error"]["code"], -32600);
    assert_eq!(resp["id"], 3);

    session.finish().await;
}

#[tokio::test]
async fn slow_tool_call_does_not_block_other_requests() {
    let mock = MockPaper::start(slow_mock(Duration::from_millis(300))).await;
    let mut session = Session::start(ToolSet::from_catalog(mock.client()));
    session.initialize().await;

    session
        .send(json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "paper_get_selection", "arguments": {}}
        }))
        .await;
    session
        .send(json!({"jsonrpc": "2.0", "id": 6, "method": "ping"}))
        .await;

    let first = session.recv().await;
    assert_eq!(first["id"], 6, "ping should overtake the slow call");

    let second = session.recv().await;
    assert_eq!(second["id"], 5);
    assert_eq!(second["result"]["content"][0]["text"], "slow");

    session.finish().await;
}

#[tokio::test]
async fn cancelled_tool_call_gets_no_response() {
    let mock = MockPaper::start(slow_mock(Duration::from_secs(3))).await;
    let mut session = Session::start(ToolSet::from_catalog(mock.client()));
    session.initialize().await;

    session
        .send(json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "paper_screenshot", "arguments": {"id": "a1"}}
        }))
        .await;
    session
        .send(json!({
            "jsonrpc": "2.0", "method": "notifications/cancelled",
            "params": {"requestId": 7, "reason": "user pressed escape"}
        }))
        .await;
    session
        .send(json!({"jsonrpc": "2.0", "id": 8, "method": "ping"}))
        .await;

    assert_eq!(session.recv().await["id"], 8);

    let rest = tokio::time::timeout(Duration::from_secs(2), session.finish())
        .await
        .expect("cancelled call kept the server busy");
    assert!(
        rest.iter().all(|r| r["id"] != 7),
        "cancelled request was answered: {rest:?}"
    );
}
