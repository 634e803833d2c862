//! Tests for the echo tool

use chrono::Utc;
use rmcp::{handler::server::wrapper::Parameters, model::RawContent};

use crate::mcp::McpServer;
use crate::mcp::tools::echo::{EchoParams, format_echo};
use crate::ops::QueryOps;

#[test]
fn format_echo_prefixes_timestamp() {
    assert_eq!(format_echo(1_700_000_000, "hello"), "[1700000000] hello");
    assert_eq!(format_echo(0, ""), "[0] ");
}

#[tokio::test(flavor = "multi_thread")]
async fn echo_returns_message_with_current_timestamp() {
    // Echo never touches the database.
    let server = McpServer::new(QueryOps::default());

    let before = Utc::now().timestamp();
    let result = server
        .echo(Parameters(EchoParams {
            message: "ping".to_string(),
        }))
        .await
        .expect("echo should succeed");
    let after = Utc::now().timestamp();

    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    };

    let rest = text.strip_prefix('[').expect("timestamp prefix");
    let (secs, message) = rest.split_once("] ").expect("closing bracket");
    let secs: i64 = secs.parse().unwrap();
    assert!(before <= secs && secs <= after);
    assert_eq!(message, "ping");
}
