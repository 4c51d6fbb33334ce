//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Stdout carries protocol messages only; logs go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use super::McpServer;
use crate::logging::targets;

pub async fn serve(server: McpServer) -> std::io::Result<()> {
    info!(target: targets::TRANSPORT, "MCP stdio transport started");
    let result = run(&server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await;
    info!(target: targets::TRANSPORT, "MCP stdio transport stopped");
    result
}

/// Handles each message on its own task; replies are written in completion
/// order by this loop alone. Returns once the reader is exhausted and every
/// pending reply has been written.
pub async fn run<R, W>(server: &McpServer, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut replies) = mpsc::unbounded_channel::<Vec<u8>>();
    // Dropped at EOF so `replies` closes after the last task finishes.
    let mut tx = Some(tx);
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if tx.is_some() => {
                let Some(line) = line? else {
                    tx = None;
                    continue;
                };
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let Some(sender) = tx.clone() else {
                    continue;
                };
                let server = server.clone();
                tokio::spawn(async move {
                    let Some(response) = server.handle_message(&line).await else {
                        return;
                    };
                    match serde_json::to_vec(&response) {
                        Ok(mut bytes) => {
                            bytes.push(b'\n');
                            let _ = sender.send(bytes);
                        }
                        Err(e) => {
                            error!(target: targets::TRANSPORT, error = %e, "Failed to encode response");
                        }
                    }
                });
            }
            Some(bytes) = replies.recv() => {
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
            else => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FirstPromoterClient;
    use crate::config::Credentials;
    use crate::helpers::BaseUrl;
    use crate::registry::ToolRegistry;
    use serde_json::Value;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    fn server_for(credentials: Credentials, base_url: Option<BaseUrl>) -> McpServer {
        let client = FirstPromoterClient::new(Arc::new(credentials), base_url);
        McpServer::new(ToolRegistry::new(client))
    }

    #[tokio::test]
    async fn replies_once_per_request_line() {
        let server = server_for(Credentials::new("", "", ""), None);
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        run(&server, input.as_bytes(), &mut output).await.unwrap();

        let ids: HashSet<u64> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn slow_tool_call_does_not_block_later_requests() {
        // Accepts connections into the backlog but never answers them.
        let silent = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/api/v2/company", silent.local_addr().unwrap());
        let server = server_for(
            Credentials::new("key", "acc", ""),
            Some(BaseUrl::Custom(base)),
        );

        let (mut input, input_rx) = tokio::io::duplex(4096);
        let (output_tx, output) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            let _ = run(&server, BufReader::new(input_rx), output_tx).await;
        });

        let messages = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_payout_stats","arguments":{}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        input.write_all(messages.as_bytes()).await.unwrap();

        let mut replies = BufReader::new(output).lines();
        let first = tokio::time::timeout(Duration::from_secs(5), replies.next_line())
            .await
            .expect("ping reply was held behind the pending tool call")
            .unwrap()
            .unwrap();
        let reply: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(reply["id"], 2);
        drop(silent);
    }
}
