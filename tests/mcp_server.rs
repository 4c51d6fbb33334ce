mod support;

use std::time::Duration;

use axum::http::Method;
use serde_json::{json, Value};

use firstpromoter_mcp::server::http;
use firstpromoter_mcp::{McpServer, ToolRegistry};
use support::{referrals, MockUpstream};

async fn spawn_http(server: McpServer, token: Option<&str>) -> String {
    spawn_router(server, token, false).await
}

async fn spawn_router(server: McpServer, token: Option<&str>, sse: bool) -> String {
    let app = http::router(server, token, sse);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

#[tokio::test]
async fn tools_call_round_trips_through_upstream() {
    let upstream = MockUpstream::start().await;
    upstream.respond_json(Method::GET, "referrals", referrals(2));
    let server = McpServer::new(ToolRegistry::new(upstream.client()));

    let reply = server
        .handle_value(call(1, "get_referrals", json!({ "page": 3, "state": null })))
        .await
        .unwrap();
    let result = reply.result.unwrap();
    assert_eq!(result["isError"], json!(false));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("📋 Found 2 referrals:"), "{text}");

    // Numeric argument arrives as "3"; null is treated as absent
    let req = upstream.only_request();
    assert_eq!(req.query_value("page"), Some("3"));
    assert_eq!(req.query_value("filters[state]"), None);
}

#[tokio::test]
async fn upstream_failure_is_flagged_in_result() {
    let upstream = MockUpstream::start().await;
    upstream.respond(Method::POST, "commissions/approve", 500, "boom");
    let server = McpServer::new(ToolRegistry::new(upstream.client()));

    let reply = server
        .handle_value(call(2, "approve_commissions", json!({ "commission_ids": "1" })))
        .await
        .unwrap();
    let result = reply.result.unwrap();
    assert_eq!(result["isError"], json!(true));
    assert_eq!(result["content"][0]["text"], json!("❌ API Error 500: boom"));
}

#[tokio::test]
async fn http_transport_requires_bearer_when_configured() {
    let upstream = MockUpstream::start().await;
    let server = McpServer::new(ToolRegistry::new(upstream.client()));
    let base = spawn_http(server, Some("s3cret")).await;
    let client = reqwest::Client::new();
    let ping = json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" });

    let denied = client.post(format!("{base}/mcp")).json(&ping).send().await.unwrap();
    assert_eq!(denied.status(), 401);

    let wrong = client
        .post(format!("{base}/mcp"))
        .bearer_auth("nope")
        .json(&ping)
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 401);

    let allowed = client
        .post(format!("{base}/mcp"))
        .bearer_auth("s3cret")
        .json(&ping)
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
    let body: Value = allowed.json().await.unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["result"], json!({}));

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.status(), 200);
}

#[tokio::test]
async fn http_transport_is_open_without_token() {
    let upstream = MockUpstream::start().await;
    let server = McpServer::new(ToolRegistry::new(upstream.client()));
    let base = spawn_http(server, None).await;
    let client = reqwest::Client::new();

    let listed: Value = client
        .post(format!("{base}/mcp"))
        .json(&json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        listed["result"]["tools"].as_array().map(Vec::len),
        Some(firstpromoter_mcp::TOOLS.len())
    );

    let notified = client
        .post(format!("{base}/mcp"))
        .json(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
        .send()
        .await
        .unwrap();
    assert_eq!(notified.status(), 202);
}

/// Reads the next named event from an open SSE response, skipping keep-alives.
async fn next_event(stream: &mut reqwest::Response, buf: &mut String) -> (String, String) {
    loop {
        if let Some(end) = buf.find("\n\n") {
            let block: String = buf.drain(..end + 2).collect();
            let mut event = None;
            let mut data = Vec::new();
            for line in block.lines() {
                if let Some(v) = line.strip_prefix("event:") {
                    event = Some(v.trim().to_string());
                } else if let Some(v) = line.strip_prefix("data:") {
                    data.push(v.trim_start().to_string());
                }
            }
            if let Some(event) = event {
                return (event, data.join("\n"));
            }
            continue;
        }
        let chunk = tokio::time::timeout(Duration::from_secs(5), stream.chunk())
            .await
            .expect("timed out waiting for an SSE event")
            .unwrap()
            .expect("SSE stream ended");
        buf.push_str(&String::from_utf8_lossy(&chunk));
    }
}

#[tokio::test]
async fn sse_session_delivers_replies_as_events() {
    let upstream = MockUpstream::start().await;
    let server = McpServer::new(ToolRegistry::new(upstream.client()));
    let base = spawn_router(server, None, true).await;
    let client = reqwest::Client::new();

    let mut stream = client.get(format!("{base}/sse")).send().await.unwrap();
    assert_eq!(stream.status(), 200);
    assert_eq!(
        stream.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let mut buf = String::new();
    let (event, endpoint) = next_event(&mut stream, &mut buf).await;
    assert_eq!(event, "endpoint");
    assert!(endpoint.starts_with("/messages?session_id="), "{endpoint}");

    let posted = client
        .post(format!("{base}{endpoint}"))
        .json(&json!({ "jsonrpc": "2.0", "id": 41, "method": "ping" }))
        .send()
        .await
        .unwrap();
    assert_eq!(posted.status(), 202);

    let (event, data) = next_event(&mut stream, &mut buf).await;
    assert_eq!(event, "message");
    let reply: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(reply["id"], json!(41));
    assert_eq!(reply["result"], json!({}));

    let unknown = client
        .post(format!("{base}/messages?session_id=nope"))
        .json(&json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), 404);
}

#[tokio::test]
async fn sse_stream_requires_bearer_when_configured() {
    let upstream = MockUpstream::start().await;
    let server = McpServer::new(ToolRegistry::new(upstream.client()));
    let base = spawn_router(server, Some("s3cret"), true).await;
    let client = reqwest::Client::new();

    let denied = client.get(format!("{base}/sse")).send().await.unwrap();
    assert_eq!(denied.status(), 401);

    let allowed = client
        .get(format!("{base}/sse"))
        .bearer_auth("s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}

#[tokio::test]
async fn plain_http_mode_has_no_sse_endpoints() {
    let upstream = MockUpstream::start().await;
    let server = McpServer::new(ToolRegistry::new(upstream.client()));
    let base = spawn_http(server, None).await;

    let sse = reqwest::get(format!("{base}/sse")).await.unwrap();
    assert_eq!(sse.status(), 404);
}
