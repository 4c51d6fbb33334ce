//! MCP JSON-RPC 2.0 front end.
//!
//! [`McpServer`] maps protocol messages onto the [`ToolRegistry`]; the
//! transports in [`stdio`] and [`http`] only move bytes.

pub mod http;
pub mod stdio;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::consts::FAILURE_GLYPH;
use crate::logging::targets;
use crate::registry::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "firstpromoter";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcRequest {
    /// `None` only when the key is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present<'de, D>(d: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(d).map(Some)
}

impl JsonRpcRequest {
    /// Requests without an id expect no reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Deserialize, Debug)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// Shared by both transports; cheap to clone.
#[derive(Debug, Clone)]
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Handles one raw message. `None` means nothing is written back.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(target: targets::TRANSPORT, error = %e, "Unparseable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        self.handle_value(value).await
    }

    pub async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ))
            }
        };
        self.handle(request).await
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(target: targets::TRANSPORT, method = %request.method, "JSON-RPC message");

        if request.is_notification() {
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tools_call(request.params).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {other}"))),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::failure(id, code, message),
        })
    }

    fn initialize(&self) -> Value {
        info!(target: targets::TRANSPORT, "Client initialized session");
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn tools_list(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn tools_call(&self, params: Option<Value>) -> Result<Value, (i64, String)> {
        let params: CallParams = params
            .ok_or_else(|| "missing params".to_string())
            .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
            .map_err(|e| (INVALID_PARAMS, format!("Invalid params: {e}")))?;

        match self.registry.invoke(&params.name, params.arguments).await {
            Ok(text) => Ok(tool_result(text)),
            Err(e) => {
                warn!(target: targets::TRANSPORT, tool = %params.name, error = %e, "Rejected tool call");
                Err((INVALID_PARAMS, e.to_string()))
            }
        }
    }
}

/// Wraps tool text as MCP content; failures are flagged by their glyph.
pub fn tool_result(text: String) -> Value {
    let is_error = text.starts_with(FAILURE_GLYPH);
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FirstPromoterClient;
    use crate::config::Credentials;
    use crate::BaseUrl;
    use std::sync::Arc;

    fn server() -> McpServer {
        // Unroutable upstream: these tests never get past validation.
        let client = FirstPromoterClient::new(
            Arc::new(Credentials::new("key", "acc", "")),
            Some(BaseUrl::Custom("http://127.0.0.1:9".to_string())),
        );
        McpServer::new(ToolRegistry::new(client))
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_name() {
        let reply = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let result = reply.result.unwrap();
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!("firstpromoter"));
        assert_eq!(reply.id, json!(1));
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let reply = server()
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn null_id_is_still_a_request() {
        let reply = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(reply.id, Value::Null);
        assert_eq!(reply.result, Some(json!({})));
    }

    #[tokio::test]
    async fn protocol_errors_use_standard_codes() {
        let s = server();
        let reply = s.handle_message("{not json").await.unwrap();
        assert_eq!(reply.error.unwrap().code, PARSE_ERROR);

        let reply = s
            .handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(reply.error.unwrap().code, METHOD_NOT_FOUND);

        let reply = s
            .handle_message(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope"}}"#,
            )
            .await
            .unwrap();
        assert_eq!(reply.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn tools_list_advertises_catalogue() {
        let reply = server()
            .handle_message(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = reply.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), crate::registry::TOOLS.len());
        assert!(tools.iter().any(|t| t["name"] == json!("get_referrals")));
    }

    #[tokio::test]
    async fn validation_failure_is_flagged_as_tool_error() {
        let reply = server()
            .handle_message(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_referral","arguments":{}}}"#,
            )
            .await
            .unwrap();
        let result = reply.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert_eq!(result["content"][0]["text"], json!("❌ referral_id is required"));
    }

    #[test]
    fn success_text_is_not_an_error() {
        assert_eq!(tool_result("✅ done".into())["isError"], json!(false));
    }
}
