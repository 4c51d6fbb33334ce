//! In-process stand-in for the upstream REST API.
//!
//! Every request is recorded; responses are canned per `(method, path)` and
//! default to `200 []`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;

use firstpromoter_mcp::{BaseUrl, Credentials, FirstPromoterClient};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    routes: Arc<Mutex<HashMap<(Method, String), (StatusCode, String)>>>,
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    /// Cans a response for `method path`, where `path` has no leading slash.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, format!("/{path}")), (status, body.into()));
    }

    pub fn respond_json(&self, method: Method, path: &str, body: Value) {
        self.respond(method, path, 200, body.to_string());
    }

    pub fn base_url(&self) -> BaseUrl {
        BaseUrl::Custom(format!("http://{}", self.addr))
    }

    pub fn client(&self) -> FirstPromoterClient {
        self.client_with(Credentials::new("test-key", "acc-123", ""))
    }

    pub fn client_with(&self, credentials: Credentials) -> FirstPromoterClient {
        FirstPromoterClient::new(Arc::new(credentials), Some(self.base_url()))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call");
        requests.into_iter().next().unwrap()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body = serde_json::from_slice(&body).ok();
    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query,
        headers,
        body,
    });

    let canned = state.routes.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some((status, body)) => (status, body).into_response(),
        None => (StatusCode::OK, "[]").into_response(),
    }
}

/// `count` referral records named `user{n}@x.io`.
pub fn referrals(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|n| {
                serde_json::json!({
                    "id": n + 1,
                    "email": format!("user{n}@x.io"),
                    "state": "signup",
                    "promoter_campaign": { "promoter": { "name": "Ada" } }
                })
            })
            .collect(),
    )
}
