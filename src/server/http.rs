//! JSON-RPC over HTTP.
//!
//! `POST /mcp` takes one JSON-RPC message and answers with its reply;
//! notifications are acknowledged with `202 Accepted`.
//!
//! With SSE enabled a host may instead open `GET /sse`. The first event
//! (`endpoint`) names `/messages?session_id=<id>`; messages posted there are
//! acknowledged with `202` and their replies arrive on the stream as
//! `message` events. `GET /health` is always open.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Query, Request, State};
use axum::http::{header::AUTHORIZATION, StatusCode};
use axum::middleware::{self, Next};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::McpServer;
use crate::logging::targets;

/// Replies buffered per SSE session before senders wait.
const SESSION_BUFFER: usize = 32;

type Sessions = Arc<Mutex<HashMap<String, mpsc::Sender<Event>>>>;

#[derive(Clone)]
struct AppState {
    server: McpServer,
    auth_token: Option<Arc<str>>,
    sessions: Sessions,
}

fn lock(sessions: &Sessions) -> MutexGuard<'_, HashMap<String, mpsc::Sender<Event>>> {
    sessions.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds the router. A `None` or blank token leaves every endpoint open.
/// `sse` mounts `/sse` and `/messages` next to `/mcp`.
pub fn router(server: McpServer, auth_token: Option<&str>, sse: bool) -> Router {
    let auth_token = auth_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Arc::from);
    if auth_token.is_some() {
        info!(target: targets::TRANSPORT, "Bearer authentication enabled");
    }
    let state = AppState {
        server,
        auth_token,
        sessions: Sessions::default(),
    };

    let mut protected = Router::new().route("/mcp", post(handle_mcp));
    if sse {
        protected = protected
            .route("/sse", get(open_session))
            .route("/messages", post(post_message));
    }
    let protected =
        protected.route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .merge(protected)
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(
    server: McpServer,
    addr: SocketAddr,
    auth_token: Option<&str>,
    sse: bool,
) -> std::io::Result<()> {
    let app = router(server, auth_token, sse);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    if sse {
        info!(target: targets::TRANSPORT, %addr, "MCP transport listening at /sse and /mcp");
    } else {
        info!(target: targets::TRANSPORT, %addr, "MCP transport listening at /mcp");
    }
    axum::serve(listener, app).await
}

/// Length check, then an XOR fold over every byte.
fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.auth_token.as_deref() else {
        return next.run(request).await;
    };
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match presented {
        Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => {
            next.run(request).await
        }
        _ => {
            warn!(target: targets::TRANSPORT, "Rejected request with missing or wrong bearer token");
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response()
        }
    }
}

async fn handle_mcp(State(state): State<AppState>, body: String) -> Response {
    match state.server.handle_message(&body).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Receiving half of one SSE session; dropping it unregisters the session.
struct SessionStream {
    id: String,
    rx: mpsc::Receiver<Event>,
    sessions: Sessions,
}

impl Drop for SessionStream {
    fn drop(&mut self) {
        lock(&self.sessions).remove(&self.id);
        debug!(target: targets::TRANSPORT, session_id = %self.id, "SSE session closed");
    }
}

async fn open_session(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let id = Uuid::new_v4().simple().to_string();
    let (tx, rx) = mpsc::channel(SESSION_BUFFER);
    lock(&state.sessions).insert(id.clone(), tx);
    info!(target: targets::TRANSPORT, session_id = %id, "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?session_id={id}"));
    let session = SessionStream {
        id,
        rx,
        sessions: Arc::clone(&state.sessions),
    };
    let replies = stream::unfold(session, |mut session| async move {
        let event = session.rx.recv().await?;
        Some((event, session))
    });

    let events = stream::once(async move { endpoint })
        .chain(replies)
        .map(Ok::<_, Infallible>);
    Sse::new(events).keep_alive(KeepAlive::default())
}

#[derive(Deserialize)]
struct SessionQuery {
    session_id: String,
}

async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> Response {
    let Some(tx) = lock(&state.sessions).get(&query.session_id).cloned() else {
        return (StatusCode::NOT_FOUND, "Unknown session").into_response();
    };

    // Reply on the stream so slow tool calls never hold the POST open.
    let server = state.server.clone();
    tokio::spawn(async move {
        let Some(reply) = server.handle_message(&body).await else {
            return;
        };
        match serde_json::to_string(&reply) {
            Ok(data) => {
                if tx.send(Event::default().event("message").data(data)).await.is_err() {
                    debug!(target: targets::TRANSPORT, "SSE session ended before reply");
                }
            }
            Err(e) => error!(target: targets::TRANSPORT, error = %e, "Failed to encode response"),
        }
    });
    StatusCode::ACCEPTED.into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "server": super::SERVER_NAME }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_comparison() {
        assert!(tokens_match(b"s3cret", b"s3cret"));
        assert!(!tokens_match(b"s3creT", b"s3cret"));
        assert!(!tokens_match(b"s3cre", b"s3cret"));
        assert!(!tokens_match(b"", b"s3cret"));
    }
}
