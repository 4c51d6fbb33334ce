//! Process configuration.
//!
//! Credentials come from the environment (or CLI flags bound to the same
//! variables) and are never read from the TOML file. Everything else has a
//! file representation so a deployment can be described in one place.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logging::LogConfig;
use crate::Error;

pub const API_KEY_VAR: &str = "FP_API_KEY";
pub const ACCOUNT_ID_VAR: &str = "FP_ACCOUNT_ID";
pub const AUTH_TOKEN_VAR: &str = "MCP_AUTH_TOKEN";

/// Upstream credentials plus the advisory token guarding the network transport.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: String,
    pub account_id: String,
    pub auth_token: String,
}

// Keep secrets out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("account_id", &self.account_id)
            .field("auth_token", &redact(&self.auth_token))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        account_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            account_id: account_id.into(),
            auth_token: auth_token.into(),
        }
    }

    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self::new(var(API_KEY_VAR), var(ACCOUNT_ID_VAR), var(AUTH_TOKEN_VAR))
    }

    /// Structural presence check only; the upstream is never consulted.
    /// The API key is reported before the account id.
    pub fn check(&self) -> Option<Error> {
        if self.api_key.trim().is_empty() {
            return Some(Error::MissingCredential { var: API_KEY_VAR });
        }
        if self.account_id.trim().is_empty() {
            return Some(Error::MissingCredential {
                var: ACCOUNT_ID_VAR,
            });
        }
        None
    }

    pub fn is_configured(&self) -> bool {
        self.check().is_none()
    }

    pub fn auth_token(&self) -> Option<&str> {
        let token = self.auth_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// How the tool surface is exposed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Network listener with the SSE session endpoints plus `POST /mcp`
    #[default]
    Sse,
    /// Network listener with `POST /mcp` only
    Http,
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sse" => Ok(TransportMode::Sse),
            "http" => Ok(TransportMode::Http),
            "stdio" => Ok(TransportMode::Stdio),
            other => Err(format!("Unknown transport '{other}'. Use: sse, http, stdio")),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Sse => f.write_str("sse"),
            TransportMode::Http => f.write_str("http"),
            TransportMode::Stdio => f.write_str("stdio"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: TransportMode,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::default(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

impl AppConfig {
    /// Reads `path` if it exists, otherwise returns defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
