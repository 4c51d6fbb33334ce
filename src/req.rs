use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{config::Credentials, consts::REQUEST_TIMEOUT, prelude::*, BaseUrl, Error};

const ACCOUNT_ID_HEADER: &str = "Account-ID";

/// HTTP verbs used against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// Ordered query string pairs for listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn paged(page: u32, per_page: u32) -> Self {
        Self(vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), per_page.to_string()),
        ])
    }

    /// Free-text search, sent as `q`.
    pub fn search(self, text: Option<&str>) -> Self {
        self.with("q", text)
    }

    /// Field filter, sent as `filters[<field>]`.
    pub fn filter(self, field: &str, value: Option<&str>) -> Self {
        self.with(&format!("filters[{field}]"), value)
    }

    fn with(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Issues authenticated calls against the upstream API.
///
/// A fresh connection is opened for every call and dropped on every exit
/// path; nothing is pooled between calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub base_url: BaseUrl,
    credentials: Arc<Credentials>,
}

impl HttpClient {
    pub fn new(credentials: Arc<Credentials>, base_url: BaseUrl) -> Self {
        Self {
            base_url,
            credentials,
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.credentials.api_key))
            .map_err(|e| Error::request(format!("invalid API key header: {e}")))?;
        let account = HeaderValue::from_str(&self.credentials.account_id)
            .map_err(|e| Error::request(format!("invalid account id header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCOUNT_ID_HEADER, account);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn build_client() -> Result<Client> {
        Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::request(e.to_string()))
    }

    /// Performs one call and returns the decoded JSON body as-is.
    ///
    /// Missing credentials short-circuit before any connection is made.
    /// Status >= 400 becomes [`Error::Api`] with the raw body; every other
    /// failure (timeout, connect, undecodable body) becomes [`Error::Request`].
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<Value> {
        if let Some(config_error) = self.credentials.check() {
            return Err(config_error);
        }

        let url = self.base_url.endpoint_url(endpoint);
        debug!(method = ?method, endpoint, "Upstream request");

        let client = Self::build_client()?;
        let mut builder = client
            .request(method.as_reqwest(), &url)
            .headers(self.headers()?);
        match method {
            Method::Get => {
                if let Some(query) = query {
                    builder = builder.query(query.pairs());
                }
            }
            Method::Post | Method::Put => {
                if let Some(body) = body {
                    builder = builder.json(body);
                }
            }
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, endpoint, "Upstream request failed");
            Error::request(describe(&e))
        })?;

        parse_response(response, endpoint).await
    }

    pub async fn get(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<Value> {
        self.request::<Value>(Method::Get, endpoint, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.request(Method::Post, endpoint, None, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.request(Method::Put, endpoint, None, Some(body)).await
    }
}

async fn parse_response(response: Response, endpoint: &str) -> Result<Value> {
    let status_code = response.status().as_u16();
    let text = response.text().await.map_err(|e| Error::request(describe(&e)))?;

    if status_code >= 400 {
        warn!(status = status_code, endpoint, "Upstream returned error status");
        return Err(Error::api(status_code, text));
    }

    serde_json::from_str(&text).map_err(|e| Error::request(format!("invalid JSON response: {e}")))
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out after {}s", REQUEST_TIMEOUT.as_secs())
    } else {
        err.to_string()
    }
}
