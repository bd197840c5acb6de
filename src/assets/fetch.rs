//! HTTP access for asset resolution.
//!
//! Resolvers never talk to `reqwest` directly; they go through the [`Fetch`]
//! trait so tests (and embedders with their own HTTP stack) can swap it out.

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use thiserror::Error;

use crate::error::{ErrorCode, FolioError};

/// How a request should treat intermediary caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Default,
    /// Accept a stale cached response over a network round trip.
    PreferCache,
}

/// A completed HTTP exchange, successful or not.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: no response was received.
#[derive(Debug, Clone, Error)]
#[error("request to {url} failed: {message}")]
pub struct FetchError {
    pub url: String,
    pub message: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str, mode: CacheMode) -> Result<FetchResponse, FetchError>;
}

/// [`Fetch`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FolioError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                FolioError::new(ErrorCode::RenderFailed, format!("HTTP client error: {}", e))
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str, mode: CacheMode) -> Result<FetchResponse, FetchError> {
        let mut request = self.client.get(url);
        if mode == CacheMode::PreferCache {
            request = request.header(CACHE_CONTROL, "max-stale");
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::new(url, e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(url, format!("failed to read body: {}", e)))?;

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}
