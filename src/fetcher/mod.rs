//! reqwest-backed fetch collaborator

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::SearchError;
use crate::query::RequestTarget;
use crate::traits::{FetchedPage, PageFetcher};

/// Downloads search pages over HTTP
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.fetch_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn get(&self, target: &RequestTarget) -> Result<FetchedPage, SearchError> {
        let response = self.client.get(target.as_str()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(FetchedPage {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), target);

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        target: &RequestTarget,
        cancel: &CancellationToken,
    ) -> Result<FetchedPage, SearchError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(SearchError::Cancelled),
            page = self.get(target) => page,
        }
    }
}
