use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{DeckError, Result};
use crate::config::ServerConfig;
use crate::domain::Article;
use crate::fetcher::ArticleFetcher;
use crate::normalizer::Normalizer;

pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&server.base_url)?;

        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(server.user_agent.as_str());

        // No timeout unless configured: a hung request keeps its store loading.
        if let Some(secs) = server.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            normalizer: Normalizer::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ArticleFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<Vec<Article>> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| DeckError::fetch_failed(endpoint, e))?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DeckError::fetch_failed(endpoint, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| DeckError::fetch_failed(endpoint, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DeckError::fetch_failed(endpoint, e))?;

        self.normalizer.normalize(endpoint, &body)
    }
}
