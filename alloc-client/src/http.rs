//! HTTP client for network-based API calls

use crate::endpoint::Endpoint;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;
use std::time::Instant;

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET an endpoint and decode its JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<T>;

    fn base_url(&self) -> &str;
}

/// Network HTTP client backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().timeout(config.timeout_duration());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<ApiErrorBody>(&text).ok();
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                // A 2xx body can still carry an empty-lookup error
                if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text)
                    && body.is_no_results()
                {
                    return Err(ClientError::from_status(status.as_u16(), Some(body)));
                }
                Err(ClientError::Decoding(err))
            }
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<T> {
        let url = endpoint.url(&self.base_url)?;
        let started = Instant::now();

        let result = match self.client.get(url.clone()).send().await {
            Ok(response) => Self::handle_response(response).await,
            Err(err) => Err(ClientError::Network(err)),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(endpoint = endpoint.name(), %url, elapsed_ms, "GET ok"),
            Err(error) => tracing::warn!(endpoint = endpoint.name(), %url, elapsed_ms, %error, "GET failed"),
        }
        result
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
