use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use url::Url;
use super::ChatBackend;
use crate::config::SessionConfig;
use crate::error::{ ConfigError, ExchangeFailure };
use crate::models::chat::{ ChatRequest, ChatResponse };

#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: HttpClient,
    endpoint: Url,
    health_url: Url,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
        // `/chat` and `/health` are siblings on the backend.
        let health_url = endpoint.join("health").map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        Ok(Self {
            http: HttpClient::new(),
            endpoint,
            health_url,
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        Self::new(config.endpoint.clone())
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    /// Probes `GET /health`, expecting `{"status": "ok"}`.
    pub async fn health_check(&self) -> Result<(), ExchangeFailure> {
        let resp = self.http.get(self.health_url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeFailure::Status(status));
        }
        let body = resp.bytes().await?;
        let health = serde_json
            ::from_slice::<HealthResponse>(&body)
            .map_err(|e| ExchangeFailure::MalformedBody(e.to_string()))?;
        if health.status != "ok" {
            return Err(
                ExchangeFailure::MalformedBody(format!("unexpected health status '{}'", health.status))
            );
        }
        Ok(())
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn exchange(&self, request: &ChatRequest) -> Result<ChatResponse, ExchangeFailure> {
        debug!(
            "POST {} (message: {} chars, history: {} entries)",
            self.endpoint,
            request.message.chars().count(),
            request.history.len()
        );
        let resp = self.http.post(self.endpoint.clone()).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeFailure::Status(status));
        }
        let body = resp.bytes().await?;
        serde_json
            ::from_slice::<ChatResponse>(&body)
            .map_err(|e| ExchangeFailure::MalformedBody(e.to_string()))
    }
}
