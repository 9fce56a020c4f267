use crate::{
    config::RunnerConfig,
    error::{GenerateError, Result},
    models::{GenerationPayload, RawResponse},
};
use reqwest::{header, Client};

/// Thin wrapper over one reqwest client aimed at the generation endpoint.
pub struct ImageClient {
    client: Client,
    endpoint: String,
}

impl ImageClient {
    pub fn new(config: &RunnerConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(GenerateError::ConfigError("Endpoint URL is required".into()));
        }

        // Idle pool of zero: the connection is dropped after the one exchange.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GenerateError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, payload: &GenerationPayload) -> Result<RawResponse> {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Generation request payload: {}",
                serde_json::to_string(payload).unwrap_or_default()
            );
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerateError::RequestError(format!("Generation request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::ResponseError(format!("Failed to read response body: {}", e)))?;

        log::debug!("Generation response: status={} bytes={}", status, body.len());

        Ok(RawResponse { status, body })
    }
}
