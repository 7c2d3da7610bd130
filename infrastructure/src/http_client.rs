use domain::{ChatTransport, ChatTurn, RequestPayload, ResponsePayload, TransportError};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// Posts chat requests to the advisor backend over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Self::build(endpoint, Client::builder())
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::build(&config.endpoint, builder)
    }

    fn build(endpoint: &str, builder: reqwest::ClientBuilder) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| TransportError::Network(format!("invalid endpoint {endpoint:?}: {e}")))?;
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `/health` on the same origin as the chat endpoint.
    pub fn health_url(&self) -> Result<Url, TransportError> {
        self.endpoint
            .join("/health")
            .map_err(|e| TransportError::Network(e.to_string()))
    }

    /// Whether the backend answers its health check. Never errors.
    pub async fn probe_health(&self) -> bool {
        let Ok(url) = self.health_url() else {
            return false;
        };
        let response = match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), "health check rejected");
                return false;
            }
            Err(err) => {
                debug!(error = %err, "health check failed");
                return false;
            }
        };
        match response.json::<HealthResponse>().await {
            Ok(health) => health.status == "ok",
            Err(err) => {
                debug!(error = %err, "health check returned unexpected body");
                false
            }
        }
    }
}

impl ChatTransport for HttpTransport {
    async fn send_message(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ResponsePayload, TransportError> {
        let request = RequestPayload::new(message, history);
        debug!(endpoint = %self.endpoint, history = history.len(), "sending chat request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
