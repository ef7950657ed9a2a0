use super::types::{Prediction, PredictionRequest};
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// How often to poll a pending prediction and for how long before giving up.
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ReplicateHttpClient {
    client: Client,
    api_token: String,
    base_url: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl ReplicateHttpClient {
    pub fn new(api_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            poll_timeout: POLL_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[cfg(test)]
    pub fn with_poll_intervals(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    pub async fn create_prediction(&self, request: &PredictionRequest) -> Result<Prediction> {
        tracing::debug!("Creating Replicate prediction");

        let url = format!("{}/v1/predictions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Replicate: {}", e);
                e
            })?;

        self.parse_prediction(response).await
    }

    pub async fn get_prediction(&self, id: &str) -> Result<Prediction> {
        let url = format!("{}/v1/predictions/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to poll Replicate prediction {}: {}", id, e);
                e
            })?;

        self.parse_prediction(response).await
    }

    /// Poll a pending prediction until it reaches a terminal status.
    pub async fn wait_for_prediction(&self, prediction: Prediction) -> Result<Prediction> {
        let mut current = prediction;
        let started = tokio::time::Instant::now();

        while !current.status.is_terminal() {
            if started.elapsed() >= self.poll_timeout {
                return Err(Error::Caption(format!(
                    "Prediction {} did not complete within {}s",
                    current.id,
                    self.poll_timeout.as_secs()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
            current = self.get_prediction(&current.id).await?;
        }

        Ok(current)
    }

    async fn parse_prediction(&self, response: reqwest::Response) -> Result<Prediction> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Replicate API error (status {}): {}", status, error_text);
            return Err(Error::Caption(format!(
                "Replicate API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Replicate response: {}\nBody: {}", e, body);
            Error::Caption(format!("Failed to parse Replicate response: {}", e))
        })
    }
}
