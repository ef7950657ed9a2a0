use super::client::ReplicateHttpClient;
use super::types::{PredictionInput, PredictionRequest, PredictionStatus};
use crate::ai::CaptionService;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct ReplicateCaptionClient {
    http: ReplicateHttpClient,
    model_version: String,
}

impl ReplicateCaptionClient {
    pub fn new(api_token: String, model_version: String) -> Self {
        Self {
            http: ReplicateHttpClient::new(api_token),
            model_version,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        use std::time::Duration;
        self.http = self
            .http
            .with_base_url(base_url)
            .with_poll_intervals(Duration::from_millis(10), Duration::from_secs(5));
        self
    }

    #[cfg(test)]
    fn with_poll_intervals(
        mut self,
        interval: std::time::Duration,
        timeout: std::time::Duration,
    ) -> Self {
        self.http = self.http.with_poll_intervals(interval, timeout);
        self
    }
}

#[async_trait]
impl CaptionService for ReplicateCaptionClient {
    async fn caption_image(&self, data_url: &str) -> Result<String> {
        let request = PredictionRequest {
            version: self.model_version.clone(),
            input: PredictionInput {
                image: data_url.to_string(),
            },
        };

        let created = self.http.create_prediction(&request).await?;
        tracing::debug!("Created prediction {}", created.id);

        let finished = self.http.wait_for_prediction(created).await?;

        match finished.status {
            PredictionStatus::Succeeded => {
                let caption = finished
                    .output
                    .map(|output| output.into_text())
                    .unwrap_or_default();
                if caption.trim().is_empty() {
                    return Err(Error::Caption(
                        "Prediction succeeded but returned no caption".to_string(),
                    ));
                }
                tracing::info!("Caption ({} chars): {}", caption.len(), caption);
                Ok(caption)
            }
            status => Err(Error::Caption(format!(
                "Prediction {} ended as {:?}: {}",
                finished.id,
                status,
                finished.error.unwrap_or_else(|| "no error detail".to_string())
            ))),
        }
    }
}
