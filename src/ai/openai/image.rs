use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::ImageSynthesisService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const IMAGE_SIZE: &str = "1024x1024";

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: Option<String>,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(60)),
            model,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageSynthesisService for OpenAiImageClient {
    async fn synthesize_image(&self, prompt: &str) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        };

        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        response
            .data
            .first()
            .and_then(|image| image.url.clone())
            .ok_or_else(|| Error::AiProvider("No image URL in OpenAI response".to_string()))
    }
}
