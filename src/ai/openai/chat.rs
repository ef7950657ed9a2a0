use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::ai::PromptSynthesisService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Low temperature keeps the synthesized prompt close to the inputs.
const PROMPT_TEMPERATURE: f32 = 0.2;

pub struct OpenAiPromptClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiPromptClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(30)),
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
impl PromptSynthesisService for OpenAiPromptClient {
    async fn synthesize_prompt(
        &self,
        pixel_art_style: &str,
        person_description: &str,
    ) -> Result<String> {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(prompts::CHAT_SYSTEM.to_string()),
        };

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(prompts::render(
                prompts::CHAT_USER,
                &[
                    ("pixel_art_style", pixel_art_style),
                    ("person_description", person_description),
                ],
            )),
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![system_message, user_message],
            temperature: PROMPT_TEMPERATURE,
        };

        let response: ChatCompletionResponse =
            self.http.post("/v1/chat/completions", &request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))
    }
}
