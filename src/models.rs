//! Data models and structures
//!
//! Defines the generated-avatar result shape and runtime configuration.

use serde::{Deserialize, Serialize};

/// Default captioning model: methexis-inc/img2prompt on Replicate.
pub const DEFAULT_CAPTION_MODEL_VERSION: &str =
    "50adaf2d3ad20a6f911a8a9e3ccf777b263b8596fbd2c8fc26e8888f8a0edbb5";

/// Default chat-completion model used for prompt synthesis.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4-0613";

/// Outcome of one avatar generation: the synthesized image prompt and the
/// URL of the hosted result image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAvatar {
    pub prompt_text: String,
    pub image_url: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub replicate_api_token: String,
    pub openai_api_key: String,
    pub caption_model_version: String,
    pub chat_model: String,
    /// Image-generation model. `None` lets the provider pick its default.
    pub image_model: Option<String>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            replicate_api_token: std::env::var("REPLICATE_API_TOKEN")
                .map_err(|_| crate::Error::Generic("REPLICATE_API_TOKEN not set".to_string()))?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .map_err(|_| crate::Error::Generic("OPENAI_API_KEY not set".to_string()))?,
            caption_model_version: std::env::var("CAPTION_MODEL_VERSION")
                .unwrap_or_else(|_| DEFAULT_CAPTION_MODEL_VERSION.to_string()),
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            image_model: std::env::var("IMAGE_MODEL").ok(),
        })
    }
}
