//! AI service integration for captioning, prompt synthesis, and image synthesis
//!
//! Provides interfaces to the Replicate predictions API (image captioning) and
//! OpenAI's chat-completion and image-generation APIs.

pub mod mime;
pub mod mock;
pub mod openai;
pub mod replicate;

pub use mock::{MockCaptionClient, MockImageSynthesisClient, MockPromptSynthesisClient};
pub use openai::{OpenAiImageClient, OpenAiPromptClient};
pub use replicate::ReplicateCaptionClient;

use crate::Result;
use async_trait::async_trait;

/// Turns an uploaded photo (as a data URL) into a text description.
#[async_trait]
pub trait CaptionService: Send + Sync {
    async fn caption_image(&self, data_url: &str) -> Result<String>;
}

/// Turns a style description plus a character description into a single
/// image-generation prompt.
#[async_trait]
pub trait PromptSynthesisService: Send + Sync {
    async fn synthesize_prompt(
        &self,
        pixel_art_style: &str,
        person_description: &str,
    ) -> Result<String>;
}

/// Turns an image-generation prompt into a URL of a hosted result image.
#[async_trait]
pub trait ImageSynthesisService: Send + Sync {
    async fn synthesize_image(&self, prompt: &str) -> Result<String>;
}
