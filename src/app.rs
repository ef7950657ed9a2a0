//! Orchestration of the caption -> prompt synthesis -> image synthesis flow.

use crate::ai::{
    CaptionService, ImageSynthesisService, OpenAiImageClient, OpenAiPromptClient,
    PromptSynthesisService, ReplicateCaptionClient,
};
use crate::models::{Config, GeneratedAvatar};
use crate::upload::UploadedImage;
use crate::{prompts, Result};
use tracing::info;

/// Composes the three adapters behind their service traits.
pub struct AvatarApp {
    caption: Box<dyn CaptionService>,
    prompt: Box<dyn PromptSynthesisService>,
    image: Box<dyn ImageSynthesisService>,
    pixel_art_style: String,
}

/// Injectable service bundle used to construct [`AvatarApp`] in tests/harnesses.
pub struct AvatarServices {
    pub caption: Box<dyn CaptionService>,
    pub prompt: Box<dyn PromptSynthesisService>,
    pub image: Box<dyn ImageSynthesisService>,
}

impl AvatarApp {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AvatarServices) -> Self {
        Self {
            caption: services.caption,
            prompt: services.prompt,
            image: services.image,
            pixel_art_style: prompts::PIXEL_ART_STYLE.trim().to_string(),
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        let caption = Box::new(ReplicateCaptionClient::new(
            config.replicate_api_token.clone(),
            config.caption_model_version.clone(),
        ));
        let prompt = Box::new(OpenAiPromptClient::new(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
        ));
        let image = Box::new(OpenAiImageClient::new(
            config.openai_api_key,
            config.image_model,
        ));

        Ok(Self::with_services(AvatarServices {
            caption,
            prompt,
            image,
        }))
    }

    /// Caption a photo: encode it as a data URL and describe it.
    pub async fn caption_photo(&self, photo: &UploadedImage) -> Result<String> {
        info!("Captioning photo ({} bytes)", photo.len());
        let data_url = photo.to_data_url();
        self.caption.caption_image(&data_url).await
    }

    /// Generate an avatar from caption text: synthesize the image prompt,
    /// then request the image. The two calls share one all-or-nothing result.
    pub async fn generate_avatar(&self, caption_text: &str) -> Result<GeneratedAvatar> {
        let prompt_text = self
            .prompt
            .synthesize_prompt(&self.pixel_art_style, caption_text)
            .await?;
        info!(
            "Synthesized image prompt ({} chars): {}",
            prompt_text.len(),
            prompt_text
        );

        let image_url = self.image.synthesize_image(&prompt_text).await?;
        info!("Generated avatar: {}", image_url);

        Ok(GeneratedAvatar {
            prompt_text,
            image_url,
        })
    }

    /// One-click flow: caption the photo and generate the avatar in one call.
    pub async fn generate_from_photo(&self, photo: &UploadedImage) -> Result<GeneratedAvatar> {
        let caption_text = self.caption_photo(photo).await?;
        self.generate_avatar(&caption_text).await
    }
}

/// Per-user view state: selected photo, caption text, result URL, and one
/// in-flight flag per stage. Mirrors the front-end's loading/disable logic.
pub struct AvatarSession {
    app: AvatarApp,
    selected: Option<UploadedImage>,
    caption_text: String,
    image_url: String,
    last_error: Option<String>,
    is_captioning: bool,
    is_generating: bool,
}

impl AvatarSession {
    pub fn new(app: AvatarApp) -> Self {
        Self {
            app,
            selected: None,
            caption_text: String::new(),
            image_url: String::new(),
            last_error: None,
            is_captioning: false,
            is_generating: false,
        }
    }

    pub fn select_photo(&mut self, photo: UploadedImage) {
        self.selected = Some(photo);
    }

    /// Set caption text directly, skipping the captioning stage. This is the
    /// two-step flow's hand-off point when the caption was obtained earlier.
    pub fn set_caption(&mut self, text: String) {
        self.caption_text = text;
    }

    pub fn can_caption(&self) -> bool {
        self.selected.is_some() && !self.is_captioning
    }

    pub fn can_generate(&self) -> bool {
        !self.caption_text.is_empty() && !self.is_generating
    }

    pub fn caption_text(&self) -> &str {
        &self.caption_text
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_captioning(&self) -> bool {
        self.is_captioning
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Two-step flow, stage one. No-op when no photo is selected or a caption
    /// request is already in flight.
    pub async fn run_caption(&mut self) -> Result<()> {
        if !self.can_caption() {
            return Ok(());
        }

        self.is_captioning = true;
        self.caption_text.clear();
        self.last_error = None;

        // Guarded by can_caption above.
        let result = match &self.selected {
            Some(photo) => self.app.caption_photo(photo).await,
            None => {
                self.is_captioning = false;
                return Ok(());
            }
        };

        self.is_captioning = false;
        match result {
            Ok(caption) => {
                self.caption_text = caption;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Two-step flow, stage two. No-op when there is no caption text or a
    /// generation request is already in flight.
    pub async fn run_generate(&mut self) -> Result<()> {
        if !self.can_generate() {
            return Ok(());
        }

        self.is_generating = true;
        self.image_url.clear();
        self.last_error = None;

        let result = self.app.generate_avatar(&self.caption_text).await;

        self.is_generating = false;
        match result {
            Ok(avatar) => {
                self.image_url = avatar.image_url;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// One-click flow: caption and generate chained, exposing only the final
    /// image URL or an error. No-op without a selected photo or while either
    /// stage is in flight.
    pub async fn run_one_click(&mut self) -> Result<()> {
        if self.selected.is_none() || self.is_captioning || self.is_generating {
            return Ok(());
        }

        self.is_captioning = true;
        self.is_generating = true;
        self.caption_text.clear();
        self.image_url.clear();
        self.last_error = None;

        let result = match &self.selected {
            Some(photo) => self.app.generate_from_photo(photo).await,
            None => {
                self.is_captioning = false;
                self.is_generating = false;
                return Ok(());
            }
        };

        self.is_captioning = false;
        self.is_generating = false;
        match result {
            Ok(avatar) => {
                self.image_url = avatar.image_url;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AvatarApp, AvatarServices, AvatarSession};
    use crate::ai::{MockCaptionClient, MockImageSynthesisClient, MockPromptSynthesisClient};
    use crate::upload::UploadedImage;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

    fn build_test_app(
        caption: MockCaptionClient,
        prompt: MockPromptSynthesisClient,
        image: MockImageSynthesisClient,
    ) -> AvatarApp {
        AvatarApp::with_services(AvatarServices {
            caption: Box::new(caption),
            prompt: Box::new(prompt),
            image: Box::new(image),
        })
    }

    fn test_photo() -> UploadedImage {
        UploadedImage::from_bytes(PNG_MAGIC.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_caption_is_noop_without_selected_photo() {
        let caption = MockCaptionClient::new();
        let probe = caption.clone();
        let app = build_test_app(
            caption,
            MockPromptSynthesisClient::new(),
            MockImageSynthesisClient::new(),
        );

        let mut session = AvatarSession::new(app);
        assert!(!session.can_caption());

        session.run_caption().await.unwrap();
        assert_eq!(probe.get_call_count(), 0);
        assert!(session.caption_text().is_empty());
    }

    #[tokio::test]
    async fn test_generate_is_noop_without_caption_text() {
        let prompt = MockPromptSynthesisClient::new();
        let probe = prompt.clone();
        let app = build_test_app(
            MockCaptionClient::new(),
            prompt,
            MockImageSynthesisClient::new(),
        );

        let mut session = AvatarSession::new(app);
        session.select_photo(test_photo());
        assert!(!session.can_generate());

        session.run_generate().await.unwrap();
        assert_eq!(probe.get_call_count(), 0);
        assert!(session.image_url().is_empty());
    }

    #[tokio::test]
    async fn test_two_step_flow_sets_caption_then_url() {
        let app = build_test_app(
            MockCaptionClient::new()
                .with_caption_response("a person in a blue jacket".to_string()),
            MockPromptSynthesisClient::new().with_prompt_response("pixel prompt".to_string()),
            MockImageSynthesisClient::new()
                .with_url_response("https://images.example.com/img.png".to_string()),
        );

        let mut session = AvatarSession::new(app);
        session.select_photo(test_photo());

        session.run_caption().await.unwrap();
        assert_eq!(session.caption_text(), "a person in a blue jacket");
        assert!(!session.is_captioning());

        session.run_generate().await.unwrap();
        assert_eq!(session.image_url(), "https://images.example.com/img.png");
        assert!(!session.is_generating());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_caption_failure_clears_flag_and_records_error() {
        let app = build_test_app(
            MockCaptionClient::new().with_error_response("caption service down".to_string()),
            MockPromptSynthesisClient::new(),
            MockImageSynthesisClient::new(),
        );

        let mut session = AvatarSession::new(app);
        session.select_photo(test_photo());

        let err = session.run_caption().await.unwrap_err();
        assert!(err.to_string().contains("caption service down"));
        assert!(!session.is_captioning());
        assert!(session.caption_text().is_empty());
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_url_unset_and_flag_false() {
        let image = MockImageSynthesisClient::new().with_error_response("quota".to_string());
        let app = build_test_app(
            MockCaptionClient::new(),
            MockPromptSynthesisClient::new(),
            image,
        );

        let mut session = AvatarSession::new(app);
        session.set_caption("a person in a blue jacket".to_string());

        session.run_generate().await.unwrap_err();
        assert!(session.image_url().is_empty());
        assert!(!session.is_generating());
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn test_one_click_flow_shows_only_final_url() {
        let caption = MockCaptionClient::new()
            .with_caption_response("a person in a blue jacket".to_string());
        let caption_probe = caption.clone();
        let image = MockImageSynthesisClient::new()
            .with_url_response("https://images.example.com/img.png".to_string());
        let image_probe = image.clone();

        let app = build_test_app(caption, MockPromptSynthesisClient::new(), image);
        let mut session = AvatarSession::new(app);
        session.select_photo(test_photo());

        session.run_one_click().await.unwrap();
        assert_eq!(session.image_url(), "https://images.example.com/img.png");
        assert!(!session.is_captioning());
        assert!(!session.is_generating());
        assert_eq!(caption_probe.get_call_count(), 1);
        assert_eq!(image_probe.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_one_click_is_noop_without_photo() {
        let caption = MockCaptionClient::new();
        let probe = caption.clone();
        let app = build_test_app(
            caption,
            MockPromptSynthesisClient::new(),
            MockImageSynthesisClient::new(),
        );

        let mut session = AvatarSession::new(app);
        session.run_one_click().await.unwrap();
        assert_eq!(probe.get_call_count(), 0);
        assert!(session.image_url().is_empty());
    }

    #[tokio::test]
    async fn test_one_click_failure_at_caption_stage_stops_chain() {
        let prompt = MockPromptSynthesisClient::new();
        let prompt_probe = prompt.clone();
        let app = build_test_app(
            MockCaptionClient::new().with_error_response("network".to_string()),
            prompt,
            MockImageSynthesisClient::new(),
        );

        let mut session = AvatarSession::new(app);
        session.select_photo(test_photo());

        session.run_one_click().await.unwrap_err();
        assert_eq!(prompt_probe.get_call_count(), 0);
        assert!(session.image_url().is_empty());
        assert!(!session.is_captioning());
        assert!(!session.is_generating());
    }
}
