use super::{CaptionService, ImageSynthesisService, PromptSynthesisService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Queued mock response: a canned success or an injected failure message.
type MockResponse = std::result::Result<String, String>;

fn next_response(
    responses: &Arc<Mutex<Vec<MockResponse>>>,
    call_count: &Arc<Mutex<usize>>,
) -> Option<MockResponse> {
    let mut count = call_count.lock().unwrap();
    *count += 1;

    let responses = responses.lock().unwrap();
    if responses.is_empty() {
        None
    } else {
        Some(responses[(*count - 1) % responses.len()].clone())
    }
}

#[derive(Clone)]
pub struct MockCaptionClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCaptionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_caption_response(self, caption: String) -> Self {
        self.responses.lock().unwrap().push(Ok(caption));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockCaptionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionService for MockCaptionClient {
    async fn caption_image(&self, _data_url: &str) -> Result<String> {
        match next_response(&self.responses, &self.call_count) {
            None => Ok("a person standing in front of a plain background".to_string()),
            Some(Ok(caption)) => Ok(caption),
            Some(Err(message)) => Err(Error::Caption(message)),
        }
    }
}

#[derive(Clone)]
pub struct MockPromptSynthesisClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockPromptSynthesisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_prompt_response(self, prompt: String) -> Self {
        self.responses.lock().unwrap().push(Ok(prompt));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockPromptSynthesisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptSynthesisService for MockPromptSynthesisClient {
    async fn synthesize_prompt(
        &self,
        pixel_art_style: &str,
        person_description: &str,
    ) -> Result<String> {
        match next_response(&self.responses, &self.call_count) {
            None => Ok(format!(
                "Pixel art ({}) of {}",
                pixel_art_style, person_description
            )),
            Some(Ok(prompt)) => Ok(prompt),
            Some(Err(message)) => Err(Error::AiProvider(message)),
        }
    }
}

#[derive(Clone)]
pub struct MockImageSynthesisClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageSynthesisClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.responses.lock().unwrap().push(Ok(url));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageSynthesisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSynthesisService for MockImageSynthesisClient {
    async fn synthesize_image(&self, _prompt: &str) -> Result<String> {
        match next_response(&self.responses, &self.call_count) {
            None => Ok("https://images.mock.test/avatar.png".to_string()),
            Some(Ok(url)) => Ok(url),
            Some(Err(message)) => Err(Error::AiProvider(message)),
        }
    }
}
