pub mod chat;
pub mod client;
pub mod image;
pub mod types;

pub use chat::OpenAiPromptClient;
pub use image::OpenAiImageClient;
