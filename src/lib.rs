//! Pixel-art avatar generator - turns a user photo into a pixel-art character
//!
//! Captions the photo with a hosted image-to-text model, expands the caption
//! into an image-generation prompt with a chat-completion model, then requests
//! the final avatar image from a hosted image-generation model.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompts;
pub mod upload;

pub use error::{Error, Result};
