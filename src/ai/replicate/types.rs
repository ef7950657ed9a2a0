//! Replicate-specific request/response payloads.

use serde::{Deserialize, Serialize};

/// Request body for creating a prediction.
#[derive(Debug, Serialize)]
pub struct PredictionRequest {
    pub version: String,
    pub input: PredictionInput,
}

/// Model input: the photo as a data URL.
#[derive(Debug, Serialize)]
pub struct PredictionInput {
    pub image: String,
}

/// Prediction lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

/// Prediction resource as returned by create and get.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    pub output: Option<CaptionOutput>,
    pub error: Option<String>,
}

/// Captioning models return either a single string or a list of lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionOutput {
    Text(String),
    Lines(Vec<String>),
}

impl CaptionOutput {
    /// Normalize to a single string: lists are joined with newlines in
    /// original order, single strings pass through unchanged.
    pub fn into_text(self) -> String {
        match self {
            CaptionOutput::Text(text) => text,
            CaptionOutput::Lines(lines) => lines.join("\n"),
        }
    }
}
