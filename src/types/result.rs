//! Prediction requests and responses

use serde::{Deserialize, Serialize};

use super::{Driver, RadioMessage};

/// Predicted result for one driver, as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ClassificationEntry {
    pub code: String,
    /// Finishing position, 1..=N
    pub predicted_rank: u32,
    /// Grid slot the driver started from
    pub start_pos: u32,
    #[serde(default)]
    pub points: f64,
    /// Gain/loss as the service computed it; never trusted, see [`crate::annotate`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_loss: Option<i32>,
    /// Unrounded model output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_position_raw: Option<f64>,
    /// Raw model delta (finish minus start)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl ClassificationEntry {
    pub fn new(code: impl Into<String>, predicted_rank: u32, start_pos: u32) -> Self {
        Self {
            code: code.into(),
            predicted_rank,
            start_pos,
            points: 0.0,
            gain_loss: None,
            predicted_position_raw: None,
            delta: None,
        }
    }
}

/// Weather block of a prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Weather {
    pub is_wet: bool,
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PredictRequest {
    pub drivers: Vec<Driver>,
    pub weather: Weather,
}

/// Body returned by `POST /predict`.
///
/// The service answers either with the full report object or, in older
/// deployments, with the bare classification array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Bare(Vec<ClassificationEntry>),
    Report {
        classification: Vec<ClassificationEntry>,
        #[serde(default)]
        story: Vec<String>,
        #[serde(default)]
        radio: Vec<RadioMessage>,
    },
}

impl PredictResponse {
    /// Split into classification, narrative log and radio batch.
    pub fn into_parts(self) -> (Vec<ClassificationEntry>, Vec<String>, Vec<RadioMessage>) {
        match self {
            PredictResponse::Report { classification, story, radio } => {
                (classification, story, radio)
            }
            PredictResponse::Bare(classification) => (classification, Vec::new(), Vec::new()),
        }
    }
}

/// Tone of a narrative log line, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryTone {
    Win,
    Trouble,
    Neutral,
}

impl StoryTone {
    pub fn of(line: &str) -> Self {
        if line.contains("win") {
            StoryTone::Win
        } else if line.contains("problems") || line.contains("struggles") {
            StoryTone::Trouble
        } else {
            StoryTone::Neutral
        }
    }
}
