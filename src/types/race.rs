//! Race calendar, race detail and radio payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Driver;

/// Identifies one race: season plus round number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceKey {
    pub year: u32,
    pub round: u32,
}

impl RaceKey {
    pub fn new(year: u32, round: u32) -> Self {
        Self { year, round }
    }
}

impl fmt::Display for RaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} round {}", self.year, self.round)
    }
}

/// Calendar entry from `GET /races/{year}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
pub struct RaceSummary {
    pub round_number: u32,
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Descriptive circuit metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CircuitInfo {
    pub name: String,
    pub location: String,
    pub country: String,
}

/// Body of `GET /race/{year}/{round}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RaceDetail {
    pub drivers: Vec<Driver>,
    pub is_wet: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_info: Option<CircuitInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    /// Event title, e.g. "Bahrain Grand Prix"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

/// Transient team radio notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RadioMessage {
    pub driver: String,
    pub message: String,
    pub lap: u32,
}

impl RadioMessage {
    pub fn new(driver: impl Into<String>, message: impl Into<String>, lap: u32) -> Self {
        Self { driver: driver.into(), message: message.into(), lap }
    }
}
