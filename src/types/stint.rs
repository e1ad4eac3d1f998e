//! Tyre stints and per-driver strategies

use serde::{Deserialize, Serialize};

use super::Compound;

/// One continuous tyre usage interval, laps inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Stint {
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
    /// Colour token sent by the service, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Stint {
    pub fn new(compound: Compound, start_lap: u32, end_lap: u32) -> Self {
        Self { compound, start_lap, end_lap, color: None }
    }

    /// Number of laps covered, counting both ends.
    pub fn laps(&self) -> u32 {
        self.end_lap.saturating_sub(self.start_lap) + 1
    }

    /// Colour to render the stint with.
    pub fn color_token(&self) -> &str {
        self.color.as_deref().unwrap_or_else(|| self.compound.color())
    }
}

/// Ordered stints of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverStrategy {
    /// Driver identifier as reported by the service
    pub driver: String,
    #[serde(default)]
    pub stints: Vec<Stint>,
}

impl DriverStrategy {
    /// Last lap of the final stint, 0 when there are no stints.
    pub fn final_lap(&self) -> u32 {
        self.stints.last().map(|stint| stint.end_lap).unwrap_or(0)
    }

    /// Pit stops implied by the stint count.
    pub fn stops(&self) -> usize {
        self.stints.len().saturating_sub(1)
    }
}
