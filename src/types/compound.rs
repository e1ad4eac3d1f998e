//! Tyre compounds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Tyre compound a stint is run on.
///
/// Serialised in upper case (`"SOFT"`). Decoding is case-insensitive because the
/// prediction service mixes `"Medium"` and `"MEDIUM"` depending on its data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
}

impl Compound {
    /// Every compound, in legend order.
    pub const ALL: [Compound; 5] =
        [Compound::Soft, Compound::Medium, Compound::Hard, Compound::Intermediate, Compound::Wet];

    /// Wire name of the compound.
    pub fn as_str(self) -> &'static str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
        }
    }

    /// Default colour token, used when a stint carries none of its own.
    pub fn color(self) -> &'static str {
        match self {
            Compound::Soft => "#da291c",
            Compound::Medium => "#ffd12e",
            Compound::Hard => "#f0f0ec",
            Compound::Intermediate => "#43b02a",
            Compound::Wet => "#0067a5",
        }
    }

    /// Single-letter label shown inside a stint segment.
    pub fn label(self) -> char {
        match self {
            Compound::Soft => 'S',
            Compound::Medium => 'M',
            Compound::Hard => 'H',
            Compound::Intermediate => 'I',
            Compound::Wet => 'W',
        }
    }

    /// Whether the compound is a rain tyre.
    pub fn is_wet_weather(self) -> bool {
        matches!(self, Compound::Intermediate | Compound::Wet)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a compound name is not one of the five known tyres.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tyre compound '{0}'")]
pub struct UnknownCompound(pub String);

impl FromStr for Compound {
    type Err = UnknownCompound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOFT" => Ok(Compound::Soft),
            "MEDIUM" => Ok(Compound::Medium),
            "HARD" => Ok(Compound::Hard),
            "INTERMEDIATE" | "INTER" => Ok(Compound::Intermediate),
            "WET" => Ok(Compound::Wet),
            _ => Err(UnknownCompound(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Compound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
