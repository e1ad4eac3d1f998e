//! Driver entries and per-field strategy edits

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Compound;
use crate::{Result, StrategistError};

/// Highest number of planned pit stops a driver may carry.
pub const MAX_STOPS: u8 = 5;

/// One competitor's race entry and strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Driver {
    /// Three-letter code, stable across reloads of the same race
    pub code: String,
    /// Broadcast name, when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Team display label
    #[serde(default)]
    pub team: String,
    /// Starting position, unique within a race
    pub grid: u32,
    /// Tyre fitted at the start
    pub start_compound: Compound,
    /// Planned pit stops, 0..=5
    pub stops: u8,
    /// Seconds per lap relative to the field baseline; negative is faster
    pub pace_delta: f64,
    /// Lap-time variance proxy
    #[serde(default)]
    pub consistency: f64,
}

/// Editable strategy fields of a [`Driver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverField {
    StartCompound,
    Stops,
    PaceDelta,
    Consistency,
}

impl fmt::Display for DriverField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverField::StartCompound => "start compound",
            DriverField::Stops => "pit stops",
            DriverField::PaceDelta => "pace delta",
            DriverField::Consistency => "consistency",
        };
        f.write_str(name)
    }
}

/// A single-field edit: the field and its new value in one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverEdit {
    StartCompound(Compound),
    Stops(u8),
    PaceDelta(f64),
    Consistency(f64),
}

impl DriverEdit {
    /// The field this edit targets.
    pub fn field(&self) -> DriverField {
        match self {
            DriverEdit::StartCompound(_) => DriverField::StartCompound,
            DriverEdit::Stops(_) => DriverField::Stops,
            DriverEdit::PaceDelta(_) => DriverField::PaceDelta,
            DriverEdit::Consistency(_) => DriverField::Consistency,
        }
    }

    /// Check the value against the field's domain.
    pub fn validate(&self) -> Result<()> {
        match *self {
            DriverEdit::StartCompound(_) => Ok(()),
            DriverEdit::Stops(stops) if stops > MAX_STOPS => Err(StrategistError::invalid_edit(
                DriverField::Stops,
                format!("{stops} exceeds the maximum of {MAX_STOPS}"),
            )),
            DriverEdit::Stops(_) => Ok(()),
            DriverEdit::PaceDelta(delta) if !delta.is_finite() => Err(
                StrategistError::invalid_edit(DriverField::PaceDelta, "value must be finite"),
            ),
            DriverEdit::PaceDelta(_) => Ok(()),
            DriverEdit::Consistency(value) if !value.is_finite() || value < 0.0 => {
                Err(StrategistError::invalid_edit(
                    DriverField::Consistency,
                    format!("{value} is not a finite, non-negative number"),
                ))
            }
            DriverEdit::Consistency(_) => Ok(()),
        }
    }
}

impl Driver {
    /// Return a copy of this driver with one field replaced.
    pub fn with_edit(&self, edit: DriverEdit) -> Result<Driver> {
        edit.validate()?;
        let mut next = self.clone();
        match edit {
            DriverEdit::StartCompound(compound) => next.start_compound = compound,
            DriverEdit::Stops(stops) => next.stops = stops,
            DriverEdit::PaceDelta(delta) => next.pace_delta = delta,
            DriverEdit::Consistency(value) => next.consistency = value,
        }
        Ok(next)
    }

    /// Name to show in lists: the broadcast name when known, the code otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}
