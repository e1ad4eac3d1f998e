//! The race session aggregate

use std::sync::Arc;

use super::{
    CircuitInfo, Driver, DriverEdit, DriverStrategy, PredictRequest, RaceDetail, RaceKey,
    StoryTone, Weather,
};
use crate::classification::AnnotatedClassification;
use crate::layout::{StrategyLayout, layout};
use crate::{Result, StrategistError};

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Prediction {
    pub classification: AnnotatedClassification,
    /// Narrative log, oldest line first
    pub story: Vec<String>,
}

impl Prediction {
    /// Story lines paired with their tone.
    pub fn story_lines(&self) -> impl Iterator<Item = (StoryTone, &str)> {
        self.story.iter().map(|line| (StoryTone::of(line), line.as_str()))
    }
}

/// Mutable state of one selected race.
///
/// Sessions are values: every edit produces a new session and leaves the old
/// one untouched. Driver entries are shared between versions, so drivers that
/// an edit did not touch stay pointer-equal.
#[derive(Debug, Clone)]
pub struct RaceSession {
    key: RaceKey,
    generation: u64,
    event: Option<String>,
    drivers: Vec<Arc<Driver>>,
    is_wet: bool,
    circuit_info: Option<CircuitInfo>,
    strategy: Arc<[DriverStrategy]>,
    prediction: Option<Arc<Prediction>>,
}

impl RaceSession {
    /// Build a fresh session from the service payloads, drivers in grid order.
    pub fn new(
        key: RaceKey,
        generation: u64,
        detail: RaceDetail,
        strategy: Vec<DriverStrategy>,
    ) -> Self {
        let mut drivers = detail.drivers;
        drivers.sort_by_key(|driver| driver.grid);

        Self {
            key,
            generation,
            event: detail.event,
            drivers: drivers.into_iter().map(Arc::new).collect(),
            is_wet: detail.is_wet,
            circuit_info: detail.circuit_info,
            strategy: strategy.into(),
            prediction: None,
        }
    }

    pub fn key(&self) -> RaceKey {
        self.key
    }

    /// Load generation this session was committed under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn drivers(&self) -> &[Arc<Driver>] {
        &self.drivers
    }

    pub fn is_wet(&self) -> bool {
        self.is_wet
    }

    /// Weather label for the conditions panel.
    pub fn conditions(&self) -> &'static str {
        if self.is_wet { "Wet / Inter" } else { "Dry" }
    }

    pub fn circuit_info(&self) -> Option<&CircuitInfo> {
        self.circuit_info.as_ref()
    }

    pub fn strategy(&self) -> &[DriverStrategy] {
        &self.strategy
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_deref()
    }

    /// Tyre timeline for the loaded strategy data.
    pub fn timeline(&self) -> StrategyLayout {
        layout(&self.strategy)
    }

    /// Copy with one field of one driver replaced.
    pub fn with_driver_edit(&self, index: usize, edit: DriverEdit) -> Result<Self> {
        let current = self
            .drivers
            .get(index)
            .ok_or(StrategistError::DriverIndex { index, len: self.drivers.len() })?;
        let replacement = Arc::new(current.with_edit(edit)?);

        let mut next = self.clone();
        next.drivers[index] = replacement;
        Ok(next)
    }

    /// Copy with the weather flag flipped.
    pub fn with_weather_toggled(&self) -> Self {
        Self { is_wet: !self.is_wet, ..self.clone() }
    }

    /// Copy carrying a new prediction, replacing any previous one.
    pub fn with_prediction(&self, prediction: Prediction) -> Self {
        Self { prediction: Some(Arc::new(prediction)), ..self.clone() }
    }

    /// Request body for the current drivers and weather.
    pub fn prediction_request(&self) -> PredictRequest {
        PredictRequest {
            drivers: self.drivers.iter().map(|driver| Driver::clone(driver)).collect(),
            weather: Weather { is_wet: self.is_wet },
        }
    }
}
