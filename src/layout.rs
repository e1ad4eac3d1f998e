//! Tyre strategy timeline layout.
//!
//! Maps per-driver stints onto a shared horizontal scale. The longest race
//! distance across all drivers (`max_laps`) is the full width; every stint
//! becomes a segment whose width is its inclusive lap count over `max_laps`.
//! Drivers who stopped early simply end with a shorter bar.

use crate::types::{Compound, DriverStrategy};

/// Percentages at which the timeline header places lap marks.
const SCALE_PERCENTS: [u32; 5] = [0, 25, 50, 75, 100];

/// One stint, sized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StintSegment {
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
    /// Inclusive lap count
    pub laps: u32,
    /// Share of the full timeline width, 0.0..=1.0
    pub width_fraction: f64,
    pub color: String,
    pub label: char,
}

impl StintSegment {
    /// Tooltip text, e.g. `SOFT (1-20)`.
    pub fn title(&self) -> String {
        format!("{} ({}-{})", self.compound, self.start_lap, self.end_lap)
    }
}

/// All segments of one driver, in stint order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub driver: String,
    pub segments: Vec<StintSegment>,
}

impl TimelineRow {
    /// Combined width of the row's segments.
    pub fn total_fraction(&self) -> f64 {
        self.segments.iter().map(|segment| segment.width_fraction).sum()
    }
}

/// Rendered timeline for a whole field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrategyLayout {
    pub max_laps: u32,
    pub rows: Vec<TimelineRow>,
}

impl StrategyLayout {
    /// Nothing to render: no strategy data or no laps anywhere.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lap numbers for the header marks at 0, 25, 50, 75 and 100 percent.
    pub fn scale_marks(&self) -> [u32; 5] {
        SCALE_PERCENTS.map(|pct| (f64::from(self.max_laps) * f64::from(pct) / 100.0).round() as u32)
    }
}

/// Lay out the strategies, preserving the caller's driver order.
pub fn layout(strategies: &[DriverStrategy]) -> StrategyLayout {
    let max_laps = strategies.iter().map(DriverStrategy::final_lap).max().unwrap_or(0);
    if max_laps == 0 {
        return StrategyLayout::default();
    }

    let total = f64::from(max_laps);
    let rows = strategies
        .iter()
        .map(|strategy| TimelineRow {
            driver: strategy.driver.clone(),
            segments: strategy
                .stints
                .iter()
                .map(|stint| StintSegment {
                    compound: stint.compound,
                    start_lap: stint.start_lap,
                    end_lap: stint.end_lap,
                    laps: stint.laps(),
                    width_fraction: f64::from(stint.laps()) / total,
                    color: stint.color_token().to_string(),
                    label: stint.compound.label(),
                })
                .collect(),
        })
        .collect();

    StrategyLayout { max_laps, rows }
}
