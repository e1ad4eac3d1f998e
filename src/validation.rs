//! Boundary validation for service responses.
//!
//! Decoding only proves the JSON had the right shape. These checks enforce the
//! invariants the pure engines rely on, so a response that decodes but breaks
//! them is still reported as a contract violation instead of reaching the core.

use std::collections::HashSet;

use crate::types::{ClassificationEntry, DriverStrategy, MAX_STOPS, RaceDetail};
use crate::{Operation, Result, StrategistError};

/// Check a race detail payload.
///
/// Grid slots must be positive and unique, driver codes unique and non-empty,
/// and every strategy parameter inside its domain.
pub fn validate_race_detail(detail: &RaceDetail) -> Result<()> {
    let violation = |details: String| StrategistError::contract(Operation::RaceLoad, details);
    let mut grid_slots = HashSet::new();
    let mut codes = HashSet::new();

    for driver in &detail.drivers {
        if driver.code.trim().is_empty() {
            return Err(violation(format!("driver on grid {} has an empty code", driver.grid)));
        }
        if !codes.insert(driver.code.as_str()) {
            return Err(violation(format!("duplicate driver code {}", driver.code)));
        }
        if driver.grid == 0 {
            return Err(violation(format!("{} has grid position 0", driver.code)));
        }
        if !grid_slots.insert(driver.grid) {
            return Err(violation(format!("grid position {} is taken twice", driver.grid)));
        }
        if driver.stops > MAX_STOPS {
            return Err(violation(format!("{} plans {} stops", driver.code, driver.stops)));
        }
        if !driver.pace_delta.is_finite() {
            return Err(violation(format!("{} has a non-finite pace delta", driver.code)));
        }
        if !driver.consistency.is_finite() || driver.consistency < 0.0 {
            return Err(violation(format!(
                "{} has invalid consistency {}",
                driver.code, driver.consistency
            )));
        }
    }
    Ok(())
}

/// Check strategy data: stints ordered, non-overlapping, laps from 1 upward.
pub fn validate_strategy(strategies: &[DriverStrategy]) -> Result<()> {
    let violation = |details: String| StrategistError::contract(Operation::StrategyLoad, details);

    for strategy in strategies {
        let mut previous_end = 0;
        for stint in &strategy.stints {
            if stint.start_lap == 0 || stint.start_lap > stint.end_lap {
                return Err(violation(format!(
                    "driver {} has stint {}-{}",
                    strategy.driver, stint.start_lap, stint.end_lap
                )));
            }
            if stint.start_lap <= previous_end {
                return Err(violation(format!(
                    "driver {} has a stint starting on lap {} before lap {} ended",
                    strategy.driver, stint.start_lap, previous_end
                )));
            }
            previous_end = stint.end_lap;
        }
    }
    Ok(())
}

/// Check a classification: ranks form exactly 1..=N, grid slots are positive.
pub fn validate_classification(classification: &[ClassificationEntry]) -> Result<()> {
    let violation = |details: String| StrategistError::contract(Operation::Simulation, details);
    let size = classification.len() as u32;
    let mut ranks = HashSet::new();

    for entry in classification {
        if entry.predicted_rank == 0 || entry.predicted_rank > size {
            return Err(violation(format!(
                "{} has rank {} in a field of {}",
                entry.code, entry.predicted_rank, size
            )));
        }
        if !ranks.insert(entry.predicted_rank) {
            return Err(violation(format!("rank {} is assigned twice", entry.predicted_rank)));
        }
        if entry.start_pos == 0 {
            return Err(violation(format!("{} starts from position 0", entry.code)));
        }
        if !entry.points.is_finite() || entry.points < 0.0 {
            return Err(violation(format!("{} has invalid points {}", entry.code, entry.points)));
        }
    }
    Ok(())
}
