//! Core types for race strategy sessions.
//!
//! Two kinds of type live here:
//! - wire types that mirror the prediction service's JSON ([`Driver`], [`Stint`],
//!   [`DriverStrategy`], [`ClassificationEntry`], [`RaceSummary`], [`RaceDetail`],
//!   [`RadioMessage`], [`PredictRequest`], [`PredictResponse`])
//! - the [`RaceSession`] aggregate a controller owns and replaces on every edit
//!
//! ## Usage Example
//!
//! ```rust
//! use strategist::types::{Compound, Driver, DriverEdit};
//!
//! let driver: Driver = serde_json::from_str(
//!     r#"{"code":"VER","team":"Red Bull Racing","grid":1,
//!         "start_compound":"Medium","stops":1,"pace_delta":-0.2}"#,
//! ).unwrap();
//!
//! let softs = driver.with_edit(DriverEdit::StartCompound(Compound::Soft)).unwrap();
//! assert_eq!(softs.start_compound, Compound::Soft);
//! assert_eq!(driver.start_compound, Compound::Medium);
//! ```

mod compound;
mod driver;
mod race;
mod result;
mod session;
mod stint;

// Re-export all public types
pub use compound::{Compound, UnknownCompound};
pub use driver::{Driver, DriverEdit, DriverField, MAX_STOPS};
pub use race::{CircuitInfo, RaceDetail, RaceKey, RaceSummary, RadioMessage};
pub use result::{
    ClassificationEntry, PredictRequest, PredictResponse, StoryTone, Weather,
};
pub use session::{Prediction, RaceSession};
pub use stint::{DriverStrategy, Stint};
