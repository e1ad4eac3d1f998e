//! Client-side race strategy engine for an F1 prediction service.
//!
//! Strategist keeps the state of one race session, talks to a remote
//! prediction service, and derives the data a strategy dashboard renders.
//!
//! # Features
//!
//! - **Sessions**: Race selection, per-driver edits and weather, with
//!   overlapping loads resolved in favour of the latest selection
//! - **Tyre Timeline**: Stint bars laid out proportionally to race distance
//! - **Classification**: Positions gained or lost and the biggest climber
//! - **Team Radio**: Messages shown one at a time on a dismiss timer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strategist::{ClientConfig, RaceKey, Strategist};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> strategist::Result<()> {
//!     let controller = Strategist::connect(&ClientConfig::from_env()?)?;
//!
//!     controller.select_race(RaceKey::new(2023, 1)).await?;
//!     controller.toggle_weather()?;
//!     controller.run_simulation().await?;
//!
//!     if let Some(session) = controller.session() {
//!         for row in &session.timeline().rows {
//!             println!("{}: {} stints", row.driver, row.segments.len());
//!         }
//!     }
//!
//!     let mut radio = Box::pin(controller.radio().updates());
//!     while let Some(Some(message)) = radio.next().await {
//!         println!("[Lap {}] {}: {}", message.lap, message.driver, message.message);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Derived data
pub mod classification;
pub mod layout;
pub mod validation;

// Session and service plumbing
pub mod config;
pub mod provider;
pub mod providers;
pub mod radio;
pub mod session;

#[cfg(test)]
mod test_utils;

// Core exports
pub use error::*;
pub use types::*;

pub use classification::{AnnotatedClassification, AnnotatedEntry, Movement, annotate};
pub use config::ClientConfig;
pub use layout::{StintSegment, StrategyLayout, TimelineRow, layout};
pub use provider::PredictionService;
pub use providers::HttpService;
pub use radio::{RadioQueue, RadioScheduler, RadioState};
pub use session::{Commit, SessionController, SessionState};

/// Entry point for sessions backed by the HTTP prediction service.
///
/// # Example
///
/// ```rust,no_run
/// use strategist::{ClientConfig, Strategist};
///
/// # #[tokio::main]
/// # async fn main() -> strategist::Result<()> {
/// let config = ClientConfig::default().with_base_url("http://10.0.0.2:5000");
/// let controller = Strategist::connect(&config)?;
/// let races = controller.list_races(2023).await?;
/// # Ok(())
/// # }
/// ```
pub struct Strategist;

impl Strategist {
    /// Create a session controller talking to the service at `config.base_url`.
    ///
    /// No request is made until the first operation. Must be called within a
    /// tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`StrategistError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn connect(config: &ClientConfig) -> Result<SessionController<HttpService>> {
        let service = HttpService::new(config)?;
        Ok(SessionController::new(service, config))
    }
}
