//! Error types for strategy sessions.
//!
//! Every failure a session can surface is a [`StrategistError`]. Network-facing
//! failures carry the [`Operation`] that produced them so the controller can turn
//! them into a one-shot [`Notice`] for the user.
//!
//! ## Error Categories
//!
//! - **Transport Errors**: service unreachable, timed out, or answered with a non-2xx status
//! - **Contract Errors**: the service answered, but the body was malformed or failed validation
//! - **Precondition Errors**: edits against a missing session, out-of-range driver indices,
//!   or values outside their domain
//! - **Configuration Errors**: unusable client settings
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use strategist::{Operation, StrategistError};
//!
//! let error = StrategistError::transport(Operation::Simulation, "connection refused");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::DriverField;

/// Result type alias for strategy operations.
pub type Result<T, E = StrategistError> = std::result::Result<T, E>;

/// The network-facing operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /races/{year}`
    RaceList,
    /// `GET /race/{year}/{round}`
    RaceLoad,
    /// `GET /race/{year}/{round}/strategy`
    StrategyLoad,
    /// `POST /predict`
    Simulation,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::RaceList => "race list",
            Operation::RaceLoad => "race load",
            Operation::StrategyLoad => "strategy load",
            Operation::Simulation => "simulation",
        };
        f.write_str(label)
    }
}

/// Main error type for strategy operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StrategistError {
    #[error("{operation} failed: {reason}")]
    Transport {
        operation: Operation,
        reason: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{operation} returned a malformed response: {details}")]
    Contract { operation: Operation, details: String },

    #[error("No race session is loaded")]
    NoSession,

    #[error("Driver index {index} is out of range for {len} drivers")]
    DriverIndex { index: usize, len: usize },

    #[error("Invalid {field}: {details}")]
    InvalidEdit { field: DriverField, details: String },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl StrategistError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            StrategistError::Transport { .. } => true,
            StrategistError::Contract { .. } => false,
            StrategistError::NoSession => false,
            StrategistError::DriverIndex { .. } => false,
            StrategistError::InvalidEdit { .. } => false,
            StrategistError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            StrategistError::Transport { .. } => vec![
                "Ensure the prediction service is running",
                "Check the configured base URL",
                "Retry the operation",
            ],
            StrategistError::Contract { .. } => vec![
                "Check the prediction service version",
                "Verify the service has a trained model loaded",
            ],
            StrategistError::NoSession => vec!["Select a race before editing or simulating"],
            StrategistError::DriverIndex { .. } => {
                vec!["Use an index from the current session's driver list"]
            }
            StrategistError::InvalidEdit { .. } => {
                vec!["Keep pit stops within 0-5 and pace values finite"]
            }
            StrategistError::Config { .. } => vec![
                "Check STRATEGIST_* environment variables",
                "Use ClientConfig::default() as a baseline",
            ],
        }
    }

    /// The network operation this error belongs to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StrategistError::Transport { operation, .. }
            | StrategistError::Contract { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Helper constructor for transport failures.
    pub fn transport(operation: Operation, reason: impl Into<String>) -> Self {
        StrategistError::Transport { operation, reason: reason.into(), status: None, source: None }
    }

    /// Helper constructor for transport failures with an underlying cause.
    pub fn transport_with_source(
        operation: Operation,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        StrategistError::Transport {
            operation,
            reason: reason.into(),
            status: None,
            source: Some(source),
        }
    }

    /// Helper constructor for non-2xx responses.
    pub fn http_status(operation: Operation, status: u16) -> Self {
        StrategistError::Transport {
            operation,
            reason: format!("service answered with HTTP {status}"),
            status: Some(status),
            source: None,
        }
    }

    /// Helper constructor for contract violations.
    pub fn contract(operation: Operation, details: impl Into<String>) -> Self {
        StrategistError::Contract { operation, details: details.into() }
    }

    /// Helper constructor for rejected driver edits.
    pub fn invalid_edit(field: DriverField, details: impl Into<String>) -> Self {
        StrategistError::InvalidEdit { field, details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        StrategistError::Config { details: details.into() }
    }
}

/// One-shot, user-visible failure signal.
///
/// Transport and contract failures collapse into a notice naming the failed
/// operation. Precondition errors never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: Operation,
    pub message: String,
}

impl Notice {
    /// Build the notice for an error, if the error is user-facing.
    pub fn from_error(error: &StrategistError) -> Option<Self> {
        let operation = error.operation()?;
        Some(Self { operation, message: error.to_string() })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed. {}", capitalize(&self.operation.to_string()), self.message)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
