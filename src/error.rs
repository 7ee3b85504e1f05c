//! Error types for Pairwheel
//!
//! Centralized error handling using thiserror.

use chrono::NaiveDate;
use thiserror::Error;

use crate::history::StreamKind;

/// All error types that can occur in Pairwheel.
///
/// Only consistency violations are errors. Heuristic dead ends (no weight
/// candidate, no solo swap target, missing lookback history) are expressed
/// as `Option` fallbacks by the engine, never raised here.
#[derive(Debug, Error)]
pub enum PairwheelError {
    /// More than one history record exists for the same date
    #[error("Duplicate history record for date: {0}")]
    DuplicateDayRecord(NaiveDate),

    /// A company owns a track today but has no pair-capable developer subset
    #[error("Company '{0}' has no devs for its tracks")]
    CompanyWithoutDevs(String),

    /// A history stream holds a pair of the wrong kind
    #[error("{expected} history stream holds a mismatched pair on track: {track}")]
    StreamContamination { track: String, expected: StreamKind },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Pairwheel operations
pub type Result<T> = std::result::Result<T, PairwheelError>;
