//! Error types for tracking, configuration and the detection pipeline.

use thiserror::Error;

/// Errors raised while processing a tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// A detection had non-finite coordinates or fell outside the frame.
    #[error("invalid detection #{index} at ({x}, {y}): {reason}")]
    InvalidDetection {
        index: usize,
        x: f32,
        y: f32,
        reason: &'static str,
    },
}

/// Errors raised while building a door or monitor from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("door `{door}`: {field} must be positive, got {value}")]
    NonPositive {
        door: String,
        field: &'static str,
        value: f64,
    },

    #[error("door `{door}`: {field} must be a finite, non-negative number, got {value}")]
    InvalidValue {
        door: String,
        field: &'static str,
        value: f64,
    },

    #[error("unknown line orientation `{0}` (expected `horizontal` or `vertical`)")]
    UnknownOrientation(String),

    #[error("door name must not be empty")]
    EmptyDoorName,

    #[error("door `{0}` is configured more than once")]
    DuplicateDoor(String),

    #[error("monitor has no doors configured")]
    NoDoors,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of one pipeline step. The tracker state is untouched in both cases.
#[derive(Debug, Error)]
pub enum PipelineError<E: std::error::Error + 'static> {
    #[error("detector failed: {0}")]
    Detector(#[source] E),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
