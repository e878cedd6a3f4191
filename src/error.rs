//! Unified error types for AQI Studio.
//!
//! Each collaborator has its own error enum; all of them convert into the
//! top-level [`Error`] so callers that only want to propagate can use the
//! crate [`Result`] alias.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The prediction collaborator failed or answered nonsense.
    Prediction(PredictionError),
    /// Dataset rows could not be fetched or decoded.
    Dataset(DatasetError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prediction(e) => write!(f, "prediction: {e}"),
            Self::Dataset(e) => write!(f, "dataset: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Prediction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// The request never produced a response body.
    Transport(String),
    /// The response was not `{"predictedAQI": <non-negative number>}`.
    InvalidResponse(String),
    /// No predictor is configured for this studio.
    Disabled,
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport failed: {msg}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::Disabled => write!(f, "prediction disabled"),
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<PredictionError> for Error {
    fn from(e: PredictionError) -> Self {
        Self::Prediction(e)
    }
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    Transport(String),
    /// Body was not a JSON array of reading objects.
    Malformed(String),
    /// Local file could not be read.
    Io(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed rows: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<DatasetError> for Error {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
