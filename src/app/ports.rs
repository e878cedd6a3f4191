//! Port traits — the boundary between studio logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ StudioService (domain)
//! ```
//!
//! Prediction services, dataset sources, event sinks and config storage
//! implement these traits.  The [`StudioService`](super::service::StudioService)
//! consumes them via generics, so the domain core never performs I/O
//! itself.

use crate::aqi::reading::Reading;
use crate::config::StudioConfig;
use crate::error::{DatasetError, PredictionError};

// ───────────────────────────────────────────────────────────────
// Prediction port (domain → predictor)
// ───────────────────────────────────────────────────────────────

/// Turns a reading into an AQI value.
pub trait PredictionPort {
    fn predict(&mut self, reading: &Reading) -> Result<u32, PredictionError>;
}

// ───────────────────────────────────────────────────────────────
// Dataset port (row source → domain)
// ───────────────────────────────────────────────────────────────

/// Source of ready-made readings, consumed by index.
pub trait DatasetPort {
    /// Fetch every row, in order.
    fn fetch_rows(&mut self) -> Result<Vec<Reading>, DatasetError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persisted config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists studio configuration.
///
/// Implementations MUST call [`StudioConfig::validate`] before persisting
/// and after loading; invalid values are rejected with
/// [`ConfigError::ValidationFailed`], never silently clamped.
pub trait ConfigPort {
    /// Returns [`StudioConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<StudioConfig, ConfigError>;

    fn save(&self, config: &StudioConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
