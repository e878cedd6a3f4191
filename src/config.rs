//! Studio configuration.
//!
//! One [`StudioConfig`] replaces the per-page copies of the form: it picks
//! the predictor, the dataset feature, the background behaviour and the
//! Severe colour.  Values can be loaded from a JSON file through
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::aqi::category::{Palette, SevereColour};
use crate::display::DEFAULT_DURATION_MS;

/// Longest accepted count-up animation (ms).
pub const MAX_COUNT_UP_MS: u32 = 10_000;

/// Where predictions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// In-process linear heuristic.
    #[default]
    Local,
    /// External prediction service at `api_base_url`.
    Remote,
}

/// Core studio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    // --- Prediction ---
    pub prediction: PredictionMode,
    /// Base URL of the prediction / dataset service (no trailing slash).
    pub api_base_url: String,

    // --- Features ---
    /// Fetch dataset rows and allow loading them into the form.
    pub dataset_loading: bool,
    /// Tint the background with the current category colour.
    pub adaptive_background: bool,

    // --- Presentation ---
    /// Colour used for the Severe category.
    pub severe_colour: SevereColour,
    /// Count-up animation length (milliseconds).
    pub count_up_duration_ms: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            prediction: PredictionMode::Local,
            api_base_url: "http://localhost:8000".into(),

            dataset_loading: true,
            adaptive_background: false,

            severe_colour: SevereColour::Gray,
            count_up_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl StudioConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_up_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "count_up_duration_ms must be > 0",
            ));
        }
        if self.count_up_duration_ms > MAX_COUNT_UP_MS {
            return Err(ConfigError::ValidationFailed(
                "count_up_duration_ms must be <= 10000",
            ));
        }
        if self.prediction == PredictionMode::Remote {
            let url = self.api_base_url.trim();
            if url.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "api_base_url is required for remote prediction",
                ));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationFailed(
                    "api_base_url must be an http(s) URL",
                ));
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.severe_colour)
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
