//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements      | Connects to                   |
//! |---------------|-----------------|-------------------------------|
//! | `local`       | PredictionPort  | in-process heuristic          |
//! | `remote`      | PredictionPort  | `/api/predict` over HTTP      |
//! |               | DatasetPort     | `/api/csv-rows` over HTTP     |
//! | `dataset`     | DatasetPort     | JSON file / in-memory rows    |
//! | `config_file` | ConfigPort      | JSON file on disk             |
//! | `log_sink`    | EventSink       | `log` facade                  |

pub mod config_file;
pub mod dataset;
pub mod local;
pub mod log_sink;
pub mod remote;

use log::warn;

use crate::app::ports::PredictionPort;
use crate::aqi::reading::Reading;
use crate::config::{PredictionMode, StudioConfig};
use crate::error::PredictionError;

use local::HeuristicPredictor;
use remote::{HttpTransport, RemotePredictor};

/// The predictor selected by [`StudioConfig::prediction`].
pub enum ConfiguredPredictor<T> {
    Local(HeuristicPredictor),
    Remote(RemotePredictor<T>),
    /// Remote mode was requested but no transport was supplied.
    Disabled,
}

impl<T: HttpTransport> ConfiguredPredictor<T> {
    pub fn from_config(config: &StudioConfig, transport: Option<T>) -> Self {
        match (config.prediction, transport) {
            (PredictionMode::Local, _) => Self::Local(HeuristicPredictor::new()),
            (PredictionMode::Remote, Some(t)) => Self::Remote(RemotePredictor::new(t, config)),
            (PredictionMode::Remote, None) => {
                warn!("Remote prediction selected but no HTTP transport supplied; predictions disabled");
                Self::Disabled
            }
        }
    }
}

impl<T: HttpTransport> PredictionPort for ConfiguredPredictor<T> {
    fn predict(&mut self, reading: &Reading) -> Result<u32, PredictionError> {
        match self {
            Self::Local(p) => p.predict(reading),
            Self::Remote(p) => p.predict(reading),
            Self::Disabled => Err(PredictionError::Disabled),
        }
    }
}
