//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each studio event as one log line.
//! A UI adapter would implement the same trait and repaint instead.

use log::{info, warn};

use crate::app::events::{AppEvent, ReadingSource};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ReadingLoaded(ReadingSource::Preset(p)) => {
                info!("FORM | loaded preset={}", p.name());
            }
            AppEvent::ReadingLoaded(ReadingSource::DatasetRow(i)) => {
                info!("FORM | loaded dataset row={}", i + 1);
            }
            AppEvent::DatasetLoaded { rows } => {
                info!("DATA | {} rows available", rows);
            }
            AppEvent::DatasetUnavailable(e) => {
                warn!("DATA | unavailable: {}", e);
            }
            AppEvent::PredictionRequested(token) => {
                info!("PRED | request {}", token);
            }
            AppEvent::PredictionReady {
                token,
                aqi,
                category,
            } => {
                info!("PRED | {} -> AQI={} ({})", token, aqi, category);
            }
            AppEvent::PredictionFailed { token, error } => {
                warn!("PRED | {} failed: {}", token, error);
            }
            AppEvent::StaleResponseDiscarded { token, latest } => {
                info!("PRED | stale {} dropped (latest {})", token, latest);
            }
            AppEvent::Reset => {
                info!("FORM | reset");
            }
        }
    }
}
