//! Outbound application events.
//!
//! The [`StudioService`](super::service::StudioService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters decide what to
//! do with them: log them, repaint a view, forward them to a socket.

use crate::aqi::category::Category;
use crate::aqi::reading::Preset;
use crate::error::{DatasetError, PredictionError};

use super::service::RequestToken;

/// Where the current form contents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingSource {
    Preset(Preset),
    DatasetRow(usize),
}

/// Structured events emitted by the studio core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The form was filled from a preset or dataset row.
    ReadingLoaded(ReadingSource),

    /// Dataset rows were (re)fetched.
    DatasetLoaded { rows: usize },

    /// Dataset fetch failed; the previous rows are kept.
    DatasetUnavailable(DatasetError),

    /// A prediction request was issued.
    PredictionRequested(RequestToken),

    /// The latest request produced an AQI.
    PredictionReady {
        token: RequestToken,
        aqi: u32,
        category: Category,
    },

    /// The latest request failed.
    PredictionFailed {
        token: RequestToken,
        error: PredictionError,
    },

    /// A response arrived for a request that is no longer the latest.
    StaleResponseDiscarded {
        token: RequestToken,
        latest: RequestToken,
    },

    /// Form, result and selection were cleared.
    Reset,
}
