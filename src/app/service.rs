//! Studio service — the hexagonal core.
//!
//! [`StudioService`] owns the form, the dataset rows, the last prediction
//! and the count-up readout.  All I/O flows through port traits passed in
//! at call sites, so the whole service is testable with in-memory mocks.
//!
//! ```text
//!  DatasetPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │     StudioService       │
//! PredictionPort ◀─│ form · tokens · CountUp │
//!                  └────────────────────────┘
//! ```
//!
//! ## Request ordering
//!
//! A prediction is split into [`begin_prediction`](StudioService::begin_prediction)
//! and [`complete_prediction`](StudioService::complete_prediction).  Each
//! request gets a strictly increasing [`RequestToken`]; only the completion
//! carrying the outstanding token is applied.  Anything older, duplicated,
//! or issued before the form was replaced is discarded.

use log::{debug, info, warn};

use crate::aqi::category::{Band, ColourToken, LegendEntry, Palette, classify, legend};
use crate::aqi::reading::{Field, FormValues, Preset, Reading};
use crate::config::StudioConfig;
use crate::display::CountUp;
use crate::error::PredictionError;

use super::commands::AppCommand;
use super::events::{AppEvent, ReadingSource};
use super::ports::{DatasetPort, EventSink, PredictionPort};

// ───────────────────────────────────────────────────────────────
// Request tokens
// ───────────────────────────────────────────────────────────────

/// Identifies one prediction request.  Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request handed to whoever performs the prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub token: RequestToken,
    pub reading: Reading,
}

/// An applied prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub aqi: u32,
    pub band: Band,
}

/// What happened to a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Point-in-time snapshot for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioView {
    /// Current count-up value.
    pub display_value: u32,
    pub prediction: Option<Prediction>,
    pub legend: [LegendEntry; 6],
    /// Background tint, only when adaptive background is enabled.
    pub background: Option<ColourToken>,
    pub error: Option<PredictionError>,
    pub selected_row: Option<usize>,
    pub row_count: usize,
    /// A request is outstanding.
    pub pending: bool,
}

// ───────────────────────────────────────────────────────────────
// StudioService
// ───────────────────────────────────────────────────────────────

pub struct StudioService {
    config: StudioConfig,
    palette: Palette,
    form: FormValues,
    rows: Vec<Reading>,
    selected_row: Option<usize>,
    prediction: Option<Prediction>,
    error: Option<PredictionError>,
    counter: CountUp,
    /// Last token handed out (0 = none yet).
    last_token: u64,
    pending: Option<RequestToken>,
}

impl StudioService {
    pub fn new(config: StudioConfig) -> Self {
        let palette = config.palette();
        let counter = CountUp::new(config.count_up_duration_ms);
        info!(
            "StudioService ready: prediction={:?} dataset={} adaptive_bg={} severe={:?}",
            config.prediction, config.dataset_loading, config.adaptive_background, config.severe_colour
        );
        Self {
            config,
            palette,
            form: FormValues::new(),
            rows: Vec::new(),
            selected_row: None,
            prediction: None,
            error: None,
            counter,
            last_token: 0,
            pending: None,
        }
    }

    // ── Form ──────────────────────────────────────────────────

    /// Replace the text of one input.  Returns `false` if it does not fit.
    pub fn set_field(&mut self, field: Field, text: &str) -> bool {
        let ok = self.form.set(field, text);
        if !ok {
            warn!("Input for {} rejected: {} bytes exceeds buffer", field.key(), text.len());
        }
        ok
    }

    /// The form coerced into a reading (blank/malformed → 0).
    pub fn reading(&self) -> Reading {
        self.form.to_reading()
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    /// Fill the form with a built-in sample.
    pub fn load_preset(&mut self, preset: Preset, sink: &mut impl EventSink) {
        self.replace_form(&preset.reading());
        self.selected_row = None;
        sink.emit(&AppEvent::ReadingLoaded(ReadingSource::Preset(preset)));
    }

    /// Clear the form, result, error and selection.
    pub fn reset(&mut self, sink: &mut impl EventSink) {
        self.form.clear();
        self.clear_result();
        self.selected_row = None;
        sink.emit(&AppEvent::Reset);
    }

    // ── Dataset ───────────────────────────────────────────────

    /// Fetch dataset rows.  On failure the previous rows are kept.
    ///
    /// Returns `true` if the rows were replaced.
    pub fn load_dataset(&mut self, port: &mut impl DatasetPort, sink: &mut impl EventSink) -> bool {
        if !self.config.dataset_loading {
            debug!("Dataset loading disabled; skipping fetch");
            return false;
        }
        match port.fetch_rows() {
            Ok(rows) => {
                info!("Loaded {} dataset rows", rows.len());
                // The form keeps its values but no longer mirrors a row.
                if let Some(i) = self.selected_row.take() {
                    debug!("Row {} deselected by dataset reload", i);
                }
                self.rows = rows;
                sink.emit(&AppEvent::DatasetLoaded {
                    rows: self.rows.len(),
                });
                true
            }
            Err(e) => {
                warn!("Dataset fetch failed ({}); keeping {} rows", e, self.rows.len());
                sink.emit(&AppEvent::DatasetUnavailable(e));
                false
            }
        }
    }

    pub fn rows(&self) -> &[Reading] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Load row `index` into the form.  Out-of-range is a no-op.
    pub fn select_row(&mut self, index: usize, sink: &mut impl EventSink) -> bool {
        let Some(row) = self.rows.get(index).copied() else {
            debug!("Row {} out of range ({} rows); ignored", index, self.rows.len());
            return false;
        };
        self.replace_form(&row);
        self.selected_row = Some(index);
        sink.emit(&AppEvent::ReadingLoaded(ReadingSource::DatasetRow(index)));
        true
    }

    /// [`select_row`](Self::select_row) for a raw UI value.  Blank or
    /// unparsable text is a no-op.
    pub fn select_row_str(&mut self, text: &str, sink: &mut impl EventSink) -> bool {
        match text.trim().parse::<usize>() {
            Ok(index) => self.select_row(index, sink),
            Err(_) => {
                debug!("Row selector {:?} is not an index; ignored", text);
                false
            }
        }
    }

    // ── Prediction ────────────────────────────────────────────

    /// Issue a new request for the current form.  Supersedes any request
    /// still outstanding.
    pub fn begin_prediction(&mut self, sink: &mut impl EventSink) -> PredictionRequest {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        if let Some(prev) = self.pending.replace(token) {
            debug!("Request {} superseded by {}", prev, token);
        }
        sink.emit(&AppEvent::PredictionRequested(token));
        PredictionRequest {
            token,
            reading: self.reading(),
        }
    }

    /// Apply the outcome of a request if it is still the outstanding one.
    pub fn complete_prediction(
        &mut self,
        token: RequestToken,
        outcome: Result<u32, PredictionError>,
        sink: &mut impl EventSink,
    ) -> Completion {
        if self.pending != Some(token) {
            let latest = RequestToken(self.last_token);
            debug!("Discarding stale response {} (latest {})", token, latest);
            sink.emit(&AppEvent::StaleResponseDiscarded { token, latest });
            return Completion::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(aqi) => {
                let band = self.palette.band(classify(aqi));
                self.prediction = Some(Prediction { aqi, band });
                self.error = None;
                self.counter.start(aqi);
                sink.emit(&AppEvent::PredictionReady {
                    token,
                    aqi,
                    category: band.category,
                });
            }
            Err(error) => {
                warn!("Prediction {} failed: {}", token, error);
                self.error = Some(error.clone());
                sink.emit(&AppEvent::PredictionFailed { token, error });
            }
        }
        Completion::Applied
    }

    /// Run a prediction synchronously through `port`.
    pub fn predict(
        &mut self,
        port: &mut impl PredictionPort,
        sink: &mut impl EventSink,
    ) -> Completion {
        let request = self.begin_prediction(sink);
        let outcome = port.predict(&request.reading);
        self.complete_prediction(request.token, outcome, sink)
    }

    pub fn prediction(&self) -> Option<Prediction> {
        self.prediction
    }

    pub fn error(&self) -> Option<&PredictionError> {
        self.error.as_ref()
    }

    /// The last prediction, or the error that replaced it.
    pub fn outcome(&self) -> crate::Result<Option<Prediction>> {
        match &self.error {
            Some(e) => Err(e.clone().into()),
            None => Ok(self.prediction),
        }
    }

    /// Token of the outstanding request, if any.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    // ── Display ───────────────────────────────────────────────

    /// Advance the count-up readout by `delta_ms`.
    pub fn tick(&mut self, delta_ms: u32) -> u32 {
        self.counter.tick(delta_ms)
    }

    pub fn view(&self) -> StudioView {
        let active = self.prediction.map(|p| p.band.category);
        let background = if self.config.adaptive_background {
            self.prediction.map(|p| p.band.colour)
        } else {
            None
        };
        StudioView {
            display_value: self.counter.value(),
            prediction: self.prediction,
            legend: legend(&self.palette, active),
            background,
            error: self.error.clone(),
            selected_row: self.selected_row,
            row_count: self.rows.len(),
            pending: self.pending.is_some(),
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    // ── Commands ──────────────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetField(field, text) => {
                self.set_field(field, &text);
            }
            AppCommand::LoadPreset(preset) => self.load_preset(preset, sink),
            AppCommand::SelectRow(text) => {
                self.select_row_str(&text, sink);
            }
            AppCommand::Reset => self.reset(sink),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn replace_form(&mut self, reading: &Reading) {
        self.form = FormValues::from_reading(reading);
        self.clear_result();
    }

    /// Drop the result and error, zero the readout, and orphan any
    /// outstanding request so its response cannot land on new input.
    fn clear_result(&mut self) {
        self.prediction = None;
        self.error = None;
        self.counter.reset();
        if let Some(token) = self.pending.take() {
            debug!("Request {} orphaned by form change", token);
        }
    }
}
