//! In-process predictor backed by the linear heuristic.

use log::debug;

use crate::app::ports::PredictionPort;
use crate::aqi::heuristic;
use crate::aqi::reading::Reading;
use crate::error::PredictionError;

/// [`PredictionPort`] that never leaves the process and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPredictor;

impl HeuristicPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl PredictionPort for HeuristicPredictor {
    fn predict(&mut self, reading: &Reading) -> Result<u32, PredictionError> {
        let aqi = heuristic::predict(reading);
        debug!("heuristic score={:.2} -> aqi={}", heuristic::score(reading), aqi);
        Ok(aqi)
    }
}
