//! Local dataset sources.
//!
//! [`JsonFileDataset`] reads the same `[Reading, …]` array the remote
//! `/api/csv-rows` endpoint serves; [`StaticDataset`] wraps rows already in
//! memory.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::app::ports::DatasetPort;
use crate::aqi::reading::Reading;
use crate::error::DatasetError;

use super::remote::decode_rows;

pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetPort for JsonFileDataset {
    fn fetch_rows(&mut self) -> Result<Vec<Reading>, DatasetError> {
        let bytes = fs::read(&self.path)
            .map_err(|e| DatasetError::Io(format!("{}: {e}", self.path.display())))?;
        let rows = decode_rows(&bytes)?;
        info!("JsonFileDataset: {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    rows: Vec<Reading>,
}

impl StaticDataset {
    pub fn new(rows: Vec<Reading>) -> Self {
        Self { rows }
    }
}

impl DatasetPort for StaticDataset {
    fn fetch_rows(&mut self) -> Result<Vec<Reading>, DatasetError> {
        Ok(self.rows.clone())
    }
}
