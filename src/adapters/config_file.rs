//! JSON file config adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document on disk.  A
//! missing file loads as [`StudioConfig::default()`]; every load and save
//! goes through [`StudioConfig::validate`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::StudioConfig;

pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<StudioConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("JsonFileConfig: {} not found, using defaults", self.path.display());
                return Ok(StudioConfig::default());
            }
            Err(e) => {
                warn!("JsonFileConfig: cannot read {}: {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        let cfg: StudioConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("JsonFileConfig: {} is not valid config: {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!("JsonFileConfig: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &StudioConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        // Write-then-rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|_| ConfigError::IoError)?;
        fs::rename(&tmp, &self.path).map_err(|_| ConfigError::IoError)?;
        info!("JsonFileConfig: saved {}", self.path.display());
        Ok(())
    }
}
