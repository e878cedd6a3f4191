//! AQI Studio library.
//!
//! The air-quality reading model, AQI classification, the local heuristic
//! predictor and the studio session that ties them to prediction and
//! dataset services.  Everything that talks to the outside world goes
//! through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod aqi;
pub mod config;
pub mod display;
pub mod error;

pub use error::{Error, Result};
