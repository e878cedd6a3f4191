//! Air-quality domain model.
//!
//! - [`reading`]   — the nine-field [`Reading`], form buffer, presets.
//! - [`category`]  — AQI → severity [`Category`] and its colours.
//! - [`heuristic`] — local linear AQI estimate.

pub mod category;
pub mod heuristic;
pub mod reading;

pub use category::{Band, Category, ColourToken, LegendEntry, Palette, SevereColour, ceil_aqi, classify};
pub use reading::{Field, FormValues, Preset, Reading};
