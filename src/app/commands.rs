//! Inbound commands to the studio service.
//!
//! These represent form actions requested by the outside world (UI,
//! CLI, scripted sessions) that the
//! [`StudioService`](super::service::StudioService) interprets.  Prediction
//! and dataset fetches need a port and are separate service methods.

use crate::aqi::reading::{Field, Preset};

/// Commands that adapters can send into the studio core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Replace the text of one input.
    SetField(Field, String),

    /// Fill the form with a built-in sample.
    LoadPreset(Preset),

    /// Fill the form from a dataset row.  The index is the raw UI value;
    /// anything that is not a valid row index is ignored.
    SelectRow(String),

    /// Clear the form, result and selection.
    Reset,
}
