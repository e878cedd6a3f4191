//! Application core — pure studio logic, zero I/O.
//!
//! The form state, dataset selection, prediction request ordering and
//! readout animation live here.  All interaction with predictors, row
//! sources and loggers happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a network.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
