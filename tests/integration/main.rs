//! Studio flow tests.
//!
//! Drives `StudioService` through presets, dataset rows and prediction
//! requests with scripted ports standing in for the AQI service.

mod dataset_flow_tests;
mod prediction_flow_tests;
