//! Local AQI heuristic.
//!
//! A fixed linear score over the pollutant readings, offset by wind and
//! humidity, clamped to `[0, MAX_AQI]` and rounded:
//!
//! ```text
//! score = 0.45·PM2.5 + 0.25·PM10 + 0.08·NO2 + 0.06·SO2 + 2.5·CO + 0.06·O3
//!         − (2·wind_speed + 0.2·(50 − humidity))
//! ```
//!
//! Temperature is part of a [`Reading`] but has no coefficient.

use super::reading::Reading;

/// Upper clamp of the heuristic output.
pub const MAX_AQI: u32 = 600;

const W_PM2_5: f64 = 0.45;
const W_PM10: f64 = 0.25;
const W_NO2: f64 = 0.08;
const W_SO2: f64 = 0.06;
const W_CO: f64 = 2.5;
const W_O3: f64 = 0.06;
const W_WIND: f64 = 2.0;
const W_HUMIDITY: f64 = 0.2;
/// Humidity at which the humidity term is neutral (%).
const HUMIDITY_PIVOT: f64 = 50.0;

/// Unclamped linear score.
pub fn score(r: &Reading) -> f64 {
    let pollutants = W_PM2_5 * r.pm2_5
        + W_PM10 * r.pm10
        + W_NO2 * r.no2
        + W_SO2 * r.so2
        + W_CO * r.co
        + W_O3 * r.o3;
    let dispersion = W_WIND * r.wind_speed + W_HUMIDITY * (HUMIDITY_PIVOT - r.humidity);
    pollutants - dispersion
}

/// Predicted AQI in `[0, MAX_AQI]`.
pub fn predict(r: &Reading) -> u32 {
    let s = score(r);
    if s.is_nan() {
        return 0;
    }
    s.clamp(0.0, f64::from(MAX_AQI)).round() as u32
}
