//! Remote prediction service adapters.
//!
//! The service speaks plain JSON over HTTP:
//!
//! | Method | Path            | Request body | Response body               |
//! |--------|-----------------|--------------|-----------------------------|
//! | POST   | `/api/predict`  | `Reading`    | `{"predictedAQI": <number>}`|
//! | GET    | `/api/csv-rows` | —            | `[Reading, …]`              |
//!
//! The HTTP client itself is not part of this crate.  Adapters are generic
//! over [`HttpTransport`], so any client (blocking, async-bridged, mocked)
//! can be plugged in without touching the codec.

use log::{debug, warn};
use serde::Deserialize;

use crate::app::ports::{DatasetPort, PredictionPort};
use crate::aqi::category::ceil_aqi;
use crate::aqi::reading::Reading;
use crate::config::StudioConfig;
use crate::error::{DatasetError, PredictionError};

pub const PREDICT_PATH: &str = "/api/predict";
pub const ROWS_PATH: &str = "/api/csv-rows";

// ───────────────────────────────────────────────────────────────
// Transport
// ───────────────────────────────────────────────────────────────

/// Request/response HTTP exchange returning the raw response body.
pub trait HttpTransport {
    type Error: core::fmt::Display;

    /// POST `body` as `application/json` to `url`.
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// GET `url`.
    fn get(&mut self, url: &str) -> Result<Vec<u8>, Self::Error>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &mut T {
    type Error = T::Error;

    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<Vec<u8>, Self::Error> {
        (**self).post_json(url, body)
    }

    fn get(&mut self, url: &str) -> Result<Vec<u8>, Self::Error> {
        (**self).get(url)
    }
}

/// A transport that fails every request.
/// Useful as a placeholder when no HTTP client is wired in.
pub struct NullTransport;

impl HttpTransport for NullTransport {
    type Error = &'static str;

    fn post_json(&mut self, _url: &str, _body: &[u8]) -> Result<Vec<u8>, Self::Error> {
        Err("no HTTP transport configured")
    }

    fn get(&mut self, _url: &str) -> Result<Vec<u8>, Self::Error> {
        Err("no HTTP transport configured")
    }
}

// ───────────────────────────────────────────────────────────────
// Codec
// ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PredictionResponse {
    #[serde(rename = "predictedAQI")]
    predicted_aqi: f64,
}

/// Serialize a reading as the `/api/predict` request body.
pub fn encode_prediction_request(reading: &Reading) -> Result<Vec<u8>, PredictionError> {
    serde_json::to_vec(reading).map_err(|e| PredictionError::Transport(format!("encode: {e}")))
}

/// Parse a `/api/predict` response body.
///
/// Fractional values round up so the stored AQI lands in the same band
/// as the raw value; negative or non-finite values are rejected.
pub fn decode_prediction_response(body: &[u8]) -> Result<u32, PredictionError> {
    let resp: PredictionResponse = serde_json::from_slice(body)
        .map_err(|e| PredictionError::InvalidResponse(e.to_string()))?;
    let v = resp.predicted_aqi;
    ceil_aqi(v).ok_or_else(|| {
        PredictionError::InvalidResponse(format!("predictedAQI out of range: {v}"))
    })
}

/// Parse a `/api/csv-rows` response body.
pub fn decode_rows(body: &[u8]) -> Result<Vec<Reading>, DatasetError> {
    serde_json::from_slice(body).map_err(|e| DatasetError::Malformed(e.to_string()))
}

// ───────────────────────────────────────────────────────────────
// Adapters
// ───────────────────────────────────────────────────────────────

/// [`PredictionPort`] backed by the remote `/api/predict` endpoint.
pub struct RemotePredictor<T> {
    transport: T,
    url: String,
}

impl<T: HttpTransport> RemotePredictor<T> {
    pub fn new(transport: T, config: &StudioConfig) -> Self {
        Self {
            transport,
            url: config.endpoint(PREDICT_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<T: HttpTransport> PredictionPort for RemotePredictor<T> {
    fn predict(&mut self, reading: &Reading) -> Result<u32, PredictionError> {
        let body = encode_prediction_request(reading)?;
        debug!("POST {} ({} bytes)", self.url, body.len());
        let resp = self.transport.post_json(&self.url, &body).map_err(|e| {
            warn!("POST {} failed: {}", self.url, e);
            PredictionError::Transport(e.to_string())
        })?;
        decode_prediction_response(&resp)
    }
}

/// [`DatasetPort`] backed by the remote `/api/csv-rows` endpoint.
pub struct RemoteDataset<T> {
    transport: T,
    url: String,
}

impl<T: HttpTransport> RemoteDataset<T> {
    pub fn new(transport: T, config: &StudioConfig) -> Self {
        Self {
            transport,
            url: config.endpoint(ROWS_PATH),
        }
    }
}

impl<T: HttpTransport> DatasetPort for RemoteDataset<T> {
    fn fetch_rows(&mut self) -> Result<Vec<Reading>, DatasetError> {
        debug!("GET {}", self.url);
        let body = self
            .transport
            .get(&self.url)
            .map_err(|e| DatasetError::Transport(e.to_string()))?;
        decode_rows(&body)
    }
}
