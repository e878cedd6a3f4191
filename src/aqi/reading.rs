//! Air-quality readings and the text-entry form that produces them.
//!
//! A [`Reading`] is the typed, numeric record handed to predictors.  The
//! [`FormValues`] buffer holds what the user actually typed; converting it
//! into a `Reading` coerces blank or malformed text to `0`.
//!
//! The JSON shape uses the wire keys `PM2_5`, `PM10`, `NO2`, `SO2`, `CO`,
//! `O3`, `temperature`, `humidity`, `wind_speed`.  Incoming rows are
//! lenient: numbers, numeric strings, empty strings and `null` are all
//! accepted, and missing keys default to `0`.

use core::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize};

/// Capacity of a single form input, in bytes.
pub const INPUT_CAP: usize = 32;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One of the nine inputs of a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pm2_5,
    Pm10,
    No2,
    So2,
    Co,
    O3,
    Temperature,
    Humidity,
    WindSpeed,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 9] = [
        Self::Pm2_5,
        Self::Pm10,
        Self::No2,
        Self::So2,
        Self::Co,
        Self::O3,
        Self::Temperature,
        Self::Humidity,
        Self::WindSpeed,
    ];

    /// JSON key on the wire.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pm2_5 => "PM2_5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
            Self::O3 => "O3",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
        }
    }

    /// Form label: the key with underscores shown as spaces.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pm2_5 => "PM2 5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
            Self::O3 => "O3",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind speed",
        }
    }

    /// Look a field up by wire key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Nine environmental measurements used to estimate AQI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    /// Fine particulate matter (µg/m³).
    #[serde(rename = "PM2_5", deserialize_with = "lenient_f64")]
    pub pm2_5: f64,
    /// Coarse particulate matter (µg/m³).
    #[serde(rename = "PM10", deserialize_with = "lenient_f64")]
    pub pm10: f64,
    #[serde(rename = "NO2", deserialize_with = "lenient_f64")]
    pub no2: f64,
    #[serde(rename = "SO2", deserialize_with = "lenient_f64")]
    pub so2: f64,
    /// Carbon monoxide (mg/m³).
    #[serde(rename = "CO", deserialize_with = "lenient_f64")]
    pub co: f64,
    #[serde(rename = "O3", deserialize_with = "lenient_f64")]
    pub o3: f64,
    /// Ambient temperature (°C).
    #[serde(deserialize_with = "lenient_f64")]
    pub temperature: f64,
    /// Relative humidity (%).
    #[serde(deserialize_with = "lenient_f64")]
    pub humidity: f64,
    /// Wind speed (m/s).
    #[serde(deserialize_with = "lenient_f64")]
    pub wind_speed: f64,
}

impl Reading {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Pm2_5 => self.pm2_5,
            Field::Pm10 => self.pm10,
            Field::No2 => self.no2,
            Field::So2 => self.so2,
            Field::Co => self.co,
            Field::O3 => self.o3,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::WindSpeed => self.wind_speed,
        }
    }

    /// Set a field, coercing non-finite values to `0`.
    pub fn set(&mut self, field: Field, value: f64) {
        let value = finite_or_zero(value);
        match field {
            Field::Pm2_5 => self.pm2_5 = value,
            Field::Pm10 => self.pm10 = value,
            Field::No2 => self.no2 = value,
            Field::So2 => self.so2 = value,
            Field::Co => self.co = value,
            Field::O3 => self.o3 = value,
            Field::Temperature => self.temperature = value,
            Field::Humidity => self.humidity = value,
            Field::WindSpeed => self.wind_speed = value,
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, value);
        self
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Coerce one text input into a number.  Blank, malformed and non-finite
/// text all become `0`.
pub fn coerce(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map_or(0.0, finite_or_zero)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map_or(0.0, finite_or_zero),
        serde_json::Value::String(s) => coerce(&s),
        _ => 0.0,
    })
}

// ---------------------------------------------------------------------------
// Form buffer
// ---------------------------------------------------------------------------

/// Raw text of every form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    inputs: [heapless::String<INPUT_CAP>; 9],
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one input.  Returns `false` (and leaves the input untouched)
    /// if `text` does not fit the input buffer.
    pub fn set(&mut self, field: Field, text: &str) -> bool {
        let mut buf = heapless::String::new();
        if buf.push_str(text).is_err() {
            return false;
        }
        self.inputs[field.index()] = buf;
        true
    }

    pub fn get(&self, field: Field) -> &str {
        self.inputs[field.index()].as_str()
    }

    /// True if every input is blank.
    pub fn is_blank(&self) -> bool {
        self.inputs.iter().all(|s| s.trim().is_empty())
    }

    pub fn clear(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
    }

    /// Coerce the form into a numeric reading.
    pub fn to_reading(&self) -> Reading {
        let mut reading = Reading::default();
        for field in Field::ALL {
            reading.set(field, coerce(self.get(field)));
        }
        reading
    }

    /// Fill every input from a reading.
    pub fn from_reading(reading: &Reading) -> Self {
        let mut form = Self::new();
        for field in Field::ALL {
            let input = &mut form.inputs[field.index()];
            let value = reading.get(field);
            if write!(input, "{value}").is_err() {
                // Plain notation overflowed the buffer.
                // `{:e}` of an f64 needs at most 24 bytes.
                input.clear();
                let fits = write!(input, "{value:e}").is_ok();
                debug_assert!(fits, "{value:e} exceeds {INPUT_CAP} bytes");
            }
        }
        form
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Built-in sample readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Clean,
    Moderate,
    Polluted,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Clean, Self::Moderate, Self::Polluted];

    pub const fn reading(self) -> Reading {
        match self {
            Self::Clean => Reading {
                pm2_5: 18.0,
                pm10: 35.0,
                no2: 15.0,
                so2: 5.0,
                co: 0.4,
                o3: 25.0,
                temperature: 26.0,
                humidity: 60.0,
                wind_speed: 4.0,
            },
            Self::Moderate => Reading {
                pm2_5: 72.0,
                pm10: 130.0,
                no2: 55.0,
                so2: 18.0,
                co: 1.2,
                o3: 45.0,
                temperature: 32.0,
                humidity: 48.0,
                wind_speed: 2.0,
            },
            Self::Polluted => Reading {
                pm2_5: 180.0,
                pm10: 320.0,
                no2: 140.0,
                so2: 45.0,
                co: 3.1,
                o3: 95.0,
                temperature: 36.0,
                humidity: 38.0,
                wind_speed: 1.0,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Moderate => "moderate",
            Self::Polluted => "polluted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}
