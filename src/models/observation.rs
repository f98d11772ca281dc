use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::utils::constants::WIRE_TIMESTAMP_FORMAT;

/// Measurement fields carried by the KMA surface feeds.
///
/// Serialized names follow the upstream column codes so diagnostic samples
/// read the same as the raw feed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "wd")]
    WindDirection,
    #[serde(rename = "ws")]
    WindSpeed,
    #[serde(rename = "wd1")]
    WindDirection1m,
    #[serde(rename = "ws1")]
    WindSpeed1m,
    #[serde(rename = "wds")]
    WindDirectionMax,
    #[serde(rename = "wss")]
    WindSpeedMax,
    #[serde(rename = "ta")]
    Temperature,
    #[serde(rename = "td")]
    DewPoint,
    #[serde(rename = "hm")]
    Humidity,
    #[serde(rename = "pa")]
    Pressure,
    #[serde(rename = "ps")]
    SeaLevelPressure,
    #[serde(rename = "re")]
    RainDetected,
    #[serde(rename = "rn_15m")]
    Rain15m,
    #[serde(rename = "rn_60m")]
    Rain60m,
    #[serde(rename = "rn_12h")]
    Rain12h,
    #[serde(rename = "rn_day")]
    RainDay,
}

/// A single measurement cell: the upstream text as received, or absent.
///
/// Values keep their original textual precision; nothing is re-parsed or
/// re-rounded on the way to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Option<String>")]
pub enum Reading {
    Value(String),
    Absent,
}

impl Reading {
    pub fn new(raw: impl Into<String>) -> Self {
        Reading::Value(raw.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reading::Value(raw) => Some(raw.as_str()),
            Reading::Absent => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().and_then(|raw| raw.parse::<f64>().ok())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Reading::Absent)
    }
}

impl From<Reading> for Option<String> {
    fn from(reading: Reading) -> Self {
        match reading {
            Reading::Value(raw) => Some(raw),
            Reading::Absent => None,
        }
    }
}

/// One decoded line of the feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    #[serde(rename = "datetime", serialize_with = "serialize_wire_timestamp")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "stn")]
    pub station_id: String,

    #[serde(flatten)]
    pub readings: BTreeMap<Field, Reading>,
}

/// Observations in upstream order. No sorting is applied anywhere.
pub type ObservationSeries = Vec<Observation>;

impl Observation {
    pub fn new(timestamp: NaiveDateTime, station_id: impl Into<String>) -> Self {
        Self {
            timestamp,
            station_id: station_id.into(),
            readings: BTreeMap::new(),
        }
    }

    pub fn with_reading(mut self, field: Field, reading: Reading) -> Self {
        self.readings.insert(field, reading);
        self
    }

    /// Reading for `field`; fields the layout never mapped are absent
    pub fn reading(&self, field: Field) -> &Reading {
        self.readings.get(&field).unwrap_or(&Reading::Absent)
    }

    pub fn set_reading(&mut self, field: Field, reading: Reading) {
        self.readings.insert(field, reading);
    }

    pub fn minute_of_hour(&self) -> u32 {
        self.timestamp.minute()
    }

    pub fn wire_timestamp(&self) -> String {
        self.timestamp.format(WIRE_TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_wire_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.format(WIRE_TIMESTAMP_FORMAT).to_string())
}
