use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RelayError, Result};
use crate::utils::constants::WIRE_TIMESTAMP_FORMAT;

/// Half-open request window `[start, end)` in upstream local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RequestWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Parse a pair of `YYYYMMDDHHMI` wire timestamps
    pub fn from_wire(tm1: &str, tm2: &str) -> Result<Self> {
        Ok(Self {
            start: parse_wire_timestamp(tm1)?,
            end: parse_wire_timestamp(tm2)?,
        })
    }

    pub fn tm1(&self) -> String {
        self.start.format(WIRE_TIMESTAMP_FORMAT).to_string()
    }

    pub fn tm2(&self) -> String {
        self.end.format(WIRE_TIMESTAMP_FORMAT).to_string()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day covered by the window
    pub fn last_date(&self) -> NaiveDate {
        (self.end - chrono::Duration::minutes(1)).date()
    }

    pub fn period_label(&self) -> String {
        format!("{} ~ {}", self.tm1(), self.tm2())
    }
}

/// Parse a 12-digit `YYYYMMDDHHMI` timestamp
pub fn parse_wire_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if raw.len() != 12 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RelayError::InvalidRange(format!(
            "Expected a 12-digit YYYYMMDDHHMI timestamp, got '{}'",
            raw
        )));
    }
    Ok(NaiveDateTime::parse_from_str(raw, WIRE_TIMESTAMP_FORMAT)?)
}
