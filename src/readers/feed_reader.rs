use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::{Observation, ObservationSeries, Reading};
use crate::readers::layout::FeedLayout;
use crate::utils::constants::{HEADER_MARKER, WIRE_TIMESTAMP_FORMAT};

/// Decodes the fixed-width text feed into observations for one layout
pub struct FeedReader {
    layout: &'static FeedLayout,
}

impl FeedReader {
    pub fn new(layout: &'static FeedLayout) -> Self {
        Self { layout }
    }

    /// Parse a full feed response.
    ///
    /// Lines are ignored until one containing the `YYMMDDHHMI` column token
    /// has been seen. After that, only lines starting with a 12-digit
    /// timestamp are decoded; short or undecodable lines are skipped.
    pub fn parse(&self, raw: &str) -> ObservationSeries {
        let mut observations = Vec::new();
        let mut header_found = false;

        for line in raw.lines() {
            if line.contains(HEADER_MARKER) {
                header_found = true;
                continue;
            }

            if !header_found || !starts_with_wire_timestamp(line) {
                continue;
            }

            if let Some(observation) = self.parse_line(line) {
                observations.push(observation);
            }
        }

        debug!(
            "Parsed {} observations (header found: {})",
            observations.len(),
            header_found
        );

        observations
    }

    /// Decode a single data line, or `None` when it has too few columns
    fn parse_line(&self, line: &str) -> Option<Observation> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < self.layout.min_columns {
            debug!(
                "Skipping line with {} of {} required columns",
                parts.len(),
                self.layout.min_columns
            );
            return None;
        }

        let raw_timestamp = parts[self.layout.timestamp_column];
        let timestamp = match NaiveDateTime::parse_from_str(raw_timestamp, WIRE_TIMESTAMP_FORMAT) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                debug!("Skipping line with invalid timestamp '{}': {}", raw_timestamp, e);
                return None;
            }
        };

        let mut observation = Observation::new(timestamp, parts[self.layout.station_column]);
        for &(field, index) in self.layout.columns {
            let reading = parts
                .get(index)
                .map(|raw| Reading::new(*raw))
                .unwrap_or(Reading::Absent);
            observation.set_reading(field, reading);
        }

        Some(observation)
    }
}

/// True when the line begins with exactly twelve ASCII digits
fn starts_with_wire_timestamp(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 12
        && bytes[..12].iter().all(u8::is_ascii_digit)
        && bytes.get(12).map_or(true, |b| !b.is_ascii_digit())
}
