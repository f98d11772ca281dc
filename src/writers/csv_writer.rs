use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{RelayError, Result};
use crate::models::{CsvRow, Field, Observation};
use crate::readers::FeedLayout;
use crate::writers::timestamp::TimestampStyle;

/// Renders observations as CSV text.
///
/// Fields are written verbatim: no quoting or escaping is applied, since no
/// value in these feeds carries a comma.
pub struct CsvWriter {
    columns: &'static [(&'static str, Field)],
    timestamp_style: TimestampStyle,
}

impl CsvWriter {
    pub fn new(columns: &'static [(&'static str, Field)], timestamp_style: TimestampStyle) -> Self {
        Self {
            columns,
            timestamp_style,
        }
    }

    pub fn for_layout(layout: &FeedLayout) -> Self {
        Self::new(layout.csv_columns, layout.timestamp_style)
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = Vec::with_capacity(self.columns.len() + 3);
        header.push("id");
        header.extend(self.columns.iter().map(|(name, _)| *name));
        header.push("recorded_at");
        header.push("location");
        header
    }

    /// Build output rows with fresh 1-based ids in input order
    pub fn rows(&self, observations: &[Observation], location: &str) -> Vec<CsvRow> {
        observations
            .iter()
            .enumerate()
            .map(|(index, obs)| {
                let values = self
                    .columns
                    .iter()
                    .map(|(_, field)| obs.reading(*field).as_str().unwrap_or_default().to_string())
                    .collect();
                CsvRow::new(
                    index + 1,
                    values,
                    self.timestamp_style.render(&obs.timestamp),
                    location.to_string(),
                )
            })
            .collect()
    }

    pub fn write<W: Write>(&self, observations: &[Observation], location: &str, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(sink);

        writer.write_record(self.header())?;
        for row in self.rows(observations, location) {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn write_to_string(&self, observations: &[Observation], location: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(observations, location, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| RelayError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Write an already-rendered CSV blob, creating parent directories
pub fn write_csv_file(csv: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, csv)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reading;
    use crate::readers::{AWS_MINUTE_LAYOUT, SYNOPTIC_LAYOUT};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn obs(station: &str, minute: u32, temp: Reading, humidity: Reading) -> Observation {
        let ts = NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap();
        Observation::new(ts, station)
            .with_reading(Field::Temperature, temp)
            .with_reading(Field::Humidity, humidity)
    }

    #[test]
    fn test_ids_are_sequential_regardless_of_source() {
        let observations = vec![
            obs("990", 0, Reading::new("12.3"), Reading::new("55.0")),
            obs("108", 15, Reading::Absent, Reading::new("56.0")),
            obs("417", 30, Reading::new("12.9"), Reading::Absent),
        ];

        let csv = CsvWriter::for_layout(&SYNOPTIC_LAYOUT)
            .write_to_string(&observations, "서울시")
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id,temperature,humidity,recorded_at,location");
        assert_eq!(lines[1], "1,12.3,55.0,2025-10-22 14:00:00,서울시");
        assert_eq!(lines[2], "2,,56.0,2025-10-22 14:15:00,서울시");
        assert_eq!(lines[3], "3,12.9,,2025-10-22 14:30:00,서울시");
    }

    #[test]
    fn test_no_quoting_is_applied() {
        let observations = vec![obs("108", 0, Reading::new("1.0"), Reading::new("2.0"))];
        let csv = CsvWriter::for_layout(&SYNOPTIC_LAYOUT)
            .write_to_string(&observations, "Seoul, KR")
            .unwrap();

        assert!(csv.ends_with(",Seoul, KR\n"));
        assert!(!csv.contains('"'));
    }

    #[test]
    fn test_header_only_for_empty_input() {
        let csv = CsvWriter::for_layout(&AWS_MINUTE_LAYOUT)
            .write_to_string(&[], "금천구")
            .unwrap();

        assert_eq!(
            csv,
            "id,temperature,humidity,wind_direction,wind_speed,precipitation_15m,precipitation_day,pressure,recorded_at,location\n"
        );
    }

    #[test]
    fn test_synoptic_header() {
        assert_eq!(
            CsvWriter::for_layout(&SYNOPTIC_LAYOUT).header(),
            vec!["id", "temperature", "humidity", "recorded_at", "location"]
        );
    }

    #[test]
    fn test_write_csv_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("output").join("weather.csv");

        write_csv_file("id\n1\n", &path)?;

        assert_eq!(fs::read_to_string(&path)?, "id\n1\n");
        Ok(())
    }
}
