use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RelayError;
use crate::models::Field;
use crate::processors::resampler::{Grid, ResamplePolicy};
use crate::writers::timestamp::TimestampStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FeedVariant {
    /// Hourly synoptic observations (ASOS)
    #[default]
    Synoptic,
    /// Per-minute automated weather station observations
    Aws,
}

impl FeedVariant {
    pub fn layout(&self) -> &'static FeedLayout {
        match self {
            FeedVariant::Synoptic => &SYNOPTIC_LAYOUT,
            FeedVariant::Aws => &AWS_MINUTE_LAYOUT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedVariant::Synoptic => "synoptic",
            FeedVariant::Aws => "aws",
        }
    }
}

impl fmt::Display for FeedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedVariant {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "synoptic" | "asos" | "hourly" => Ok(FeedVariant::Synoptic),
            "aws" | "minute" => Ok(FeedVariant::Aws),
            other => Err(RelayError::Config(format!("Unknown feed variant: {}", other))),
        }
    }
}

/// Column layout for one upstream feed variant. Adding a product means adding
/// a table entry, not a decoder.
#[derive(Debug)]
pub struct FeedLayout {
    pub variant: FeedVariant,
    /// Endpoint path relative to the API base URL
    pub endpoint: &'static str,
    /// Fixed query parameters sent on every request for this variant
    pub extra_params: &'static [(&'static str, &'static str)],
    pub default_station: &'static str,
    /// Lines with fewer whitespace-separated columns are dropped
    pub min_columns: usize,
    pub timestamp_column: usize,
    pub station_column: usize,
    pub columns: &'static [(Field, usize)],
    /// Raw values meaning "no reading" for this variant
    pub sentinels: &'static [&'static str],
    pub resample: ResamplePolicy,
    /// Output value columns, in order, between `id` and `recorded_at`
    pub csv_columns: &'static [(&'static str, Field)],
    pub timestamp_style: TimestampStyle,
}

pub static SYNOPTIC_LAYOUT: FeedLayout = FeedLayout {
    variant: FeedVariant::Synoptic,
    endpoint: "typ01/url/kma_sfctm3.php",
    extra_params: &[],
    default_station: "108",
    min_columns: 13,
    timestamp_column: 0,
    station_column: 1,
    columns: &[
        (Field::WindDirection, 2),
        (Field::WindSpeed, 3),
        (Field::Pressure, 7),
        (Field::Temperature, 11),
        (Field::DewPoint, 12),
        (Field::Humidity, 13),
    ],
    sentinels: &["-9", "-9.0"],
    resample: ResamplePolicy::Interpolate {
        grid: Grid::every(15),
        field: Field::Temperature,
    },
    csv_columns: &[("temperature", Field::Temperature), ("humidity", Field::Humidity)],
    timestamp_style: TimestampStyle::Iso24Hour,
};

pub static AWS_MINUTE_LAYOUT: FeedLayout = FeedLayout {
    variant: FeedVariant::Aws,
    endpoint: "typ01/cgi-bin/url/nph-aws2_min",
    extra_params: &[("disp", "0")],
    default_station: "417",
    min_columns: 18,
    timestamp_column: 0,
    station_column: 1,
    columns: &[
        (Field::WindDirection1m, 2),
        (Field::WindSpeed1m, 3),
        (Field::WindDirectionMax, 4),
        (Field::WindSpeedMax, 5),
        (Field::WindDirection, 6),
        (Field::WindSpeed, 7),
        (Field::Temperature, 8),
        (Field::RainDetected, 9),
        (Field::Rain15m, 10),
        (Field::Rain60m, 11),
        (Field::Rain12h, 12),
        (Field::RainDay, 13),
        (Field::Humidity, 14),
        (Field::Pressure, 15),
        (Field::SeaLevelPressure, 16),
        (Field::DewPoint, 17),
    ],
    sentinels: &["-9", "-9.0", "-99", "-99.0"],
    resample: ResamplePolicy::Filter(Grid::every(15)),
    csv_columns: &[
        ("temperature", Field::Temperature),
        ("humidity", Field::Humidity),
        ("wind_direction", Field::WindDirection),
        ("wind_speed", Field::WindSpeed),
        ("precipitation_15m", Field::Rain15m),
        ("precipitation_day", Field::RainDay),
        ("pressure", Field::Pressure),
    ],
    timestamp_style: TimestampStyle::Korean12Hour,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("synoptic".parse::<FeedVariant>().unwrap(), FeedVariant::Synoptic);
        assert_eq!("AWS".parse::<FeedVariant>().unwrap(), FeedVariant::Aws);
        assert!("radar".parse::<FeedVariant>().is_err());
    }

    #[test]
    fn test_layout_columns_fit_within_line() {
        for variant in [FeedVariant::Synoptic, FeedVariant::Aws] {
            let layout = variant.layout();
            assert_eq!(layout.variant, variant);
            assert!(layout.timestamp_column < layout.min_columns);
            assert!(layout.station_column < layout.min_columns);
            for (_, field) in layout.csv_columns {
                assert!(
                    layout.columns.iter().any(|(mapped, _)| mapped == field),
                    "{} outputs {:?} without mapping it",
                    variant,
                    field
                );
            }
        }
    }

    #[test]
    fn test_sentinel_sets_differ_per_variant() {
        assert!(SYNOPTIC_LAYOUT.sentinels.contains(&"-9.0"));
        assert!(!SYNOPTIC_LAYOUT.sentinels.contains(&"-99"));
        assert!(AWS_MINUTE_LAYOUT.sentinels.contains(&"-99.0"));
        assert!(!AWS_MINUTE_LAYOUT.sentinels.contains(&"-9.5"));
    }
}
