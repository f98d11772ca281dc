use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::readers::FeedVariant;

#[derive(Parser, Debug)]
#[command(name = "kma-weather-export")]
#[command(about = "Fetch KMA surface observations and export them as CSV")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Log level (error, warn, info, debug, trace)",
        default_value = "info"
    )]
    pub log_level: String,
}

impl Cli {
    /// `--verbose` wins over `--log-level`
    pub fn effective_log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the JSON relay
    Serve {
        #[arg(short, long, help = "Listen port [default: PORT or 3000]")]
        port: Option<u16>,
    },

    /// Fetch a date range and write it as CSV
    Fetch {
        #[arg(short, long, help = "First day (YYYY-MM-DD)")]
        start: NaiveDate,

        #[arg(short, long, help = "Last day, inclusive (YYYY-MM-DD) [default: same as --start]")]
        end: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = FeedVariant::Synoptic)]
        variant: FeedVariant,

        #[arg(long, help = "Station id [default: the variant's station]")]
        station: Option<String>,

        #[arg(long, help = "Location label written to every row [default: LOCATION_LABEL]")]
        location: Option<String>,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/weather_data_{start}_{end}.csv]"
        )]
        output: Option<PathBuf>,
    },

    /// Transform a saved raw feed response without any network access
    Convert {
        #[arg(short, long, help = "Raw feed text file")]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = FeedVariant::Synoptic)]
        variant: FeedVariant,

        #[arg(long, help = "Location label written to every row [default: LOCATION_LABEL]")]
        location: Option<String>,

        #[arg(short, long, help = "Output CSV path [default: stdout]")]
        output: Option<PathBuf>,
    },

    /// Fetch one station and print a parsed sample plus a raw preview
    Probe {
        #[arg(long, help = "Station id")]
        station: String,

        #[arg(long, help = "Window start (YYYYMMDDHHMI) [default: 202510220000]")]
        start: Option<String>,

        #[arg(long, help = "Window end (YYYYMMDDHHMI) [default: 202510232359]")]
        end: Option<String>,

        #[arg(long, value_enum, default_value_t = FeedVariant::Synoptic)]
        variant: FeedVariant,
    },

    /// Print the raw station directory
    Stations,
}
