use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::args::{Cli, Commands};
use crate::client::{FeedQuery, FeedSource, KmaClient};
use crate::config::AppConfig;
use crate::error::{RelayError, Result};
use crate::models::RequestWindow;
use crate::processors::{raw_preview, Export, Pipeline, RangeResolver};
use crate::readers::{FeedReader, FeedVariant};
use crate::server;
use crate::utils::constants::{PROBE_DEFAULT_TM1, PROBE_DEFAULT_TM2};
use crate::utils::encoding::decode_feed_bytes;
use crate::utils::filename::generate_default_csv_path;
use crate::utils::progress::ProgressReporter;
use crate::writers::write_csv_file;

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.effective_log_level());

    debug!("Command: {:?}", cli.command);

    match cli.command {
        Commands::Serve { port } => {
            let mut config = AppConfig::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            server::serve(config).await
        }

        Commands::Fetch {
            start,
            end,
            variant,
            station,
            location,
            output,
        } => {
            let config = AppConfig::load()?;
            let window = fetch_window(start, end)?;
            let client = KmaClient::from_config(&config)?;
            let location = location.unwrap_or_else(|| config.location_label.clone());

            let export = fetch_export(&client, variant, &window, station, &location).await?;

            let output = output
                .unwrap_or_else(|| generate_default_csv_path(window.start_date(), window.last_date()));
            write_csv_file(&export.csv, &output)?;

            println!(
                "Wrote {} rows ({} observations parsed) to {}",
                export.row_count,
                export.parsed_count,
                output.display()
            );
            Ok(())
        }

        Commands::Convert {
            input,
            variant,
            location,
            output,
        } => {
            let location = location_or_configured(location, AppConfig::load)?;
            let export = convert_file(&input, variant, &location)?;

            match output {
                Some(path) => {
                    write_csv_file(&export.csv, &path)?;
                    println!("Wrote {} rows to {}", export.row_count, path.display());
                }
                None => print!("{}", export.csv),
            }
            Ok(())
        }

        Commands::Probe {
            station,
            start,
            end,
            variant,
        } => {
            let client = KmaClient::from_config(&AppConfig::load()?)?;
            let window = RequestWindow::from_wire(
                start.as_deref().unwrap_or(PROBE_DEFAULT_TM1),
                end.as_deref().unwrap_or(PROBE_DEFAULT_TM2),
            )?;
            let layout = variant.layout();

            let raw = client
                .fetch(&FeedQuery::observations(layout, &window, station.clone()))
                .await?;
            let observations = FeedReader::new(layout).parse(&raw);

            println!("Station: {}", station);
            println!("Period: {}", window.period_label());
            println!("Raw length: {} characters", raw.chars().count());
            println!("Parsed observations: {}", observations.len());
            match observations.first() {
                Some(sample) => {
                    let json = serde_json::to_string_pretty(sample)
                        .map_err(|e| RelayError::Config(format!("Cannot render sample: {}", e)))?;
                    println!("First observation:\n{}", json);
                }
                None => println!("No observations for this station and period"),
            }
            println!("Raw preview:\n{}", raw_preview(&raw));
            Ok(())
        }

        Commands::Stations => {
            let client = KmaClient::from_config(&AppConfig::load()?)?;
            let directory = client.fetch(&FeedQuery::station_directory()).await?;
            print!("{}", directory);
            Ok(())
        }
    }
}

/// Window for `fetch`: a 24-hour day without `--end`, else the checked range
pub fn fetch_window(start: NaiveDate, end: Option<NaiveDate>) -> Result<RequestWindow> {
    let resolver = RangeResolver::new();
    match end {
        Some(end) => resolver.resolve(Some(start), Some(end)),
        None => Ok(resolver.resolve_single(start)),
    }
}

/// Fetch one window and run it through the pipeline, with a spinner on stderr
pub async fn fetch_export(
    source: &dyn FeedSource,
    variant: FeedVariant,
    window: &RequestWindow,
    station: Option<String>,
    location: &str,
) -> Result<Export> {
    let layout = variant.layout();
    let station = station.unwrap_or_else(|| layout.default_station.to_string());
    let progress = ProgressReporter::new_spinner(
        &format!("Fetching {} station {} for {}", variant, station, window.period_label()),
        false,
    );

    let raw = match source
        .fetch(&FeedQuery::observations(layout, window, station))
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            progress.abandon_with_message("Upstream request failed");
            return Err(e);
        }
    };

    progress.set_message("Transforming feed...");
    match Pipeline::new(layout, location).run(&raw) {
        Ok(export) => {
            progress.finish_with_message(&format!("Exported {} rows", export.row_count));
            Ok(export)
        }
        Err(e) => {
            progress.abandon_with_message("No CSV produced");
            Err(e)
        }
    }
}

/// Explicit label, or the configured one; configuration is only loaded when needed
fn location_or_configured(
    location: Option<String>,
    load: impl FnOnce() -> Result<AppConfig>,
) -> Result<String> {
    match location {
        Some(location) => Ok(location),
        None => Ok(load()?.location_label),
    }
}

/// Offline transform of a raw feed saved to disk
pub fn convert_file(input: &Path, variant: FeedVariant, location: &str) -> Result<Export> {
    info!("Converting {} as {} feed", input.display(), variant);
    let bytes = fs::read(input)?;
    let raw = decode_feed_bytes(&bytes);
    Pipeline::new(variant.layout(), location).run(&raw)
}

fn setup_logging(log_level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kma_weather_export={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_convert_file() -> Result<()> {
        let mut input = NamedTempFile::new()?;
        write!(
            input,
            "# YYMMDDHHMI STN\n\
             202510220000 108  20  1.6  -9 -9.0   -9 1008.2 1018.9 -9  -9.0  12.3   5.1  61.0\n"
        )?;

        let export = convert_file(input.path(), FeedVariant::Synoptic, "서울시")?;

        assert_eq!(export.row_count, 1);
        assert_eq!(
            export.csv,
            "id,temperature,humidity,recorded_at,location\n1,12.3,61.0,2025-10-22 00:00:00,서울시\n"
        );
        Ok(())
    }

    #[test]
    fn test_fetch_window() -> Result<()> {
        let day = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();

        let single = fetch_window(day, None)?;
        assert_eq!(single.tm1(), "202510220000");
        assert_eq!(single.tm2(), "202510230000");

        let range = fetch_window(day, Some(day + chrono::Duration::days(2)))?;
        assert_eq!(range.tm2(), "202510250000");

        assert!(matches!(
            fetch_window(day, Some(day - chrono::Duration::days(1))),
            Err(RelayError::InvalidRange(_))
        ));
        assert!(matches!(
            fetch_window(day, Some(day + chrono::Duration::days(22))),
            Err(RelayError::RangeTooLarge { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_explicit_location_skips_config_loading() -> Result<()> {
        let broken = || Err(RelayError::Config("unreadable weather-relay.toml".to_string()));

        assert_eq!(location_or_configured(Some("금천구".to_string()), broken)?, "금천구");
        assert!(matches!(
            location_or_configured(None, broken),
            Err(RelayError::Config(_))
        ));
        assert_eq!(
            location_or_configured(None, || Ok(AppConfig::default()))?,
            "서울시"
        );
        Ok(())
    }

    #[test]
    fn test_convert_file_without_data_reports_empty() -> Result<()> {
        let mut input = NamedTempFile::new()?;
        write!(input, "#START7777\n#7777END\n")?;

        let result = convert_file(input.path(), FeedVariant::Synoptic, "서울시");
        assert!(matches!(result, Err(RelayError::EmptyResult { .. })));
        Ok(())
    }
}
