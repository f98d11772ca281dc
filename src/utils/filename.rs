use chrono::NaiveDate;
use std::path::PathBuf;

/// Download filename for a date range: weather_data_{YYYY-MM-DD}_{YYYY-MM-DD}.csv
pub fn generate_csv_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "weather_data_{}_{}.csv",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Default output path for the CLI: output/weather_data_{start}_{end}.csv
pub fn generate_default_csv_path(start: NaiveDate, end: NaiveDate) -> PathBuf {
    PathBuf::from("output").join(generate_csv_filename(start, end))
}
