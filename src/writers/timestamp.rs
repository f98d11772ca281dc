use chrono::{NaiveDateTime, Timelike};

use crate::utils::constants::{AM_LABEL, PM_LABEL};

/// How `recorded_at` is rendered in CSV output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `YYYY-MM-DD HH:MM:00`
    Iso24Hour,
    /// `YYYY. MM. DD 오전|오후 HH:MM:00`, with hours 0 and 12 shown as 12
    Korean12Hour,
}

impl TimestampStyle {
    pub fn render(&self, timestamp: &NaiveDateTime) -> String {
        match self {
            TimestampStyle::Iso24Hour => timestamp.format("%Y-%m-%d %H:%M:00").to_string(),
            TimestampStyle::Korean12Hour => {
                let marker = if timestamp.hour() < 12 { AM_LABEL } else { PM_LABEL };
                format!(
                    "{} {} {}",
                    timestamp.format("%Y. %m. %d"),
                    marker,
                    timestamp.format("%I:%M:00")
                )
            }
        }
    }
}
