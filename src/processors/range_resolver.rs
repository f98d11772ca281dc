use chrono::{Duration, NaiveDate};

use crate::error::{RelayError, Result};
use crate::models::RequestWindow;
use crate::utils::constants::MAX_RANGE_DAYS;

/// Turns calendar dates into the `[tm1, tm2)` window the feed expects
pub struct RangeResolver {
    max_span_days: i64,
}

impl RangeResolver {
    pub fn new() -> Self {
        Self {
            max_span_days: MAX_RANGE_DAYS,
        }
    }

    /// Check a date pair and report the first violated rule
    pub fn check(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(NaiveDate, NaiveDate)> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(RelayError::InvalidRange(
                    "Both a start date and an end date are required".to_string(),
                ))
            }
        };

        if start > end {
            return Err(RelayError::InvalidRange(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        let days = (end - start).num_days();
        if days > self.max_span_days {
            return Err(RelayError::RangeTooLarge {
                days,
                max: self.max_span_days,
            });
        }

        Ok((start, end))
    }

    /// Resolve to start-of-day `start` through the midnight after `end`
    pub fn resolve(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<RequestWindow> {
        let (start, end) = self.check(start, end)?;
        Ok(window_for(start, end))
    }

    /// 24-hour window for a single calendar date; no span policy applies
    pub fn resolve_single(&self, date: NaiveDate) -> RequestWindow {
        window_for(date, date)
    }
}

impl Default for RangeResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn window_for(start: NaiveDate, end: NaiveDate) -> RequestWindow {
    let end_exclusive = end + Duration::days(1);
    RequestWindow::new(
        start.and_time(chrono::NaiveTime::MIN),
        end_exclusive.and_time(chrono::NaiveTime::MIN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range() {
        let resolver = RangeResolver::new();
        let window = resolver
            .resolve(Some(date(2025, 10, 21)), Some(date(2025, 10, 22)))
            .unwrap();

        assert_eq!(window.tm1(), "202510210000");
        assert_eq!(window.tm2(), "202510230000");
    }

    #[test]
    fn test_resolve_crosses_month_and_year() {
        let window = RangeResolver::new()
            .resolve(Some(date(2024, 12, 20)), Some(date(2024, 12, 31)))
            .unwrap();

        assert_eq!(window.tm1(), "202412200000");
        assert_eq!(window.tm2(), "202501010000");
    }

    #[test]
    fn test_single_date_is_24_hours() {
        let window = RangeResolver::new().resolve_single(date(2024, 2, 28));
        assert_eq!(window.tm1(), "202402280000");
        assert_eq!(window.tm2(), "202402290000");

        let same = RangeResolver::new()
            .resolve(Some(date(2024, 2, 28)), Some(date(2024, 2, 28)))
            .unwrap();
        assert_eq!(same, window);
    }

    #[test]
    fn test_missing_date_is_invalid() {
        let resolver = RangeResolver::new();
        assert!(matches!(
            resolver.resolve(None, Some(date(2025, 10, 22))),
            Err(RelayError::InvalidRange(_))
        ));
        assert!(matches!(
            resolver.resolve(Some(date(2025, 10, 22)), None),
            Err(RelayError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_reversed_dates_are_invalid() {
        let result = RangeResolver::new().resolve(Some(date(2025, 10, 23)), Some(date(2025, 10, 22)));
        assert!(matches!(result, Err(RelayError::InvalidRange(_))));
    }

    #[test]
    fn test_span_limit() {
        let resolver = RangeResolver::new();

        let exactly_21 = resolver.resolve(Some(date(2025, 10, 1)), Some(date(2025, 10, 22)));
        assert!(exactly_21.is_ok());

        let too_long = resolver.resolve(Some(date(2025, 10, 1)), Some(date(2025, 10, 23)));
        assert!(matches!(
            too_long,
            Err(RelayError::RangeTooLarge { days: 22, max: 21 })
        ));
    }

    #[test]
    fn test_order_checked_before_span() {
        let result = RangeResolver::new().check(Some(date(2025, 12, 31)), Some(date(2025, 1, 1)));
        assert!(matches!(result, Err(RelayError::InvalidRange(_))));
    }
}
