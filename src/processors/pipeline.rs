use tracing::{debug, info};

use crate::error::{RelayError, Result};
use crate::readers::{FeedLayout, FeedReader};
use crate::processors::{SentinelNormalizer, TemporalResampler};
use crate::utils::constants::RAW_PREVIEW_CHARS;
use crate::writers::CsvWriter;

/// Result of transforming one feed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub csv: String,
    /// Rows written, after resampling
    pub row_count: usize,
    /// Observations decoded from the feed, before resampling
    pub parsed_count: usize,
}

/// Raw feed text -> CSV for one layout. Holds no state between runs.
pub struct Pipeline {
    layout: &'static FeedLayout,
    location: String,
}

impl Pipeline {
    pub fn new(layout: &'static FeedLayout, location: impl Into<String>) -> Self {
        Self {
            layout,
            location: location.into(),
        }
    }

    pub fn run(&self, raw: &str) -> Result<Export> {
        let mut observations = FeedReader::new(self.layout).parse(raw);
        let parsed_count = observations.len();

        if observations.is_empty() {
            return Err(RelayError::EmptyResult {
                raw_length: raw.chars().count(),
                raw_preview: raw_preview(raw),
            });
        }

        let replaced = SentinelNormalizer::for_layout(self.layout).normalize(&mut observations);
        debug!("Replaced {} sentinel readings", replaced);

        let observations = TemporalResampler::for_layout(self.layout).apply(observations);

        let writer = CsvWriter::for_layout(self.layout);
        let csv = writer.write_to_string(&observations, &self.location)?;

        info!(
            "Transformed {} {} observations into {} CSV rows",
            parsed_count,
            self.layout.variant,
            observations.len()
        );

        Ok(Export {
            csv,
            row_count: observations.len(),
            parsed_count,
        })
    }
}

/// First characters of a raw payload, for attaching to error reports
pub fn raw_preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::{AWS_MINUTE_LAYOUT, SYNOPTIC_LAYOUT};
    use pretty_assertions::assert_eq;

    const FEED: &str = "\
#START7777
# YYMMDDHHMI STN  WD   WS GST  GST  GST     PA     PS PT    PR    TA    TD    HM
202510220000 108  20  1.6  -9 -9.0   -9 1008.2 1018.9 -9  -9.0  10.0   5.1  61.0
202510220100 108  18  1.2  -9 -9.0   -9 1008.0 1018.7 -9  -9.0  14.0   5.3  -9.0
202510220200 108  18  0.9  -9 -9.0   -9 1007.9 1018.6 -9  -9.0  -9.0   5.0  70.0
#7777END
";

    #[test]
    fn test_synoptic_pipeline() {
        let export = Pipeline::new(&SYNOPTIC_LAYOUT, "서울시").run(FEED).unwrap();

        assert_eq!(export.parsed_count, 3);
        assert_eq!(export.row_count, 9);
        assert_eq!(
            export.csv,
            "id,temperature,humidity,recorded_at,location\n\
             1,10.0,61.0,2025-10-22 00:00:00,서울시\n\
             2,11.0,61.0,2025-10-22 00:15:00,서울시\n\
             3,12.0,61.0,2025-10-22 00:30:00,서울시\n\
             4,13.0,61.0,2025-10-22 00:45:00,서울시\n\
             5,14.0,,2025-10-22 01:00:00,서울시\n\
             6,14.0,,2025-10-22 01:15:00,서울시\n\
             7,14.0,,2025-10-22 01:30:00,서울시\n\
             8,14.0,,2025-10-22 01:45:00,서울시\n\
             9,,70.0,2025-10-22 02:00:00,서울시\n"
        );
    }

    #[test]
    fn test_empty_feed_is_reported() {
        let raw = "#START7777\n# YYMMDDHHMI STN\n#7777END\n";
        let err = Pipeline::new(&SYNOPTIC_LAYOUT, "서울시").run(raw).unwrap_err();

        match err {
            RelayError::EmptyResult {
                raw_length,
                raw_preview,
            } => {
                assert_eq!(raw_length, raw.len());
                assert_eq!(raw_preview, raw);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_raw_preview_is_char_safe() {
        let raw = "기".repeat(600);
        let preview = raw_preview(&raw);
        assert_eq!(preview.chars().count(), 500);
    }

    #[test]
    fn test_aws_pipeline_filters_to_quarter_hours() {
        let mut raw = String::from("# YYMMDDHHMI STN WD1 WS1 WDS WSS WD10 WS10 TA RE RN-15m RN-60m RN-12H RN-DAY HM PA PS TD\n");
        for minute in 10..=20 {
            raw.push_str(&format!(
                "2025102213{:02} 417 250 2.1 260 3.4 255 1.9 14.2 0 -99.0 0.0 0.0 0.5 58.3 1007.1 1016.4 6.0\n",
                minute
            ));
        }

        let export = Pipeline::new(&AWS_MINUTE_LAYOUT, "금천구").run(&raw).unwrap();

        assert_eq!(export.parsed_count, 11);
        assert_eq!(export.row_count, 1);
        let lines: Vec<&str> = export.csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,14.2,58.3,255,1.9,,0.5,1007.1,2025. 10. 22 오후 01:15:00,금천구");
    }
}
