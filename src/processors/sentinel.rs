use crate::models::{Observation, Reading};
use crate::readers::FeedLayout;

/// Replaces the feed's "no reading" placeholders with `Reading::Absent`
pub struct SentinelNormalizer {
    sentinels: &'static [&'static str],
}

impl SentinelNormalizer {
    pub fn new(sentinels: &'static [&'static str]) -> Self {
        Self { sentinels }
    }

    pub fn for_layout(layout: &FeedLayout) -> Self {
        Self::new(layout.sentinels)
    }

    fn is_sentinel(&self, raw: &str) -> bool {
        self.sentinels.contains(&raw)
    }

    /// Replace sentinel readings in place; returns how many were replaced
    pub fn normalize(&self, observations: &mut [Observation]) -> usize {
        let mut replaced = 0;
        for observation in observations.iter_mut() {
            for reading in observation.readings.values_mut() {
                if reading.as_str().is_some_and(|raw| self.is_sentinel(raw)) {
                    *reading = Reading::Absent;
                    replaced += 1;
                }
            }
        }
        replaced
    }
}
