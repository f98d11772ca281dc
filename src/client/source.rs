use async_trait::async_trait;

use crate::error::Result;
use crate::models::RequestWindow;
use crate::readers::{FeedLayout, SYNOPTIC_LAYOUT};
use crate::utils::constants::{DIRECTORY_TM1, DIRECTORY_TM2, STATION_DIRECTORY_ID};

/// Anything that can answer a feed query with raw response text.
///
/// The relay and CLI only depend on this, so tests can swap in canned feeds.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, query: &FeedQuery) -> Result<String>;
}

/// Query parameters for one upstream request, minus the auth key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub endpoint: &'static str,
    pub tm1: String,
    pub tm2: String,
    pub station: String,
    /// `0` for observations, `1` for the metadata/directory listing
    pub help: u8,
    pub extra: &'static [(&'static str, &'static str)],
}

impl FeedQuery {
    pub fn observations(layout: &'static FeedLayout, window: &RequestWindow, station: impl Into<String>) -> Self {
        Self {
            endpoint: layout.endpoint,
            tm1: window.tm1(),
            tm2: window.tm2(),
            station: station.into(),
            help: 0,
            extra: layout.extra_params,
        }
    }

    /// Station listing: station `0` with the verbosity flag set
    pub fn station_directory() -> Self {
        Self {
            endpoint: SYNOPTIC_LAYOUT.endpoint,
            tm1: DIRECTORY_TM1.to_string(),
            tm2: DIRECTORY_TM2.to_string(),
            station: STATION_DIRECTORY_ID.to_string(),
            help: 1,
            extra: &[],
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("tm1", self.tm1.clone()),
            ("tm2", self.tm2.clone()),
            ("stn", self.station.clone()),
            ("help", self.help.to_string()),
        ];
        params.extend(self.extra.iter().map(|(k, v)| (*k, v.to_string())));
        params
    }
}
