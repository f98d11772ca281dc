/// Wire timestamp format used by the upstream feed and its query parameters
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Column-name token that marks the header line of a feed response
pub const HEADER_MARKER: &str = "YYMMDDHHMI";

/// Upstream API
pub const DEFAULT_BASE_URL: &str = "https://apihub.kma.go.kr/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const STATION_DIRECTORY_ID: &str = "0";

/// Fixed window used for station directory requests; the feed ignores it
/// when `help=1` but still requires both bounds.
pub const DIRECTORY_TM1: &str = "202510220000";
pub const DIRECTORY_TM2: &str = "202510220100";

/// Fallback window for ad-hoc station probes
pub const PROBE_DEFAULT_TM1: &str = "202510220000";
pub const PROBE_DEFAULT_TM2: &str = "202510232359";

/// Range policy
pub const MAX_RANGE_DAYS: i64 = 21;

/// Output defaults
pub const DEFAULT_LOCATION_LABEL: &str = "서울시";
pub const DEFAULT_PORT: u16 = 3000;
pub const RAW_PREVIEW_CHARS: usize = 500;

/// Morning/afternoon markers for the 12-hour Korean timestamp style
pub const AM_LABEL: &str = "오전";
pub const PM_LABEL: &str = "오후";
