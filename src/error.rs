use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Date range of {days} days exceeds the {max}-day limit")]
    RangeTooLarge { days: i64, max: i64 },

    #[error("Upstream feed unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("No observations for the requested period")]
    EmptyResult {
        raw_length: usize,
        raw_preview: String,
    },

    #[error("KMA API key is not configured on the server")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),
}

impl RelayError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// True for failures caused by the caller's input rather than the server or feed
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::InvalidRange(_)
                | RelayError::RangeTooLarge { .. }
                | RelayError::Validation(_)
                | RelayError::DateParse(_)
        )
    }
}

impl From<config::ConfigError> for RelayError {
    fn from(error: config::ConfigError) -> Self {
        RelayError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the auth key
        RelayError::UpstreamUnavailable {
            message: error.without_url().to_string(),
        }
    }
}
