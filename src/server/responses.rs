use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::RelayError;
use crate::models::Observation;
use crate::readers::FeedVariant;

pub const MISSING_PARAMS_MESSAGE: &str = "필수 파라미터가 누락되었습니다.";
pub const MISSING_STATION_MESSAGE: &str = "지점번호가 필요합니다.";
pub const MISSING_KEY_MESSAGE: &str = "서버에 API 키가 설정되지 않았습니다.";
pub const NO_DATA_MESSAGE: &str = "해당 기간의 데이터가 없습니다.";
pub const FETCH_FAILED_MESSAGE: &str = "API 호출 중 오류가 발생했습니다.";
pub const PROBE_FAILED_MESSAGE: &str = "지점 테스트 중 오류가 발생했습니다.";
pub const STATIONS_FAILED_MESSAGE: &str = "지점 목록 조회 중 오류가 발생했습니다.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchWeatherRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub variant: Option<FeedVariant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchWeatherResponse {
    pub success: bool,
    pub data_count: usize,
    pub csv: String,
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct StationProbeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub station_number: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub variant: Option<FeedVariant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProbeResponse {
    pub success: bool,
    pub station_number: String,
    pub data_count: usize,
    pub has_data: bool,
    pub raw_data_length: usize,
    /// First parsed record with its raw, un-normalized values
    pub sample: Option<Observation>,
    pub raw_data_preview: String,
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub success: bool,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyResultDebug {
    pub station: String,
    pub period: String,
    pub raw_data_length: usize,
    pub raw_data_preview: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<EmptyResultDebug>,
}

/// Error payload plus the status it is sent with
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                details: None,
                debug: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn no_data(debug: EmptyResultDebug) -> Self {
        let mut api_error = Self::new(StatusCode::NOT_FOUND, NO_DATA_MESSAGE);
        api_error.body.debug = Some(debug);
        api_error
    }

    /// Map a relay failure, using `context` as the headline for server-side failures
    pub fn from_relay(err: RelayError, context: &str) -> Self {
        match err {
            RelayError::MissingApiKey => {
                error!("Rejecting request: KMA API key is not configured");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_MESSAGE)
            }
            RelayError::EmptyResult { .. } => Self::new(StatusCode::NOT_FOUND, NO_DATA_MESSAGE),
            err if err.is_client_error() => {
                warn!("Rejecting request: {}", err);
                Self::bad_request(err.to_string())
            }
            err => {
                error!("{}: {}", context, err);
                let mut api_error = Self::new(StatusCode::INTERNAL_SERVER_ERROR, context);
                api_error.body.details = Some(err.to_string());
                api_error
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
