use axum::extract::State;
use axum::Json;
use tracing::info;
use validator::Validate;

use crate::client::FeedQuery;
use crate::error::RelayError;
use crate::models::RequestWindow;
use crate::processors::{raw_preview, Pipeline};
use crate::readers::FeedReader;
use crate::server::responses::*;
use crate::server::AppState;
use crate::utils::constants::{PROBE_DEFAULT_TM1, PROBE_DEFAULT_TM2};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `POST /api/fetch-weather`: fetch one window from the default station and return CSV
pub async fn fetch_weather(
    State(state): State<AppState>,
    Json(request): Json<FetchWeatherRequest>,
) -> Result<Json<FetchWeatherResponse>, ApiError> {
    let (Some(start), Some(end)) = (non_blank(request.start_date), non_blank(request.end_date)) else {
        return Err(ApiError::bad_request(MISSING_PARAMS_MESSAGE));
    };

    let window = RequestWindow::from_wire(start.trim(), end.trim())
        .map_err(|e| ApiError::from_relay(e, FETCH_FAILED_MESSAGE))?;
    let source = state
        .source()
        .map_err(|e| ApiError::from_relay(e, FETCH_FAILED_MESSAGE))?;

    let layout = request.variant.unwrap_or_default().layout();
    info!(
        "fetch-weather: variant={} stn={} period={}",
        layout.variant,
        layout.default_station,
        window.period_label()
    );

    let query = FeedQuery::observations(layout, &window, layout.default_station);
    let raw = source
        .fetch(&query)
        .await
        .map_err(|e| ApiError::from_relay(e, FETCH_FAILED_MESSAGE))?;

    match Pipeline::new(layout, state.config.location_label.clone()).run(&raw) {
        Ok(export) => Ok(Json(FetchWeatherResponse {
            success: true,
            data_count: export.row_count,
            csv: export.csv,
        })),
        Err(RelayError::EmptyResult {
            raw_length,
            raw_preview,
        }) => {
            info!("fetch-weather: no observations for {}", window.period_label());
            Err(ApiError::no_data(EmptyResultDebug {
                station: layout.default_station.to_string(),
                period: window.period_label(),
                raw_data_length: raw_length,
                raw_data_preview: raw_preview,
            }))
        }
        Err(e) => Err(ApiError::from_relay(e, FETCH_FAILED_MESSAGE)),
    }
}

/// `POST /api/test-station`: parse one station's feed and report a sample
pub async fn test_station(
    State(state): State<AppState>,
    Json(request): Json<StationProbeRequest>,
) -> Result<Json<StationProbeResponse>, ApiError> {
    let station = request.station_number.trim().to_string();
    if station.is_empty() || request.validate().is_err() {
        return Err(ApiError::bad_request(MISSING_STATION_MESSAGE));
    }

    let tm1 = non_blank(request.start_date).unwrap_or_else(|| PROBE_DEFAULT_TM1.to_string());
    let tm2 = non_blank(request.end_date).unwrap_or_else(|| PROBE_DEFAULT_TM2.to_string());
    let window = RequestWindow::from_wire(tm1.trim(), tm2.trim())
        .map_err(|e| ApiError::from_relay(e, PROBE_FAILED_MESSAGE))?;
    let source = state
        .source()
        .map_err(|e| ApiError::from_relay(e, PROBE_FAILED_MESSAGE))?;

    let layout = request.variant.unwrap_or_default().layout();
    info!("test-station: stn={} period={}", station, window.period_label());

    let raw = source
        .fetch(&FeedQuery::observations(layout, &window, station.clone()))
        .await
        .map_err(|e| ApiError::from_relay(e, PROBE_FAILED_MESSAGE))?;

    let observations = FeedReader::new(layout).parse(&raw);
    info!("test-station: stn={} parsed {} observations", station, observations.len());

    Ok(Json(StationProbeResponse {
        success: true,
        station_number: station,
        data_count: observations.len(),
        has_data: !observations.is_empty(),
        raw_data_length: raw.chars().count(),
        sample: observations.into_iter().next(),
        raw_data_preview: raw_preview(&raw),
    }))
}

/// `GET /api/stations`: raw station directory text
pub async fn stations(State(state): State<AppState>) -> Result<Json<StationsResponse>, ApiError> {
    let source = state
        .source()
        .map_err(|e| ApiError::from_relay(e, STATIONS_FAILED_MESSAGE))?;

    info!("stations: requesting station directory");
    let data = source
        .fetch(&FeedQuery::station_directory())
        .await
        .map_err(|e| ApiError::from_relay(e, STATIONS_FAILED_MESSAGE))?;

    Ok(Json(StationsResponse { success: true, data }))
}
