use crate::{
    error::AppError,
    mapper::{self, PrecipitationRecord, StationRecord, TemperatureRecord, TobsRecord},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use core_types::parse_iso_date;
use serde::Deserialize;
use std::sync::Arc;

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Climate API</title></head>
<body>
<h1>Climate API</h1>
<p>Daily weather observations for a network of stations, served as JSON.</p>
<h2>Base route</h2>
<p><code>/api/v1.0/</code></p>
<h2>Available routes</h2>
<ul>
<li><code>/api/v1.0/precipitation</code>: every date with its precipitation reading.</li>
<li><code>/api/v1.0/stations</code>: every station with its name, latitude, longitude and elevation.</li>
<li><code>/api/v1.0/tobs</code>: temperature observations (TOBS) of the most active station over its last year of data.</li>
<li><code>/api/v1.0/&lt;start&gt;</code> and <code>/api/v1.0/&lt;start&gt;/&lt;end&gt;</code>: minimum, average and maximum temperature from the start date through the end date (inclusive), or through the latest recorded date when no end is given. Dates must be formatted as <code>YYYY-MM-DD</code>.</li>
</ul>
</body>
</html>
"#;

/// Path segments of the temperature range routes. `end` is absent on
/// `/api/v1.0/:start`.
#[derive(Debug, Deserialize)]
pub struct DateRangePath {
    pub start: String,
    pub end: Option<String>,
}

/// # GET /
/// Lists the available routes.
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// # GET /api/v1.0/precipitation
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, AppError> {
    let rows = state.db_repo.all_precipitation().await?;
    tracing::debug!(rows = rows.len(), "Serving precipitation.");
    Ok(Json(mapper::to_records(rows)))
}

/// # GET /api/v1.0/stations
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>, AppError> {
    let stations = state.db_repo.all_stations().await?;
    tracing::debug!(rows = stations.len(), "Serving stations.");
    Ok(Json(mapper::to_records(stations)))
}

/// # GET /api/v1.0/tobs
/// Trailing-year temperature observations of the station with the most measurements.
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TobsRecord>>, AppError> {
    let recent = state.db_repo.recent_tobs_for_most_active_station().await?;
    Ok(Json(mapper::to_records(recent.observations)))
}

/// # GET /api/v1.0/:start
/// # GET /api/v1.0/:start/:end
pub async fn temperature_stats(
    Path(path): Path<DateRangePath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureRecord>>, AppError> {
    let start = parse_iso_date(&path.start)?;
    let end = path.end.as_deref().map(parse_iso_date).transpose()?;

    let stats = state.db_repo.temperature_stats(start, end).await?;
    tracing::debug!(%start, ?end, ?stats, "Serving temperature stats.");
    Ok(Json(mapper::temperature_records(stats)))
}
