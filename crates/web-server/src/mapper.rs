//! Reshapes query rows into the JSON records each endpoint returns.
//!
//! Values pass through untouched: dates stay `YYYY-MM-DD` text, floats keep
//! their stored precision and NULLs serialize as `null`.

use core_types::{PrecipitationRow, Station, TemperatureStats, TobsRow};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationRecord {
    pub date: String,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsRecord {
    pub date: String,
    pub tobs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRecord {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl From<PrecipitationRow> for PrecipitationRecord {
    fn from(row: PrecipitationRow) -> Self {
        Self { date: row.date, precipitation: row.prcp }
    }
}

impl From<Station> for StationRecord {
    fn from(station: Station) -> Self {
        Self {
            station: station.station,
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
        }
    }
}

impl From<TobsRow> for TobsRecord {
    fn from(row: TobsRow) -> Self {
        Self { date: row.date, tobs: row.tobs }
    }
}

impl From<TemperatureStats> for TemperatureRecord {
    fn from(stats: TemperatureStats) -> Self {
        Self { tmin: stats.min, tavg: stats.avg, tmax: stats.max }
    }
}

/// Maps every row in order.
pub fn to_records<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

/// The temperature endpoints answer with a one-element list.
pub fn temperature_records(stats: TemperatureStats) -> Vec<TemperatureRecord> {
    vec![stats.into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn precipitation_keeps_order_and_nulls() {
        let rows = vec![
            PrecipitationRow { date: "2017-08-02".into(), prcp: None },
            PrecipitationRow { date: "2017-08-01".into(), prcp: Some(0.08) },
        ];
        let records: Vec<PrecipitationRecord> = to_records(rows);

        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([
                { "date": "2017-08-02", "precipitation": null },
                { "date": "2017-08-01", "precipitation": 0.08 },
            ])
        );
    }

    #[test]
    fn empty_stats_serialize_as_nulls() {
        let records = temperature_records(TemperatureStats::default());
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([{ "tmin": null, "tavg": null, "tmax": null }])
        );
    }

    #[test]
    fn stats_map_to_t_prefixed_keys() {
        let stats = TemperatureStats { min: Some(58.0), avg: Some(74.59), max: Some(87.0) };
        let records = temperature_records(stats);
        assert_eq!(records, vec![TemperatureRecord { tmin: Some(58.0), tavg: Some(74.59), tmax: Some(87.0) }]);
    }
}
