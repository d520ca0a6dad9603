use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Describes a table this service reads from: its name and the columns the
/// record type expects to find in it.
///
/// The database crate checks every shape against the live schema before the
/// server starts accepting requests.
pub trait TableShape {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
}

/// A single daily observation from the `measurement` table.
///
/// The API only ever reads projections of it ([`PrecipitationRow`],
/// [`TobsRow`]); the full shape is what the startup check verifies.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Identifier of the reporting station (references `station.station`).
    pub station: String,
    /// Observation date as stored, `YYYY-MM-DD`.
    pub date: String,
    /// Precipitation. Missing readings are stored as NULL.
    pub prcp: Option<f64>,
    /// Temperature observation.
    pub tobs: Option<f64>,
}

impl TableShape for Measurement {
    const TABLE: &'static str = "measurement";
    const COLUMNS: &'static [&'static str] = &["station", "date", "prcp", "tobs"];
}

/// A weather station from the `station` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl TableShape for Station {
    const TABLE: &'static str = "station";
    const COLUMNS: &'static [&'static str] = &["station", "name", "latitude", "longitude", "elevation"];
}

/// The `(date, prcp)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// The `(date, tobs)` projection of a measurement.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TobsRow {
    pub date: String,
    pub tobs: Option<f64>,
}

/// A station together with how many measurement rows it has reported.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// Minimum, mean and maximum temperature over a set of measurements.
///
/// Every field is `None` when the set is empty; they are never defaulted to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// `true` when no measurement contributed to the aggregates.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_name_the_dataset_tables() {
        assert_eq!(Measurement::TABLE, "measurement");
        assert_eq!(Station::TABLE, "station");
        assert!(Measurement::COLUMNS.contains(&"tobs"));
        assert_eq!(Station::COLUMNS.len(), 5);
    }

    #[test]
    fn empty_stats_stay_null() {
        let stats = TemperatureStats::default();
        assert!(stats.is_empty());

        let stats = TemperatureStats { min: Some(70.0), avg: Some(75.0), max: Some(80.0) };
        assert!(!stats.is_empty());
    }

    #[test]
    fn station_serializes_all_fields() {
        let station = Station {
            station: "USC00519281".into(),
            name: "WAIHEE 837.5, HI US".into(),
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        };
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(json["station"], "USC00519281");
        assert_eq!(json["elevation"], 32.9);
    }
}
