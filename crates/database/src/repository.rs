use crate::DbError;
use chrono::NaiveDate;
use core_types::{
    format_iso_date, one_year_before, parse_iso_date, PrecipitationRow, Station, StationActivity,
    TemperatureStats, TobsRow,
};
use sqlx::sqlite::{SqliteConnection, SqlitePool};

/// The `ClimateRepository` provides the fixed set of read-only queries the API
/// serves. It encapsulates all SQL and data access logic.
///
/// Every public method borrows one pooled connection for its whole duration.
/// The connection goes back to the pool when the guard drops, including when a
/// query fails part-way.
#[derive(Debug, Clone)]
pub struct ClimateRepository {
    pool: SqlitePool,
}

/// Temperature observations for the most active station over its trailing year.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveStationTobs {
    pub station: StationActivity,
    /// The station's own latest observation date.
    pub latest: NaiveDate,
    /// Inclusive lower bound, 365 days before `latest`.
    pub since: NaiveDate,
    pub observations: Vec<TobsRow>,
}

impl ClimateRepository {
    /// Creates a new `ClimateRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches the date and precipitation of every measurement, in storage order.
    pub async fn all_precipitation(&self) -> Result<Vec<PrecipitationRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, PrecipitationRow>("SELECT date, prcp FROM measurement")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    /// Fetches every station with its location metadata.
    pub async fn all_stations(&self) -> Result<Vec<Station>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(stations)
    }

    /// The station with the most measurement rows.
    ///
    /// Ties go to the lexicographically smallest station id. Returns `None`
    /// when the measurement table is empty.
    pub async fn most_active_station(&self) -> Result<Option<StationActivity>, DbError> {
        let mut conn = self.pool.acquire().await?;
        most_active_station(&mut conn).await
    }

    /// The latest observation date recorded by `station`.
    pub async fn latest_date_for_station(&self, station: &str) -> Result<Option<NaiveDate>, DbError> {
        let mut conn = self.pool.acquire().await?;
        latest_date_for_station(&mut conn, station).await
    }

    /// The latest observation date across all stations.
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>, DbError> {
        let mut conn = self.pool.acquire().await?;
        latest_date(&mut conn).await
    }

    /// Temperature observations of the most active station for the 365 days
    /// leading up to (and including) that station's latest date.
    ///
    /// Fails with [`DbError::NoMeasurements`] when there is no data at all.
    pub async fn recent_tobs_for_most_active_station(&self) -> Result<ActiveStationTobs, DbError> {
        let mut conn = self.pool.acquire().await?;

        let station = most_active_station(&mut conn).await?.ok_or(DbError::NoMeasurements)?;
        let latest = latest_date_for_station(&mut conn, &station.station)
            .await?
            .ok_or(DbError::NoMeasurements)?;
        let since = one_year_before(latest);

        let observations = sqlx::query_as::<_, TobsRow>(
            "SELECT date, tobs FROM measurement WHERE station = ?1 AND date >= ?2",
        )
        .bind(&station.station)
        .bind(format_iso_date(since))
        .fetch_all(&mut *conn)
        .await?;

        tracing::debug!(
            station = %station.station,
            %latest,
            %since,
            rows = observations.len(),
            "Fetched trailing-year observations for the most active station."
        );
        Ok(ActiveStationTobs { station, latest, since, observations })
    }

    /// Minimum, average and maximum `tobs` over measurements dated within
    /// `[start, end]`, both inclusive.
    ///
    /// Without an `end` the range runs to the latest date in the whole table,
    /// not the latest date of any particular station. An empty range yields
    /// all-`None` stats.
    pub async fn temperature_stats(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureStats, DbError> {
        let mut conn = self.pool.acquire().await?;

        let end = match end {
            Some(end) => end,
            None => match latest_date(&mut conn).await? {
                Some(latest) => latest,
                None => return Ok(TemperatureStats::default()),
            },
        };

        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"
            SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
            FROM measurement
            WHERE date >= ?1 AND date <= ?2
            "#,
        )
        .bind(format_iso_date(start))
        .bind(format_iso_date(end))
        .fetch_one(&mut *conn)
        .await?;

        Ok(stats)
    }
}

async fn most_active_station(conn: &mut SqliteConnection) -> Result<Option<StationActivity>, DbError> {
    let station = sqlx::query_as::<_, StationActivity>(
        r#"
        SELECT station, COUNT(*) AS observations
        FROM measurement
        GROUP BY station
        ORDER BY observations DESC, station ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(&mut *conn)
    .await?;
    Ok(station)
}

async fn latest_date_for_station(
    conn: &mut SqliteConnection,
    station: &str,
) -> Result<Option<NaiveDate>, DbError> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement WHERE station = ?1")
        .bind(station)
        .fetch_one(&mut *conn)
        .await?;
    latest.as_deref().map(parse_stored_date).transpose()
}

async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<NaiveDate>, DbError> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    latest.as_deref().map(parse_stored_date).transpose()
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate, DbError> {
    parse_iso_date(raw).map_err(|_| DbError::InvalidStoredDate(raw.to_string()))
}
