//! A small in-memory copy of the climate dataset for tests.
//!
//! Three stations: [`BUSY`] reports five measurements spread over more than a
//! year, [`SPARSE`] reports three consecutive days in August 2017 and
//! [`QUIET`] has no measurements at all.

use core_types::Station;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub const BUSY: &str = "USC00519281";
pub const SPARSE: &str = "USC00519397";
pub const QUIET: &str = "USC00513117";

/// An empty in-memory database.
///
/// The pool holds exactly one connection that never expires, since every new
/// connection to `sqlite::memory:` would open a different, empty database.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Creates both tables the way the published dataset lays them out,
/// including the surrogate `id` keys the service ignores.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE measurement (
            id INTEGER NOT NULL PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE station (
            id INTEGER NOT NULL PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_station(pool: &SqlitePool, station: &Station) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(&station.station)
        .bind(&station.name)
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.elevation)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await?;
    Ok(())
}

/// An in-memory database holding the three fixture stations and eight measurements.
pub async fn seeded_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = memory_pool().await?;
    create_schema(&pool).await?;

    let stations = [
        (BUSY, "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
        (SPARSE, "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
        (QUIET, "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
    ];
    for (id, name, latitude, longitude, elevation) in stations {
        let station = Station { station: id.to_string(), name: name.to_string(), latitude, longitude, elevation };
        insert_station(&pool, &station).await?;
    }

    let measurements = [
        (BUSY, "2016-08-22", Some(0.5), 71.0),
        (BUSY, "2016-08-23", Some(1.79), 72.0),
        (BUSY, "2017-01-01", Some(0.03), 65.0),
        (BUSY, "2017-08-22", None, 78.0),
        (BUSY, "2017-08-23", Some(0.0), 80.0),
        (SPARSE, "2017-08-01", Some(0.0), 70.0),
        (SPARSE, "2017-08-02", None, 75.0),
        (SPARSE, "2017-08-03", Some(0.02), 80.0),
    ];
    for (station, date, prcp, tobs) in measurements {
        insert_measurement(&pool, station, date, prcp, Some(tobs)).await?;
    }

    Ok(pool)
}
