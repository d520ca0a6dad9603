use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Establishes a connection pool to the climate SQLite database.
///
/// The database file is opened read-only and must already exist; this service
/// never creates or modifies the dataset. Each request borrows a connection
/// from the pool for the duration of its queries.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("{}: {e}", settings.url)))?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect_with(options)
        .await?;

    tracing::info!(url = %settings.url, max_connections = settings.max_connections, "Connected to the climate database.");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> DatabaseSettings {
        DatabaseSettings { url: url.to_string(), ..DatabaseSettings::default() }
    }

    #[tokio::test]
    async fn rejects_a_malformed_url() {
        let result = connect(&settings("sqlite://hawaii.sqlite?mode=bogus")).await;
        assert!(matches!(result, Err(DbError::ConnectionConfigError(_))));
    }

    #[tokio::test]
    async fn never_creates_a_missing_database() {
        let result = connect(&settings("sqlite:///nonexistent-directory/hawaii.sqlite")).await;
        assert!(matches!(result, Err(DbError::QueryError(_))));
    }
}
