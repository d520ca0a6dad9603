use crate::error::DbError;
use core_types::{Measurement, Station, TableShape};
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use std::fmt;

/// What the startup check found for a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: &'static str,
    /// Every column present in the live table, in declaration order.
    pub columns: Vec<String>,
    pub rows: i64,
}

/// The outcome of [`verify_schema`], one entry per table the service reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub tables: Vec<TableReport>,
}

impl SchemaReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            writeln!(f, "{} ({} rows): {}", table.table, table.rows, table.columns.join(", "))?;
        }
        Ok(())
    }
}

/// Checks that the `measurement` and `station` tables exist and carry every
/// column the record types in `core-types` expect.
///
/// Extra columns are fine. This runs once at startup; any error here means the
/// server must not start.
pub async fn verify_schema(pool: &SqlitePool) -> Result<SchemaReport, DbError> {
    let mut conn = pool.acquire().await?;
    let tables = vec![
        verify_table::<Measurement>(&mut conn).await?,
        verify_table::<Station>(&mut conn).await?,
    ];
    Ok(SchemaReport { tables })
}

async fn verify_table<T: TableShape>(conn: &mut SqliteConnection) -> Result<TableReport, DbError> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(T::TABLE)
        .fetch_all(&mut *conn)
        .await?;

    if columns.is_empty() {
        return Err(DbError::MissingTable(T::TABLE.to_string()));
    }

    let missing: Vec<String> = T::COLUMNS
        .iter()
        .filter(|expected| !columns.iter().any(|c| c.eq_ignore_ascii_case(expected)))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DbError::MissingColumns { table: T::TABLE.to_string(), columns: missing });
    }

    // TABLE is a compile-time constant, never user input.
    let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", T::TABLE))
        .fetch_one(&mut *conn)
        .await?;

    tracing::debug!(table = T::TABLE, rows, "Verified table schema.");
    Ok(TableReport { table: T::TABLE, columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn accepts_the_climate_schema() {
        let pool = fixtures::seeded_pool().await.unwrap();
        let report = verify_schema(&pool).await.unwrap();

        let measurement = report.table("measurement").unwrap();
        assert_eq!(measurement.rows, 8);
        assert!(measurement.columns.iter().any(|c| c == "id"));
        assert_eq!(report.table("station").unwrap().rows, 3);
        assert!(report.to_string().contains("station (3 rows)"));
    }

    #[tokio::test]
    async fn rejects_a_missing_table() {
        let pool = fixtures::memory_pool().await.unwrap();
        sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)")
            .execute(&pool)
            .await
            .unwrap();

        match verify_schema(&pool).await {
            Err(DbError::MissingTable(table)) => assert_eq!(table, "station"),
            other => panic!("expected a missing table error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn names_every_missing_column() {
        let pool = fixtures::memory_pool().await.unwrap();
        sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT)")
            .execute(&pool)
            .await
            .unwrap();

        match verify_schema(&pool).await {
            Err(DbError::MissingColumns { table, columns }) => {
                assert_eq!(table, "measurement");
                assert_eq!(columns, vec!["prcp".to_string(), "tobs".to_string()]);
            }
            other => panic!("expected a missing columns error, got {other:?}"),
        }
    }
}
