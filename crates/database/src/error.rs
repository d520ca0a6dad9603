use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection string: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Table '{0}' does not exist in the database.")]
    MissingTable(String),

    #[error("Table '{table}' is missing expected columns: {}", .columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("The measurement table is empty; no most active station can be determined.")]
    NoMeasurements,

    #[error("Stored date '{0}' is not formatted as YYYY-MM-DD.")]
    InvalidStoredDate(String),
}
