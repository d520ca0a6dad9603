use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date '{0}': dates must be formatted as YYYY-MM-DD")]
    InvalidDate(String),
}
