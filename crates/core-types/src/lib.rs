//! # Climate Core Types
//!
//! The record shapes shared by every other crate in the workspace. The two
//! tables of the climate dataset are declared here statically, together with
//! the projections the query layer returns and the date helpers used to
//! validate `YYYY-MM-DD` input.

pub mod date;
pub mod error;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use date::{format_iso_date, one_year_before, parse_iso_date, DATE_FORMAT};
pub use error::CoreError;
pub use records::{
    Measurement, PrecipitationRow, Station, StationActivity, TableShape, TemperatureStats, TobsRow,
};
