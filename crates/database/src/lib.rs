//! # Climate Database Crate
//!
//! This crate is the only place that talks to the climate dataset. It is
//! strictly read-only: nothing here creates, updates or deletes rows.
//!
//! ## Public API
//!
//! - `connect`: opens the read-only SQLite connection pool.
//! - `verify_schema`: the startup check that both tables carry the expected columns.
//! - `ClimateRepository`: the fixed set of queries the HTTP API serves.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{ActiveStationTobs, ClimateRepository};
pub use schema::{verify_schema, SchemaReport, TableReport};
