//! Risk Dashboard Seeder
//!
//! Creates the events and analytics databases with the schema the
//! ingestion pipeline produces, filled with sample data. Used for local
//! development and as fixtures in tests.

pub mod config;
pub mod seed;

pub use seed::{seed_analytics_database, seed_events_database};
