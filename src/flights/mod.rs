//! Flight database: the structured store for route durations and fares
//!
//! Handles SQLite connection management, schema migrations, and the
//! point/range lookups behind flight tools and criteria resolution.

mod migrations;
pub mod queries;
mod store;

pub use store::{FlightStore, FlightStoreConfig};
