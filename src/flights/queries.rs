//! Flight queries: point lookups and criteria-resolution range lookups
//!
//! All parameters are bound, never interpolated. Range lookups implement
//! the per-constraint half of criteria resolution: each returns the set of
//! destination codes satisfying one numeric constraint, and the empty set
//! when nothing qualifies.

use std::collections::BTreeSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::types::DestinationCode;

/// Duration in hours for a specific route; 0.0 when the route is unknown
pub fn flight_duration(conn: &Connection, source: &str, destination: &str) -> Result<f64> {
    let duration: Option<f64> = conn
        .query_row(
            "SELECT Duration FROM FlightDuration
             WHERE Source = ?1 AND Destination = ?2",
            params![source, destination],
            |row| row.get(0),
        )
        .optional()?;

    Ok(duration.unwrap_or(0.0))
}

/// Price in EUR for a route on a trip date; 0.0 when no fare covers the date
pub fn flight_price(
    conn: &Connection,
    source: &str,
    destination: &str,
    trip_date: &str,
) -> Result<f64> {
    let price: Option<f64> = conn
        .query_row(
            "SELECT Price FROM FlightPrice
             WHERE Source = ?1 AND Destination = ?2
               AND StartDate <= ?3 AND EndDate >= ?3",
            params![source, destination, trip_date],
            |row| row.get(0),
        )
        .optional()?;

    Ok(price.unwrap_or(0.0))
}

/// Destinations reachable from `source` within `max_duration` hours
pub fn destinations_within_duration(
    conn: &Connection,
    source: &str,
    max_duration: f64,
) -> Result<BTreeSet<DestinationCode>> {
    let mut stmt = conn.prepare_cached(
        "SELECT Destination FROM FlightDuration
         WHERE Source = ?1 AND Duration <= ?2",
    )?;

    let codes = stmt
        .query_map(params![source, max_duration], |row| row.get(0))?
        .collect::<rusqlite::Result<BTreeSet<String>>>()?;

    Ok(codes)
}

/// Destinations reachable from `source` with any fare at or below `max_price`
pub fn destinations_within_price(
    conn: &Connection,
    source: &str,
    max_price: f64,
) -> Result<BTreeSet<DestinationCode>> {
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT Destination FROM FlightPrice
         WHERE Source = ?1 AND Price <= ?2",
    )?;

    let codes = stmt
        .query_map(params![source, max_price], |row| row.get(0))?
        .collect::<rusqlite::Result<BTreeSet<String>>>()?;

    Ok(codes)
}
