// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ship queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use harbour_domain::{Ship, ShipId, Timestamp};

use crate::data_models::{ShipOption, ShipRow};
use crate::diesel_schema::ships;
use crate::error::PersistenceError;

/// Lists every ship ordered by arrival.
///
/// Ships with identical arrival times are ordered by ID so the listing is
/// stable.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_ships(conn: &mut SqliteConnection) -> Result<Vec<Ship>, PersistenceError> {
    ships::table
        .select(ShipRow::as_select())
        .order((ships::arrival.asc(), ships::ship_id.asc()))
        .load::<ShipRow>(conn)?
        .into_iter()
        .map(ShipRow::into_domain)
        .collect()
}

/// Looks up a single ship.
///
/// # Errors
///
/// Returns `PersistenceError::ShipNotFound` if no such ship exists.
pub fn get_ship(conn: &mut SqliteConnection, ship_id: &ShipId) -> Result<Ship, PersistenceError> {
    let row: Option<ShipRow> = ships::table
        .select(ShipRow::as_select())
        .filter(ships::ship_id.eq(ship_id.value()))
        .first::<ShipRow>(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::ShipNotFound(ship_id.value().to_string()))?
        .into_domain()
}

/// Returns whether a ship with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn ship_exists(
    conn: &mut SqliteConnection,
    ship_id: &ShipId,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        ships::table.filter(ships::ship_id.eq(ship_id.value())),
    ))
    .get_result::<bool>(conn)?)
}

/// Counts all ships.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_ships(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = ships::table.count().get_result(conn)?;
    usize::try_from(count)
        .map_err(|_| PersistenceError::QueryFailed(format!("Invalid ship count: {count}")))
}

/// Ships arriving at or after `now`, soonest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn upcoming_arrivals(
    conn: &mut SqliteConnection,
    now: Timestamp,
    limit: i64,
) -> Result<Vec<Ship>, PersistenceError> {
    // Canonical text timestamps sort chronologically
    ships::table
        .select(ShipRow::as_select())
        .filter(ships::arrival.ge(now.canonical()))
        .order((ships::arrival.asc(), ships::ship_id.asc()))
        .limit(limit)
        .load::<ShipRow>(conn)?
        .into_iter()
        .map(ShipRow::into_domain)
        .collect()
}

/// `(ship_id, name)` pairs ordered by name, for the invoice form.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_ship_options(conn: &mut SqliteConnection) -> Result<Vec<ShipOption>, PersistenceError> {
    Ok(ships::table
        .select((ships::ship_id, ships::name))
        .order((ships::name.asc(), ships::ship_id.asc()))
        .load::<ShipOption>(conn)?)
}
