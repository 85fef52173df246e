// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ship mutations.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, SqliteConnection};
use harbour_domain::{Ship, ShipId};
use tracing::{debug, info};

use crate::data_models::{DeletedShip, NewShipRow, SeedOutcome};
use crate::diesel_schema::{invoices, ships};
use crate::error::PersistenceError;
use crate::queries::ships::ship_exists;

/// Inserts a new ship.
///
/// # Errors
///
/// Returns `PersistenceError::ShipAlreadyExists` if the ID is taken.
pub fn insert_ship(conn: &mut SqliteConnection, ship: &Ship) -> Result<(), PersistenceError> {
    let ship_id: &ShipId = ship.ship_id();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if ship_exists(conn, ship_id)? {
            return Err(PersistenceError::ShipAlreadyExists(
                ship_id.value().to_string(),
            ));
        }

        diesel::insert_into(ships::table)
            .values(NewShipRow::from(ship))
            .execute(conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    PersistenceError::ShipAlreadyExists(ship_id.value().to_string())
                }
                other => PersistenceError::from(other),
            })?;
        Ok(())
    })?;

    info!(ship_id = %ship_id, name = ship.name(), "Ship scheduled");
    Ok(())
}

/// Inserts each ship whose ID is not already present.
///
/// Existing ships are left untouched, so running this twice is harmless.
///
/// # Errors
///
/// Returns an error if any insert fails for a reason other than a
/// duplicate ID. No ships are written in that case.
pub fn insert_ships_if_absent(
    conn: &mut SqliteConnection,
    fleet: &[Ship],
) -> Result<SeedOutcome, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut outcome: SeedOutcome = SeedOutcome::default();
        for ship in fleet {
            let written: usize = diesel::insert_or_ignore_into(ships::table)
                .values(NewShipRow::from(ship))
                .execute(conn)?;
            if written == 0 {
                debug!(ship_id = %ship.ship_id(), "Ship already present, skipping");
                outcome.skipped += 1;
            } else {
                outcome.inserted += written;
            }
        }
        Ok(outcome)
    })
}

/// Deletes a ship and all of its invoices.
///
/// Deleting an unknown ID is not an error; the returned counts are zero.
///
/// # Errors
///
/// Returns an error if the transaction fails. Nothing is deleted in that
/// case.
pub fn delete_ship(
    conn: &mut SqliteConnection,
    ship_id: &ShipId,
) -> Result<DeletedShip, PersistenceError> {
    let deleted: DeletedShip = conn.transaction::<_, PersistenceError, _>(|conn| {
        // Explicit so the count is reportable; the FK cascade would also do it
        let invoices_deleted: usize =
            diesel::delete(invoices::table.filter(invoices::ship_id.eq(ship_id.value())))
                .execute(conn)?;
        let ships_deleted: usize =
            diesel::delete(ships::table.filter(ships::ship_id.eq(ship_id.value())))
                .execute(conn)?;
        Ok(DeletedShip {
            ships_deleted,
            invoices_deleted,
        })
    })?;

    info!(
        ship_id = %ship_id,
        ships_deleted = deleted.ships_deleted,
        invoices_deleted = deleted.invoices_deleted,
        "Ship deleted"
    );
    Ok(deleted)
}
