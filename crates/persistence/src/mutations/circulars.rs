// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use harbour_domain::Timestamp;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewCircularRow;
use crate::diesel_schema::circulars;
use crate::error::PersistenceError;

/// Records a circular, returning its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_circular(
    conn: &mut SqliteConnection,
    title: &str,
    filename: Option<&str>,
    uploaded_at: Timestamp,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(circulars::table)
        .values(NewCircularRow {
            title: title.to_string(),
            filename: filename.map(str::to_string),
            uploaded_at: uploaded_at.canonical(),
        })
        .execute(conn)?;

    let circular_id: i64 = get_last_insert_rowid(conn)?;
    info!(circular_id, title, has_file = filename.is_some(), "Circular recorded");
    Ok(circular_id)
}
