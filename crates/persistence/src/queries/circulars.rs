// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use harbour_domain::Circular;

use crate::data_models::CircularRow;
use crate::diesel_schema::circulars;
use crate::error::PersistenceError;

/// Lists all circulars, most recently uploaded first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_circulars(conn: &mut SqliteConnection) -> Result<Vec<Circular>, PersistenceError> {
    circulars::table
        .select(CircularRow::as_select())
        .order((circulars::uploaded_at.desc(), circulars::id.desc()))
        .load::<CircularRow>(conn)?
        .into_iter()
        .map(CircularRow::into_domain)
        .collect()
}
