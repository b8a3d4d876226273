// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewAbsence;
use crate::diesel_schema::absences;
use crate::error::PersistenceError;
use crate::mutations::INSERT_BATCH_SIZE;

backend_fn! {
/// Bulk inserts absence rows.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `records` - The absences to insert
///
/// # Returns
///
/// The number of rows inserted.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn bulk_insert_absences(
    conn: &mut _,
    records: &[NewAbsence],
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for batch in records.chunks(INSERT_BATCH_SIZE) {
        inserted += diesel::insert_into(absences::table)
            .values(batch)
            .execute(conn)?;
    }

    debug!(count = inserted, "Bulk inserted absences");
    Ok(inserted)
}
}
