// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewEmployeeWorkLocation;
use crate::diesel_schema::employee_work_locations;
use crate::error::PersistenceError;
use crate::mutations::INSERT_BATCH_SIZE;

backend_fn! {
/// Bulk inserts employee/work-location pairs.
///
/// Pairs that already exist are skipped without error.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `records` - The pairs to insert
///
/// # Returns
///
/// The number of rows actually inserted.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn bulk_insert_employee_work_locations(
    conn: &mut _,
    records: &[NewEmployeeWorkLocation],
) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for batch in records.chunks(INSERT_BATCH_SIZE) {
        inserted += diesel::insert_or_ignore_into(employee_work_locations::table)
            .values(batch)
            .execute(conn)?;
    }

    debug!(
        attempted = records.len(),
        inserted, "Bulk inserted employee work locations"
    );
    Ok(inserted)
}
}
