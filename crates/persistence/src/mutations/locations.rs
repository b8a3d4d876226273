// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::NewWorkLocation;
use crate::diesel_schema::work_locations;
use crate::error::PersistenceError;
use crate::mutations::LocationKey;

backend_fn! {
/// Inserts a work location unless one with the same name exists.
///
/// An existing row is left untouched, including its address.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `location` - The work location to insert
///
/// # Returns
///
/// The key of the row holding `location.name`.
///
/// # Errors
///
/// Returns an error if the insert or the key lookup fails.
pub fn upsert_work_location(
    conn: &mut _,
    location: &NewWorkLocation,
) -> Result<LocationKey, PersistenceError> {
    let inserted: usize = diesel::insert_or_ignore_into(work_locations::table)
        .values(location)
        .execute(conn)?;

    let work_location_id: i64 = work_locations::table
        .filter(work_locations::name.eq(&location.name))
        .select(work_locations::work_location_id)
        .first::<i64>(conn)?;

    debug!(
        work_location_id,
        created = inserted > 0,
        "Resolved work location {}",
        location.name
    );

    Ok(LocationKey {
        work_location_id,
        created: inserted > 0,
    })
}
}
