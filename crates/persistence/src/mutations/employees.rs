// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployee, NewLeftOrganisation};
use crate::diesel_schema::{employees, left_organisation};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee` - The employee to insert
///
/// # Returns
///
/// The generated `employee_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employee(conn: &mut _, employee: &NewEmployee) -> Result<i64, PersistenceError> {
    diesel::insert_into(employees::table)
        .values(employee)
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;

    debug!(employee_id, "Inserted employee");
    Ok(employee_id)
}
}

backend_fn! {
/// Inserts the left-organisation row of an employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `record` - The employee key and end date
///
/// # Errors
///
/// Returns an error if the insert fails; the primary key on `employee_id`
/// rejects a second row for the same employee.
pub fn insert_left_organisation(
    conn: &mut _,
    record: &NewLeftOrganisation,
) -> Result<(), PersistenceError> {
    diesel::insert_into(left_organisation::table)
        .values(record)
        .execute(conn)?;

    debug!(employee_id = record.employee_id, "Inserted left-organisation row");
    Ok(())
}
}
