// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::data_models::TableCounts;
use crate::diesel_schema::{
    absences, employee_work_locations, employees, left_organisation, work_locations,
};
use crate::error::PersistenceError;

fn to_count(value: i64) -> Result<usize, PersistenceError> {
    value
        .to_usize()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

backend_fn! {
/// Counts the rows of every OLTP table.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_tables(conn: &mut _) -> Result<TableCounts, PersistenceError> {
    let work_location_count: i64 = work_locations::table.count().get_result(conn)?;
    let employee_count: i64 = employees::table.count().get_result(conn)?;
    let association_count: i64 = employee_work_locations::table.count().get_result(conn)?;
    let absence_count: i64 = absences::table.count().get_result(conn)?;
    let left_count: i64 = left_organisation::table.count().get_result(conn)?;

    Ok(TableCounts {
        work_locations: to_count(work_location_count)?,
        employees: to_count(employee_count)?,
        employee_work_locations: to_count(association_count)?,
        absences: to_count(absence_count)?,
        left_organisation: to_count(left_count)?,
    })
}
}
