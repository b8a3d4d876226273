// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work-location and per-employee lookups.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use time::Date;

use crate::data_models::{WorkLocationRow, text_to_date};
use crate::diesel_schema::{
    absences, employee_work_locations, employees, left_organisation, work_locations,
};
use crate::error::PersistenceError;

backend_fn! {
/// Finds a work location by its exact name.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_work_location(
    conn: &mut _,
    name: &str,
) -> Result<Option<WorkLocationRow>, PersistenceError> {
    Ok(work_locations::table
        .filter(work_locations::name.eq(name))
        .select(WorkLocationRow::as_select())
        .first::<WorkLocationRow>(conn)
        .optional()?)
}
}

backend_fn! {
/// Lists every employee key in insertion order.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_employee_ids(conn: &mut _) -> Result<Vec<i64>, PersistenceError> {
    Ok(employees::table
        .select(employees::employee_id)
        .order(employees::employee_id.asc())
        .load::<i64>(conn)?)
}
}

backend_fn! {
/// Lists the names of the work locations associated with an employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee key
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn locations_of_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(employee_work_locations::table
        .inner_join(work_locations::table)
        .filter(employee_work_locations::employee_id.eq(employee_id))
        .select(work_locations::name)
        .order(work_locations::name.asc())
        .load::<String>(conn)?)
}
}

backend_fn! {
/// Returns the date an employee left the organisation, if recorded.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the stored date
/// is malformed.
pub fn left_organisation_end_date(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<Date>, PersistenceError> {
    let end_date: Option<String> = left_organisation::table
        .filter(left_organisation::employee_id.eq(employee_id))
        .select(left_organisation::end_date)
        .first::<String>(conn)
        .optional()?;

    end_date.as_deref().map(text_to_date).transpose()
}
}

backend_fn! {
/// Lists the absence dates of an employee in ascending order.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored date is
/// malformed.
pub fn absence_dates(conn: &mut _, employee_id: i64) -> Result<Vec<Date>, PersistenceError> {
    absences::table
        .filter(absences::employee_id.eq(employee_id))
        .select(absences::absence_date)
        .order(absences::absence_date.asc())
        .load::<String>(conn)?
        .into_iter()
        .map(|text| text_to_date(&text))
        .collect()
}
}
