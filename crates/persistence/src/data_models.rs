// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use staffload_domain::{EmployeeIdentity, ResolvedLocation};
use time::Date;
use time::macros::format_description;

use crate::diesel_schema::{
    absences, employee_work_locations, employees, left_organisation, work_locations,
};
use crate::error::PersistenceError;

/// Renders a date the way it is stored (`YYYY-MM-DD`).
pub fn date_to_text(date: Date) -> String {
    date.to_string()
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns an error if the column does not hold a `YYYY-MM-DD` date.
pub fn text_to_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::DatabaseError(format!("Invalid stored date '{text}': {e}")))
}

/// Insertable work location.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = work_locations)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewWorkLocation {
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

impl From<&ResolvedLocation> for NewWorkLocation {
    fn from(location: &ResolvedLocation) -> Self {
        Self {
            name: location.details.name.clone(),
            street: location.details.street.clone(),
            postal_code: location.details.postal_code.clone(),
        }
    }
}

/// Insertable employee.
///
/// The work-location label and end date are not columns here; they are
/// stored through `employee_work_locations` and `left_organisation`.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployee {
    pub gender: String,
    pub age: i32,
    pub contract_hours: String,
    pub in_training: i32,
    pub expertise: String,
    pub hire_date: String,
}

impl TryFrom<&EmployeeIdentity> for NewEmployee {
    type Error = PersistenceError;

    fn try_from(identity: &EmployeeIdentity) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            PersistenceError::InvalidRecord(format!("employee has no {field}: {identity:?}"))
        };

        Ok(Self {
            gender: identity.gender.clone(),
            age: identity.age.ok_or_else(|| missing("age"))?,
            contract_hours: identity.contract_hours.clone(),
            in_training: i32::from(identity.in_training.ok_or_else(|| missing("in-training flag"))?),
            expertise: identity.expertise.clone(),
            hire_date: date_to_text(identity.hire_date.ok_or_else(|| missing("hire date"))?),
        })
    }
}

/// Insertable left-organisation row.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = left_organisation)]
pub struct NewLeftOrganisation {
    pub employee_id: i64,
    pub end_date: String,
}

/// Insertable employee/work-location pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = employee_work_locations)]
pub struct NewEmployeeWorkLocation {
    pub employee_id: i64,
    pub work_location_id: i64,
}

/// Insertable absence.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = absences)]
pub struct NewAbsence {
    pub employee_id: i64,
    pub absence_date: String,
}

/// A stored work location.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = work_locations)]
pub struct WorkLocationRow {
    pub work_location_id: i64,
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
}

/// Row counts of the five OLTP tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub work_locations: usize,
    pub employees: usize,
    pub employee_work_locations: usize,
    pub absences: usize,
    pub left_organisation: usize,
}
