// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! ## Module Organization
//!
//! - `locations`: Work-location insert-or-lookup
//! - `employees`: Employee and left-organisation inserts
//! - `associations`: Employee/work-location pairs
//! - `attendance`: Absence rows
//!
//! Every mutation is generated in `_sqlite` and `_mysql` variants by
//! `backend_fn!`. [`LoadTarget`] binds those variants to their connection
//! type so the loader can be written once.

pub mod associations;
pub mod attendance;
pub mod employees;
pub mod locations;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewAbsence, NewEmployee, NewEmployeeWorkLocation, NewLeftOrganisation, NewWorkLocation,
};
use crate::error::PersistenceError;

/// Maximum rows per multi-row `INSERT`.
pub const INSERT_BATCH_SIZE: usize = 1000;

/// Outcome of a work-location insert-or-lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationKey {
    pub work_location_id: i64,
    /// Whether this call created the row.
    pub created: bool,
}

/// The writes the relational loader needs from a connection.
pub trait LoadTarget: PersistenceBackend {
    /// Inserts a work location unless its name exists, returning its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the key lookup fails.
    fn upsert_work_location(
        &mut self,
        location: &NewWorkLocation,
    ) -> Result<LocationKey, PersistenceError>;

    /// Inserts an employee and returns its surrogate key.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_employee(&mut self, employee: &NewEmployee) -> Result<i64, PersistenceError>;

    /// Records that an employee left the organisation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a second row for the
    /// same employee).
    fn insert_left_organisation(
        &mut self,
        record: &NewLeftOrganisation,
    ) -> Result<(), PersistenceError>;

    /// Inserts employee/work-location pairs, ignoring existing pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    fn insert_employee_work_locations(
        &mut self,
        records: &[NewEmployeeWorkLocation],
    ) -> Result<usize, PersistenceError>;

    /// Inserts absence rows.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    fn insert_absences(&mut self, records: &[NewAbsence]) -> Result<usize, PersistenceError>;
}

impl LoadTarget for SqliteConnection {
    fn upsert_work_location(
        &mut self,
        location: &NewWorkLocation,
    ) -> Result<LocationKey, PersistenceError> {
        locations::upsert_work_location_sqlite(self, location)
    }

    fn insert_employee(&mut self, employee: &NewEmployee) -> Result<i64, PersistenceError> {
        employees::insert_employee_sqlite(self, employee)
    }

    fn insert_left_organisation(
        &mut self,
        record: &NewLeftOrganisation,
    ) -> Result<(), PersistenceError> {
        employees::insert_left_organisation_sqlite(self, record)
    }

    fn insert_employee_work_locations(
        &mut self,
        records: &[NewEmployeeWorkLocation],
    ) -> Result<usize, PersistenceError> {
        associations::bulk_insert_employee_work_locations_sqlite(self, records)
    }

    fn insert_absences(&mut self, records: &[NewAbsence]) -> Result<usize, PersistenceError> {
        attendance::bulk_insert_absences_sqlite(self, records)
    }
}

#[cfg(feature = "mysql")]
impl LoadTarget for MysqlConnection {
    fn upsert_work_location(
        &mut self,
        location: &NewWorkLocation,
    ) -> Result<LocationKey, PersistenceError> {
        locations::upsert_work_location_mysql(self, location)
    }

    fn insert_employee(&mut self, employee: &NewEmployee) -> Result<i64, PersistenceError> {
        employees::insert_employee_mysql(self, employee)
    }

    fn insert_left_organisation(
        &mut self,
        record: &NewLeftOrganisation,
    ) -> Result<(), PersistenceError> {
        employees::insert_left_organisation_mysql(self, record)
    }

    fn insert_employee_work_locations(
        &mut self,
        records: &[NewEmployeeWorkLocation],
    ) -> Result<usize, PersistenceError> {
        associations::bulk_insert_employee_work_locations_mysql(self, records)
    }

    fn insert_absences(&mut self, records: &[NewAbsence]) -> Result<usize, PersistenceError> {
        attendance::bulk_insert_absences_mysql(self, records)
    }
}
