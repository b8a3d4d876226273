// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The relational loader.
//!
//! Persists one normalized batch in four steps, in this order:
//!
//! 1. Resolve every location name against the reference data and
//!    insert-or-lookup it, building a name to key map.
//! 2. Insert every unique employee (plus its left-organisation row) in its
//!    own savepoint, building an identity to key map. An employee that
//!    cannot be stored is logged and skipped.
//! 3. Insert the employee/work-location pairs.
//! 4. Insert one absence row per absent attendance candidate.
//!
//! The whole batch runs in one transaction: apart from skipped employees,
//! it is stored completely or not at all.

use std::collections::{BTreeSet, HashMap};
use std::ops::AddAssign;

use staffload_domain::{
    AttendanceCandidate, EmployeeIdentity, LocationDetails, LocationProvider, NormalizedBatch,
    ResolvedLocation, distinct_location_names, resolve_locations,
};
use tracing::{debug, info, warn};

use crate::data_models::{
    NewAbsence, NewEmployee, NewEmployeeWorkLocation, NewLeftOrganisation, NewWorkLocation,
    date_to_text,
};
use crate::error::PersistenceError;
use crate::mutations::{LoadTarget, LocationKey};

/// What one or more loads stored and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Location names found in the reference data.
    pub locations_matched: usize,
    /// Location names stored with the placeholder address.
    pub locations_placeholder: usize,
    /// Location rows created (the rest already existed).
    pub locations_created: usize,
    pub employees_inserted: usize,
    /// Employees that could not be stored.
    pub employees_skipped: usize,
    pub left_organisation_inserted: usize,
    pub associations_inserted: usize,
    /// Pairs dropped because the employee or location did not resolve.
    pub associations_skipped: usize,
    pub absences_inserted: usize,
    /// Absent days dropped for an unresolved employee or a missing date.
    pub attendance_discarded: usize,
    /// Attendance candidates that were not absences.
    pub present_days: usize,
}

impl AddAssign for LoadReport {
    fn add_assign(&mut self, other: Self) {
        self.locations_matched += other.locations_matched;
        self.locations_placeholder += other.locations_placeholder;
        self.locations_created += other.locations_created;
        self.employees_inserted += other.employees_inserted;
        self.employees_skipped += other.employees_skipped;
        self.left_organisation_inserted += other.left_organisation_inserted;
        self.associations_inserted += other.associations_inserted;
        self.associations_skipped += other.associations_skipped;
        self.absences_inserted += other.absences_inserted;
        self.attendance_discarded += other.attendance_discarded;
        self.present_days += other.present_days;
    }
}

/// Loads a normalized batch.
///
/// The provider is queried at most once, and only when the batch references
/// at least one location.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `batch` - The normalizer output for one chunk
/// * `provider` - Source of work-location addresses
///
/// # Errors
///
/// Returns an error if the reference data cannot be obtained or a database
/// operation outside a single employee's savepoint fails. Nothing from the
/// batch is stored in that case.
pub fn load_batch<C: LoadTarget>(
    conn: &mut C,
    batch: &NormalizedBatch,
    provider: &dyn LocationProvider,
) -> Result<LoadReport, PersistenceError> {
    if batch.is_empty() {
        debug!("Empty batch, nothing to load");
        return Ok(LoadReport::default());
    }

    let names: BTreeSet<String> = distinct_location_names(&batch.employees);
    let candidates: Vec<LocationDetails> = if names.is_empty() {
        Vec::new()
    } else {
        provider.lookup_locations()?
    };
    let resolved: Vec<ResolvedLocation> = resolve_locations(&names, &candidates);

    let report: LoadReport = conn.transaction::<LoadReport, PersistenceError, _>(|conn| {
        let mut report: LoadReport = LoadReport::default();

        let location_ids: HashMap<String, i64> = store_locations(conn, &resolved, &mut report)?;
        let employee_ids: HashMap<&EmployeeIdentity, i64> =
            store_employees(conn, &batch.employees, &mut report)?;
        store_associations(
            conn,
            &batch.employees,
            &employee_ids,
            &location_ids,
            &mut report,
        )?;
        store_attendance(conn, &batch.attendance, &employee_ids, &mut report)?;

        Ok(report)
    })?;

    info!(
        employees = report.employees_inserted,
        skipped = report.employees_skipped,
        absences = report.absences_inserted,
        placeholders = report.locations_placeholder,
        "Loaded batch"
    );
    Ok(report)
}

fn store_locations<C: LoadTarget>(
    conn: &mut C,
    resolved: &[ResolvedLocation],
    report: &mut LoadReport,
) -> Result<HashMap<String, i64>, PersistenceError> {
    let mut location_ids: HashMap<String, i64> = HashMap::with_capacity(resolved.len());

    for location in resolved {
        if location.matched {
            report.locations_matched += 1;
        } else {
            warn!(
                location = %location.details.name,
                "No reference address found, storing placeholder"
            );
            report.locations_placeholder += 1;
        }

        let key: LocationKey = conn.upsert_work_location(&NewWorkLocation::from(location))?;
        if key.created {
            report.locations_created += 1;
        }
        location_ids.insert(location.details.name.clone(), key.work_location_id);
    }

    Ok(location_ids)
}

fn store_employees<'b, C: LoadTarget>(
    conn: &mut C,
    employees: &'b [EmployeeIdentity],
    report: &mut LoadReport,
) -> Result<HashMap<&'b EmployeeIdentity, i64>, PersistenceError> {
    let mut employee_ids: HashMap<&EmployeeIdentity, i64> = HashMap::with_capacity(employees.len());

    for identity in employees {
        let outcome: Result<i64, PersistenceError> =
            conn.transaction::<i64, PersistenceError, _>(|conn| store_employee(conn, identity));

        match outcome {
            Ok(employee_id) => {
                report.employees_inserted += 1;
                if identity.has_left() {
                    report.left_organisation_inserted += 1;
                }
                employee_ids.insert(identity, employee_id);
            }
            Err(e) => {
                warn!(error = %e, employee = ?identity, "Skipping employee");
                report.employees_skipped += 1;
            }
        }
    }

    Ok(employee_ids)
}

fn store_employee<C: LoadTarget>(
    conn: &mut C,
    identity: &EmployeeIdentity,
) -> Result<i64, PersistenceError> {
    let employee: NewEmployee = NewEmployee::try_from(identity)?;
    let employee_id: i64 = conn.insert_employee(&employee)?;

    if let Some(end_date) = identity.end_date {
        conn.insert_left_organisation(&NewLeftOrganisation {
            employee_id,
            end_date: date_to_text(end_date),
        })?;
    }

    Ok(employee_id)
}

fn store_associations<C: LoadTarget>(
    conn: &mut C,
    employees: &[EmployeeIdentity],
    employee_ids: &HashMap<&EmployeeIdentity, i64>,
    location_ids: &HashMap<String, i64>,
    report: &mut LoadReport,
) -> Result<(), PersistenceError> {
    let mut pairs: Vec<NewEmployeeWorkLocation> = Vec::new();

    for identity in employees {
        let names: Vec<&str> = identity.location_names();
        let Some(&employee_id) = employee_ids.get(identity) else {
            for name in names {
                warn!(location = %name, "Skipping work location of an employee that was not stored");
                report.associations_skipped += 1;
            }
            continue;
        };

        for name in names {
            match location_ids.get(name) {
                Some(&work_location_id) => pairs.push(NewEmployeeWorkLocation {
                    employee_id,
                    work_location_id,
                }),
                None => {
                    warn!(employee_id, location = %name, "Skipping unresolved work location");
                    report.associations_skipped += 1;
                }
            }
        }
    }

    report.associations_inserted += conn.insert_employee_work_locations(&pairs)?;
    Ok(())
}

fn store_attendance<C: LoadTarget>(
    conn: &mut C,
    attendance: &[AttendanceCandidate],
    employee_ids: &HashMap<&EmployeeIdentity, i64>,
    report: &mut LoadReport,
) -> Result<(), PersistenceError> {
    let mut rows: Vec<NewAbsence> = Vec::new();

    for candidate in attendance {
        if !candidate.is_absent {
            report.present_days += 1;
            continue;
        }

        let Some(&employee_id) = employee_ids.get(&candidate.employee) else {
            warn!(employee = ?candidate.employee, "Discarding absence of unresolved employee");
            report.attendance_discarded += 1;
            continue;
        };

        let Some(date) = candidate.date else {
            warn!(employee_id, "Discarding absence without a date");
            report.attendance_discarded += 1;
            continue;
        };

        rows.push(NewAbsence {
            employee_id,
            absence_date: date_to_text(date),
        });
    }

    report.absences_inserted += conn.insert_absences(&rows)?;
    Ok(())
}
