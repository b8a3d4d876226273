// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schema manager.
//!
//! Creates and drops the five OLTP tables. There are no migrations: a load
//! either starts from a full reset or appends to tables created earlier by
//! this module.

use tracing::info;

use crate::backend::{Dialect, PersistenceBackend};
use crate::error::PersistenceError;

/// The tables of the OLTP store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OltpTable {
    WorkLocation,
    Employee,
    EmployeeWorkLocation,
    Attendance,
    LeftOrganisation,
}

impl OltpTable {
    /// Tables in creation order: referenced tables come first.
    pub const CREATION_ORDER: [Self; 5] = [
        Self::WorkLocation,
        Self::Employee,
        Self::EmployeeWorkLocation,
        Self::Attendance,
        Self::LeftOrganisation,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WorkLocation => "work_locations",
            Self::Employee => "employees",
            Self::EmployeeWorkLocation => "employee_work_locations",
            Self::Attendance => "absences",
            Self::LeftOrganisation => "left_organisation",
        }
    }

    /// Returns the `CREATE TABLE IF NOT EXISTS` statement for a dialect.
    #[must_use]
    pub const fn create_sql(self, dialect: Dialect) -> &'static str {
        match dialect {
            Dialect::Sqlite => self.create_sqlite(),
            #[cfg(feature = "mysql")]
            Dialect::Mysql => self.create_mysql(),
        }
    }

    const fn create_sqlite(self) -> &'static str {
        match self {
            Self::WorkLocation => {
                "CREATE TABLE IF NOT EXISTS work_locations (
                    work_location_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE,
                    street TEXT,
                    postal_code TEXT
                )"
            }
            Self::Employee => {
                "CREATE TABLE IF NOT EXISTS employees (
                    employee_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    gender TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    contract_hours TEXT NOT NULL,
                    in_training INTEGER NOT NULL CHECK (in_training IN (0, 1)),
                    expertise TEXT NOT NULL,
                    hire_date TEXT NOT NULL
                )"
            }
            Self::EmployeeWorkLocation => {
                "CREATE TABLE IF NOT EXISTS employee_work_locations (
                    employee_id INTEGER NOT NULL REFERENCES employees(employee_id),
                    work_location_id INTEGER NOT NULL REFERENCES work_locations(work_location_id),
                    PRIMARY KEY (employee_id, work_location_id)
                )"
            }
            Self::Attendance => {
                "CREATE TABLE IF NOT EXISTS absences (
                    absence_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    employee_id INTEGER NOT NULL REFERENCES employees(employee_id),
                    absence_date TEXT NOT NULL
                )"
            }
            Self::LeftOrganisation => {
                "CREATE TABLE IF NOT EXISTS left_organisation (
                    employee_id INTEGER NOT NULL PRIMARY KEY REFERENCES employees(employee_id),
                    end_date TEXT NOT NULL
                )"
            }
        }
    }

    #[cfg(feature = "mysql")]
    const fn create_mysql(self) -> &'static str {
        match self {
            Self::WorkLocation => {
                "CREATE TABLE IF NOT EXISTS work_locations (
                    work_location_id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    street VARCHAR(255),
                    postal_code VARCHAR(255)
                ) ENGINE=InnoDB"
            }
            Self::Employee => {
                "CREATE TABLE IF NOT EXISTS employees (
                    employee_id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    gender VARCHAR(255) NOT NULL,
                    age INT NOT NULL,
                    contract_hours VARCHAR(255) NOT NULL,
                    in_training INT NOT NULL CHECK (in_training IN (0, 1)),
                    expertise VARCHAR(255) NOT NULL,
                    hire_date VARCHAR(10) NOT NULL
                ) ENGINE=InnoDB"
            }
            Self::EmployeeWorkLocation => {
                "CREATE TABLE IF NOT EXISTS employee_work_locations (
                    employee_id BIGINT NOT NULL,
                    work_location_id BIGINT NOT NULL,
                    PRIMARY KEY (employee_id, work_location_id),
                    FOREIGN KEY (employee_id) REFERENCES employees(employee_id),
                    FOREIGN KEY (work_location_id) REFERENCES work_locations(work_location_id)
                ) ENGINE=InnoDB"
            }
            Self::Attendance => {
                "CREATE TABLE IF NOT EXISTS absences (
                    absence_id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    employee_id BIGINT NOT NULL,
                    absence_date VARCHAR(10) NOT NULL,
                    FOREIGN KEY (employee_id) REFERENCES employees(employee_id)
                ) ENGINE=InnoDB"
            }
            Self::LeftOrganisation => {
                "CREATE TABLE IF NOT EXISTS left_organisation (
                    employee_id BIGINT NOT NULL PRIMARY KEY,
                    end_date VARCHAR(10) NOT NULL,
                    FOREIGN KEY (employee_id) REFERENCES employees(employee_id)
                ) ENGINE=InnoDB"
            }
        }
    }

    /// Returns the `DROP TABLE IF EXISTS` statement.
    #[must_use]
    pub fn drop_sql(self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name())
    }
}

/// Creates any of the five tables that do not exist yet.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn ensure_schema<C: PersistenceBackend>(conn: &mut C) -> Result<(), PersistenceError> {
    for table in OltpTable::CREATION_ORDER {
        conn.execute_ddl(table.create_sql(C::DIALECT))?;
    }
    Ok(())
}

/// Drops the five tables (in reverse creation order) and creates them empty.
///
/// Destructive and idempotent.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn reset_schema<C: PersistenceBackend>(conn: &mut C) -> Result<(), PersistenceError> {
    for table in OltpTable::CREATION_ORDER.iter().rev() {
        conn.execute_ddl(&table.drop_sql())?;
    }
    ensure_schema(conn)?;

    info!(tables = OltpTable::CREATION_ORDER.len(), "OLTP schema reset");
    Ok(())
}
