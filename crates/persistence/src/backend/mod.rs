// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates connection setup, schema DDL execution and the few
//! helpers that cannot be expressed in backend-agnostic Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default, used by all tests)
//! - `mysql`: MySQL/MariaDB backend, compiled with the `mysql` feature
//!
//! Every query and mutation lives in `queries/` and `mutations/` and is
//! written once for both backends through `backend_fn!`.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod sqlite;

#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// SQL dialect a DDL statement is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    #[cfg(feature = "mysql")]
    Mysql,
}

/// Trait for backend-specific operations.
///
/// Implemented for every supported connection type so that generic code
/// (the loader) can obtain inserted keys and check referential integrity
/// without knowing which backend it runs on.
pub trait PersistenceBackend: Connection {
    /// The dialect schema DDL must be rendered in.
    const DIALECT: Dialect;

    /// Retrieves the last inserted row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Executes one DDL statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn execute_ddl(&mut self, statement: &str) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    const DIALECT: Dialect = Dialect::Sqlite;

    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn execute_ddl(&mut self, statement: &str) -> Result<(), PersistenceError> {
        sqlite::execute_ddl(self, statement)
    }
}

#[cfg(feature = "mysql")]
impl PersistenceBackend for MysqlConnection {
    const DIALECT: Dialect = Dialect::Mysql;

    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn execute_ddl(&mut self, statement: &str) -> Result<(), PersistenceError> {
        mysql::execute_ddl(self, statement)
    }
}
