// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod loader_tests;

use std::cell::Cell;

use diesel::RunQueryDsl;
use staffload::reshape;
use staffload_domain::{
    LocationDetails, LocationProvider, LookupError, NormalizedBatch, RawRecord,
};
use time::{Date, Month};

use crate::{BackendConnection, Persistence};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

/// A nurse working at `work_location`, seen on 5 March 2024.
pub fn create_test_record(work_location: &str, is_absent: bool) -> RawRecord {
    RawRecord {
        gender: String::from("V"),
        age: Some(42),
        contract_hours: String::from("32"),
        in_training: Some(false),
        is_absent,
        expertise: String::from("Verpleegkundige"),
        hire_date: Some(date(2019, Month::June, 1)),
        date: Some(date(2024, Month::March, 5)),
        end_date: None,
        work_location: String::from(work_location),
    }
}

/// The same record on another day.
pub fn on_day(record: &RawRecord, day: u8, is_absent: bool) -> RawRecord {
    RawRecord {
        date: Some(date(2024, Month::March, day)),
        is_absent,
        ..record.clone()
    }
}

pub fn batch(records: Vec<RawRecord>) -> NormalizedBatch {
    reshape(records)
}

/// A fresh in-memory store with an empty schema.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory database");
    persistence.reset_schema().expect("Failed to reset schema");
    persistence
}

/// Runs raw SQL against an in-memory test store.
pub fn execute_sqlite(persistence: &mut Persistence, statement: &str) {
    match &mut persistence.conn {
        BackendConnection::Sqlite(conn) => {
            diesel::sql_query(statement)
                .execute(conn)
                .expect("Failed to execute statement");
        }
        #[cfg(feature = "mysql")]
        BackendConnection::Mysql(_) => panic!("Test stores are SQLite"),
    }
}

/// Knows a fixed set of locations and counts lookups.
pub struct TestProvider {
    locations: Vec<LocationDetails>,
    pub calls: Cell<u32>,
}

impl TestProvider {
    pub fn new(locations: Vec<LocationDetails>) -> Self {
        Self {
            locations,
            calls: Cell::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Knows `SiteA` and `Zonnehof`.
    pub fn standard() -> Self {
        Self::new(vec![
            LocationDetails::new("SiteA", Some("Stationsweg 4"), Some("4321 BA")),
            LocationDetails::new("Zonnehof", Some("Dorpsstraat 1"), Some("1234 AB")),
        ])
    }
}

impl LocationProvider for TestProvider {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.locations.clone())
    }
}

/// Always fails.
pub struct FailingProvider;

impl LocationProvider for FailingProvider {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        Err(LookupError::Exhausted {
            attempts: 3,
            last: Box::new(LookupError::Transient(String::from("timed out"))),
        })
    }
}
