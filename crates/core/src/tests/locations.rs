// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::time::Duration;

use staffload_domain::{LocationDetails, LocationProvider, LookupError};

use crate::{
    JsonFileLocationProvider, LookupPolicy, RetryingLocationProvider, StaticLocationProvider,
};

/// Replays scripted results and counts calls.
struct ScriptedProvider {
    results: RefCell<Vec<Result<Vec<LocationDetails>, LookupError>>>,
    calls: Cell<u32>,
}

impl ScriptedProvider {
    fn new(mut results: Vec<Result<Vec<LocationDetails>, LookupError>>) -> Self {
        results.reverse();
        Self {
            results: RefCell::new(results),
            calls: Cell::new(0),
        }
    }
}

impl LocationProvider for ScriptedProvider {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.results
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(LookupError::Unavailable(String::from("script exhausted"))))
    }
}

fn zonnehof() -> LocationDetails {
    LocationDetails::new("Zonnehof", Some("Dorpsstraat 1"), Some("1234 AB"))
}

fn transient() -> LookupError {
    LookupError::Transient(String::from("connection reset"))
}

#[test]
fn test_json_provider_reads_partial_records() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{ "name": "Zonnehof", "street": "Dorpsstraat 1", "postal_code": "1234 AB" }},
            {{ "name": "De Linde", "street": null }}
        ]"#
    )
    .unwrap();

    let locations = JsonFileLocationProvider::new(file.path())
        .lookup_locations()
        .unwrap();

    assert_eq!(
        locations,
        vec![zonnehof(), LocationDetails::new("De Linde", None, None)]
    );
}

#[test]
fn test_json_provider_missing_file_is_permanent() {
    let dir = tempfile::tempdir().unwrap();

    let err = JsonFileLocationProvider::new(&dir.path().join("locations.json"))
        .lookup_locations()
        .unwrap_err();

    assert!(matches!(err, LookupError::Unavailable(_)));
    assert!(!err.is_transient());
}

#[test]
fn test_json_provider_malformed_payload_is_permanent() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    assert!(matches!(
        JsonFileLocationProvider::new(file.path()).lookup_locations(),
        Err(LookupError::Unavailable(_))
    ));
}

#[test]
fn test_static_provider() {
    assert_eq!(
        StaticLocationProvider::new(vec![zonnehof()])
            .lookup_locations()
            .unwrap(),
        vec![zonnehof()]
    );
    assert!(
        StaticLocationProvider::default()
            .lookup_locations()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_retry_recovers_from_transient_failure() {
    let inner = ScriptedProvider::new(vec![Err(transient()), Ok(vec![zonnehof()])]);
    let provider = RetryingLocationProvider::new(&inner, 3, Duration::ZERO);

    assert_eq!(provider.lookup_locations().unwrap(), vec![zonnehof()]);
    assert_eq!(inner.calls.get(), 2);
}

#[test]
fn test_retry_gives_up_after_max_attempts() {
    let inner = ScriptedProvider::new(vec![Err(transient()), Err(transient()), Err(transient())]);
    let provider = RetryingLocationProvider::new(&inner, 3, Duration::ZERO);

    let err = provider.lookup_locations().unwrap_err();

    assert_eq!(
        err,
        LookupError::Exhausted {
            attempts: 3,
            last: Box::new(transient()),
        }
    );
    assert_eq!(inner.calls.get(), 3);
}

#[test]
fn test_retry_does_not_repeat_permanent_failure() {
    let inner = ScriptedProvider::new(vec![
        Err(LookupError::Unavailable(String::from("gone"))),
        Ok(vec![zonnehof()]),
    ]);
    let provider = RetryingLocationProvider::new(&inner, 3, Duration::ZERO);

    assert!(matches!(
        provider.lookup_locations(),
        Err(LookupError::Unavailable(_))
    ));
    assert_eq!(inner.calls.get(), 1);
}

#[test]
fn test_retry_with_policy_waits_between_attempts() {
    let inner = ScriptedProvider::new(vec![Err(transient()), Ok(Vec::new())]);
    let policy = LookupPolicy {
        max_attempts: 2,
        base_delay_ms: 5,
    };
    let provider = RetryingLocationProvider::with_policy(&inner, policy);

    let started = std::time::Instant::now();
    assert!(provider.lookup_locations().unwrap().is_empty());
    assert!(started.elapsed() >= Duration::from_millis(5));
}
