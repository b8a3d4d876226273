// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use time::Month;

use super::{create_test_identity, create_test_record, date};
use crate::{AttendanceCandidate, EmployeeIdentity, NormalizedBatch, SourceField};

#[test]
fn test_identity_ignores_record_date_and_absence() {
    let mut monday = create_test_record("SiteA", false);
    let mut tuesday = create_test_record("SiteA", true);
    monday.date = Some(date(2024, Month::March, 4));
    tuesday.date = Some(date(2024, Month::March, 5));

    assert_eq!(monday.identity(), tuesday.identity());
}

#[test]
fn test_identity_distinguishes_each_identity_field() {
    let base: EmployeeIdentity = create_test_identity("SiteA");

    let mut other = base.clone();
    other.age = Some(43);
    assert_ne!(base, other);

    let mut other = base.clone();
    other.work_location = String::from("SiteB");
    assert_ne!(base, other);

    let mut other = base.clone();
    other.end_date = Some(date(2025, Month::January, 31));
    assert_ne!(base, other);

    let mut other = base.clone();
    other.in_training = None;
    assert_ne!(base, other);
}

#[test]
fn test_identity_hash_collapses_duplicates() {
    let identities: HashSet<EmployeeIdentity> = [
        create_test_identity("SiteA"),
        create_test_identity("SiteA"),
        create_test_identity("SiteB"),
    ]
    .into_iter()
    .collect();

    assert_eq!(identities.len(), 2);
}

#[test]
fn test_identity_location_names_and_has_left() {
    let mut identity: EmployeeIdentity = create_test_identity("SiteA, SiteB");
    assert_eq!(identity.location_names(), vec!["SiteA", "SiteB"]);
    assert!(!identity.has_left());

    identity.end_date = Some(date(2025, Month::January, 31));
    assert!(identity.has_left());
}

#[test]
fn test_normalized_batch_counts() {
    let empty: NormalizedBatch = NormalizedBatch::default();
    assert!(empty.is_empty());
    assert_eq!(empty.absence_count(), 0);

    let identity: EmployeeIdentity = create_test_identity("SiteA");
    let batch: NormalizedBatch = NormalizedBatch {
        employees: vec![identity.clone()],
        attendance: vec![
            AttendanceCandidate {
                employee: identity.clone(),
                date: Some(date(2024, Month::March, 4)),
                is_absent: true,
            },
            AttendanceCandidate {
                employee: identity,
                date: Some(date(2024, Month::March, 5)),
                is_absent: false,
            },
        ],
    };
    assert!(!batch.is_empty());
    assert_eq!(batch.absence_count(), 1);
}

#[test]
fn test_source_field_names() {
    assert_eq!(SourceField::ALL.len(), 10);
    assert_eq!(SourceField::ContractHours.as_str(), "contract_hours");
    assert_eq!(SourceField::Age.default_header(), "Leeftijd");
    assert_eq!(format!("{}", SourceField::EndDate), "end_date");

    let unique: HashSet<&str> = SourceField::ALL
        .iter()
        .map(SourceField::default_header)
        .collect();
    assert_eq!(unique.len(), 10, "default headers must be distinct");
}
