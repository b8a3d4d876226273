// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use staffload_domain::{AttendanceCandidate, NormalizedBatch};
use time::Month;

use super::{
    FailingProvider, TestProvider, batch, create_test_persistence, create_test_record, date,
    execute_sqlite, on_day,
};
use crate::{LoadReport, PersistenceError, TableCounts};

#[test]
fn test_empty_batch_loads_nothing() {
    let mut persistence = create_test_persistence();
    let provider = TestProvider::standard();

    let report = persistence
        .load_batch(&NormalizedBatch::default(), &provider)
        .unwrap();

    assert_eq!(report, LoadReport::default());
    assert_eq!(provider.calls.get(), 0);
    assert_eq!(persistence.table_counts().unwrap(), TableCounts::default());
}

#[test]
fn test_daily_rows_store_one_employee() {
    let mut persistence = create_test_persistence();
    let record = create_test_record("Zonnehof", false);
    let records = vec![
        record.clone(),
        on_day(&record, 6, true),
        on_day(&record, 7, false),
    ];

    let report = persistence
        .load_batch(&batch(records), &TestProvider::standard())
        .unwrap();

    assert_eq!(report.employees_inserted, 1);
    assert_eq!(persistence.table_counts().unwrap().employees, 1);
}

#[test]
fn test_repeated_rows_do_not_add_employees() {
    let record = create_test_record("Zonnehof", false);
    let once = vec![record.clone(), on_day(&record, 6, true)];
    let twice: Vec<_> = once.iter().chain(once.iter()).cloned().collect();

    let mut first = create_test_persistence();
    first
        .load_batch(&batch(once), &TestProvider::standard())
        .unwrap();
    let mut second = create_test_persistence();
    second
        .load_batch(&batch(twice), &TestProvider::standard())
        .unwrap();

    assert_eq!(
        first.table_counts().unwrap().employees,
        second.table_counts().unwrap().employees
    );
}

#[test]
fn test_distinct_identities_store_distinct_employees() {
    let mut persistence = create_test_persistence();
    let nurse = create_test_record("Zonnehof", false);
    let mut trainee = create_test_record("Zonnehof", false);
    trainee.in_training = Some(true);
    let mut older = create_test_record("Zonnehof", false);
    older.age = Some(43);

    persistence
        .load_batch(&batch(vec![nurse, trainee, older]), &TestProvider::standard())
        .unwrap();

    assert_eq!(persistence.table_counts().unwrap().employees, 3);
}

#[test]
fn test_no_end_date_means_no_left_organisation_row() {
    let mut persistence = create_test_persistence();

    let report = persistence
        .load_batch(
            &batch(vec![create_test_record("Zonnehof", false)]),
            &TestProvider::standard(),
        )
        .unwrap();

    let employee_id = persistence.list_employee_ids().unwrap()[0];
    assert_eq!(report.left_organisation_inserted, 0);
    assert_eq!(persistence.table_counts().unwrap().left_organisation, 0);
    assert_eq!(
        persistence.left_organisation_end_date(employee_id).unwrap(),
        None
    );
}

#[test]
fn test_end_date_stores_one_left_organisation_row() {
    let mut persistence = create_test_persistence();
    let mut record = create_test_record("Zonnehof", false);
    record.end_date = Some(date(2024, Month::March, 31));
    let records = vec![record.clone(), on_day(&record, 6, true)];

    let report = persistence
        .load_batch(&batch(records), &TestProvider::standard())
        .unwrap();

    let employee_id = persistence.list_employee_ids().unwrap()[0];
    assert_eq!(report.left_organisation_inserted, 1);
    assert_eq!(persistence.table_counts().unwrap().left_organisation, 1);
    assert_eq!(
        persistence.left_organisation_end_date(employee_id).unwrap(),
        Some(date(2024, Month::March, 31))
    );
}

#[test]
fn test_multi_location_label_stores_one_pair_per_location() {
    let mut persistence = create_test_persistence();

    let report = persistence
        .load_batch(
            &batch(vec![create_test_record("SiteA, SiteB", false)]),
            &TestProvider::standard(),
        )
        .unwrap();

    let employee_id = persistence.list_employee_ids().unwrap()[0];
    let counts = persistence.table_counts().unwrap();
    assert_eq!(counts.employee_work_locations, 2);
    assert_eq!(counts.work_locations, 2);
    assert_eq!(report.associations_inserted, 2);
    assert_eq!(report.locations_matched, 1);
    assert_eq!(report.locations_placeholder, 1);
    assert_eq!(
        persistence.locations_of_employee(employee_id).unwrap(),
        vec![String::from("SiteA"), String::from("SiteB")]
    );
}

#[test]
fn test_repeated_location_in_label_stores_one_pair() {
    let mut persistence = create_test_persistence();

    let report = persistence
        .load_batch(
            &batch(vec![create_test_record("SiteA, SiteA", false)]),
            &TestProvider::standard(),
        )
        .unwrap();

    assert_eq!(report.associations_inserted, 1);
    assert_eq!(persistence.table_counts().unwrap().employee_work_locations, 1);
}

#[test]
fn test_only_absent_days_are_stored() {
    let mut persistence = create_test_persistence();
    let record = create_test_record("Zonnehof", true);
    let records = vec![record.clone(), on_day(&record, 6, false)];

    let report = persistence
        .load_batch(&batch(records), &TestProvider::standard())
        .unwrap();

    let employee_id = persistence.list_employee_ids().unwrap()[0];
    assert_eq!(report.absences_inserted, 1);
    assert_eq!(report.present_days, 1);
    assert_eq!(persistence.table_counts().unwrap().absences, 1);
    assert_eq!(
        persistence.absence_dates(employee_id).unwrap(),
        vec![date(2024, Month::March, 5)]
    );
}

#[test]
fn test_absence_without_date_is_discarded() {
    let mut persistence = create_test_persistence();
    let record = create_test_record("Zonnehof", true);
    let mut undated = on_day(&record, 6, true);
    undated.date = None;

    let report = persistence
        .load_batch(&batch(vec![record, undated]), &TestProvider::standard())
        .unwrap();

    assert_eq!(report.absences_inserted, 1);
    assert_eq!(report.attendance_discarded, 1);
}

#[test]
fn test_absences_follow_the_full_identity() {
    let mut persistence = create_test_persistence();
    let at_site_a = create_test_record("SiteA", true);
    let at_zonnehof = on_day(&create_test_record("Zonnehof", false), 6, true);

    persistence
        .load_batch(
            &batch(vec![at_site_a, at_zonnehof]),
            &TestProvider::standard(),
        )
        .unwrap();

    let ids = persistence.list_employee_ids().unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(
        persistence.absence_dates(ids[0]).unwrap(),
        vec![date(2024, Month::March, 5)]
    );
    assert_eq!(
        persistence.absence_dates(ids[1]).unwrap(),
        vec![date(2024, Month::March, 6)]
    );
}

#[test]
fn test_unstorable_employee_is_skipped() {
    let mut persistence = create_test_persistence();
    let valid = create_test_record("SiteA", true);
    let mut no_hire_date = create_test_record("SiteA, Zonnehof", true);
    no_hire_date.hire_date = None;
    no_hire_date.end_date = Some(date(2024, Month::April, 1));

    let report = persistence
        .load_batch(&batch(vec![valid, no_hire_date]), &TestProvider::standard())
        .unwrap();

    assert_eq!(report.employees_inserted, 1);
    assert_eq!(report.employees_skipped, 1);
    assert_eq!(report.associations_skipped, 2);
    assert_eq!(report.attendance_discarded, 1);

    let counts = persistence.table_counts().unwrap();
    assert_eq!(counts.employees, 1);
    assert_eq!(counts.left_organisation, 0);
    assert_eq!(counts.employee_work_locations, 1);
    assert_eq!(counts.absences, 1);
}

#[test]
fn test_failed_left_organisation_insert_rolls_back_its_employee() {
    let mut persistence = create_test_persistence();
    execute_sqlite(
        &mut persistence,
        "CREATE TRIGGER reject_end_date BEFORE INSERT ON left_organisation
         WHEN NEW.end_date = '2024-04-01'
         BEGIN SELECT RAISE(ABORT, 'rejected end date'); END",
    );
    let before = create_test_record("SiteA", true);
    let mut leaver = create_test_record("Zonnehof", true);
    leaver.end_date = Some(date(2024, Month::April, 1));
    let after = create_test_record("SiteB", true);

    let report = persistence
        .load_batch(&batch(vec![before, leaver, after]), &TestProvider::standard())
        .unwrap();

    assert_eq!(report.employees_inserted, 2);
    assert_eq!(report.employees_skipped, 1);
    assert_eq!(report.left_organisation_inserted, 0);
    assert_eq!(report.associations_skipped, 1);
    assert_eq!(report.attendance_discarded, 1);

    let counts = persistence.table_counts().unwrap();
    assert_eq!(counts.employees, 2);
    assert_eq!(counts.left_organisation, 0);
    assert_eq!(counts.employee_work_locations, 2);
    assert_eq!(counts.absences, 2);

    let ids = persistence.list_employee_ids().unwrap();
    assert_eq!(persistence.locations_of_employee(ids[0]).unwrap(), vec!["SiteA"]);
    assert_eq!(persistence.locations_of_employee(ids[1]).unwrap(), vec!["SiteB"]);
    for id in ids {
        assert_eq!(persistence.left_organisation_end_date(id).unwrap(), None);
        assert_eq!(persistence.absence_dates(id).unwrap().len(), 1);
    }
}

#[test]
fn test_candidate_for_unknown_employee_is_discarded() {
    let mut persistence = create_test_persistence();
    let known = create_test_record("Zonnehof", true);
    let stranger = create_test_record("SiteA", true).identity();
    let mut normalized = batch(vec![known]);
    normalized.attendance.push(AttendanceCandidate {
        employee: stranger,
        date: Some(date(2024, Month::March, 8)),
        is_absent: true,
    });

    let report = persistence
        .load_batch(&normalized, &TestProvider::standard())
        .unwrap();

    assert_eq!(report.absences_inserted, 1);
    assert_eq!(report.attendance_discarded, 1);
}

#[test]
fn test_provider_is_queried_once_per_load() {
    let mut persistence = create_test_persistence();
    let provider = TestProvider::standard();
    let records = vec![
        create_test_record("SiteA", false),
        create_test_record("SiteB, Zonnehof", false),
    ];

    persistence.load_batch(&batch(records), &provider).unwrap();

    assert_eq!(provider.calls.get(), 1);
}

#[test]
fn test_provider_is_not_queried_without_locations() {
    let mut persistence = create_test_persistence();
    let provider = TestProvider::standard();

    let report = persistence
        .load_batch(&batch(vec![create_test_record("", true)]), &provider)
        .unwrap();

    assert_eq!(provider.calls.get(), 0);
    assert_eq!(report.employees_inserted, 1);
    assert_eq!(report.associations_inserted, 0);
}

#[test]
fn test_provider_failure_stores_nothing() {
    let mut persistence = create_test_persistence();

    let err = persistence
        .load_batch(
            &batch(vec![create_test_record("Zonnehof", true)]),
            &FailingProvider,
        )
        .unwrap_err();

    assert!(matches!(err, PersistenceError::ReferenceData(_)));
    assert_eq!(persistence.table_counts().unwrap(), TableCounts::default());
}

#[test]
fn test_reports_accumulate() {
    let mut total = LoadReport::default();
    let one = LoadReport {
        employees_inserted: 2,
        absences_inserted: 3,
        ..LoadReport::default()
    };

    total += one;
    total += one;

    assert_eq!(total.employees_inserted, 4);
    assert_eq!(total.absences_inserted, 6);
    assert_eq!(total.present_days, 0);
}
