use lifepath_core::db::{open_db, open_db_in_memory};
use lifepath_core::{
    CanonicalDate, ReportCacheRepository, ReportKey, ReportMode, SqliteReportCache,
};

fn key(user_id: i64, date: &str, mode: ReportMode) -> ReportKey {
    ReportKey::new(user_id, date.parse::<CanonicalDate>().unwrap(), mode)
}

#[test]
fn save_then_get_round_trips_text() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteReportCache::try_new(&conn).unwrap();
    let key = key(42, "01.05.2000", ReportMode::Master);

    assert_eq!(cache.get_report(&key).unwrap(), None);
    assert!(cache.save_report(&key, "портрет").unwrap());
    assert_eq!(cache.get_report(&key).unwrap().as_deref(), Some("портрет"));
}

#[test]
fn duplicate_save_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteReportCache::try_new(&conn).unwrap();
    let key = key(1, "12.12.1999", ReportMode::Deep);

    assert!(cache.save_report(&key, "first").unwrap());
    assert!(!cache.save_report(&key, "second").unwrap());
    assert_eq!(cache.get_report(&key).unwrap().as_deref(), Some("first"));
}

#[test]
fn keys_differ_by_user_date_and_mode() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteReportCache::try_new(&conn).unwrap();

    cache
        .save_report(&key(1, "01.05.2000", ReportMode::Default), "a")
        .unwrap();

    assert_eq!(
        cache
            .get_report(&key(1, "01.05.2000", ReportMode::Deep))
            .unwrap(),
        None
    );
    assert_eq!(
        cache
            .get_report(&key(2, "01.05.2000", ReportMode::Default))
            .unwrap(),
        None
    );
    assert_eq!(
        cache
            .get_report(&key(1, "02.05.2000", ReportMode::Default))
            .unwrap(),
        None
    );
}

#[test]
fn two_connections_to_one_file_share_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.sqlite3");
    let first = open_db(&path).unwrap();
    let second = open_db(&path).unwrap();
    let key = key(5, "29.02.2020", ReportMode::Master);

    assert!(SqliteReportCache::try_new(&first)
        .unwrap()
        .save_report(&key, "one")
        .unwrap());
    assert!(!SqliteReportCache::try_new(&second)
        .unwrap()
        .save_report(&key, "two")
        .unwrap());
    assert_eq!(
        SqliteReportCache::try_new(&second)
            .unwrap()
            .get_report(&key)
            .unwrap()
            .as_deref(),
        Some("one")
    );
}

#[test]
fn list_reports_returns_typed_rows_for_one_user() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteReportCache::try_new(&conn).unwrap();
    cache
        .save_report(&key(3, "01.05.2000", ReportMode::Default), "a")
        .unwrap();
    cache
        .save_report(&key(3, "12.12.1999", ReportMode::Master), "b")
        .unwrap();
    cache
        .save_report(&key(4, "01.05.2000", ReportMode::Default), "c")
        .unwrap();

    let reports = cache.list_reports(3).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].key, key(3, "01.05.2000", ReportMode::Default));
    assert_eq!(reports[0].text, "a");
    assert_eq!(reports[1].key.mode, ReportMode::Master);
    assert!(reports[0].created_at > 0);
}

#[test]
fn corrupt_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO reports (user_id, date_str, mode, report_text, created_at)
         VALUES (9, '31.02.2000', 'master', 'x', 0);",
        [],
    )
    .unwrap();

    let err = SqliteReportCache::try_new(&conn)
        .unwrap()
        .list_reports(9)
        .unwrap_err();
    assert!(matches!(err, lifepath_core::RepoError::InvalidData(_)));
}
