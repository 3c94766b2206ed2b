use lifepath_core::{find_dates, CanonicalDate};
use regex::Regex;

const MIXED_INPUTS: &[&str] = &[
    "",
    "   ",
    "привет",
    "01.05.2000",
    "30.02.2020",
    "первое мая 2000",
    "01.05.2000 и 12.12.1999",
    "встретимся 5-го",
    "я родился 1 мая 2000 года, а брат 01.05.2000",
    "12.12.99 или двенадцатого декабря тысяча девятьсот девяносто девятого",
    "1999/12/31 23:59",
    "..//--..",
    "01..05..2000",
    "01.05.",
    "99.99.9999",
    "0.0.0",
    "мая мая мая 2000 2000",
    "двадцать сто первого мая",
    "123456789012345678901234567890",
    "ёлка 31.12.2023 🎄 первое января 2024",
];

#[test]
fn scenario_single_numeric_date() {
    assert_eq!(find_dates("01.05.2000"), vec!["01.05.2000"]);
}

#[test]
fn scenario_invalid_calendar_date_is_dropped() {
    assert!(find_dates("30.02.2020").is_empty());
}

#[test]
fn scenario_spelled_date_is_reported_once() {
    assert_eq!(find_dates("первое мая 2000"), vec!["01.05.2000"]);
}

#[test]
fn scenario_two_dates_in_string_order() {
    assert_eq!(
        find_dates("01.05.2000 и 12.12.1999"),
        vec!["01.05.2000", "12.12.1999"]
    );
}

#[test]
fn scenario_partial_date_is_not_returned() {
    assert!(find_dates("встретимся 5-го").is_empty());
}

#[test]
fn compound_day_word_split_by_extra_whitespace_is_one_date() {
    assert_eq!(find_dates("двадцать  первое мая 2000"), vec!["21.05.2000"]);
    assert_eq!(find_dates("двадцать\nпервое мая 2000"), vec!["21.05.2000"]);
}

#[test]
fn empty_text_has_no_dates() {
    assert!(find_dates("").is_empty());
}

#[test]
fn same_date_from_different_detectors_is_deduplicated() {
    assert_eq!(
        find_dates("я родился 1 мая 2000 года, а брат 01.05.2000"),
        vec!["01.05.2000"]
    );
}

#[test]
fn ordering_is_by_string_not_by_calendar() {
    assert_eq!(
        find_dates("02.01.1980 и 01.12.2005"),
        vec!["01.12.2005", "02.01.1980"]
    );
}

#[test]
fn every_result_is_canonical_unique_and_calendar_valid() {
    let shape = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap();

    for input in MIXED_INPUTS {
        let found = find_dates(input);

        let mut sorted = found.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(found, sorted, "unsorted or duplicated output for {input:?}");

        for value in &found {
            assert!(shape.is_match(value), "bad shape {value:?} for {input:?}");
            let date: CanonicalDate = value.parse().unwrap();
            assert_eq!(&date.to_string(), value);
        }
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    for input in MIXED_INPUTS {
        assert_eq!(find_dates(input), find_dates(input), "input {input:?}");
    }
}

#[test]
fn oversized_input_still_returns() {
    let mut text = "шум ".repeat(60_000);
    text.push_str("01.05.2000");
    assert_eq!(find_dates(&text), vec!["01.05.2000"]);
}
