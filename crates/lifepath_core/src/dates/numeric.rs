//! Digit-only date detection (`01.05.2000`, `1/5/99`, `2000-05-01`).
//!
//! # Responsibility
//! - Find separator-delimited digit dates with a linear-time regex.
//! - Re-parse every match strictly in day-month-year order (year-month-day
//!   for the ISO-like branch).
//!
//! # Invariants
//! - Matches that fail calendar validation are dropped silently.
//! - Two-digit years resolve through [`RawYear::resolve`].

use super::calendar::{CanonicalDate, DetectorKind, RawCandidate, RawYear};
use super::DateDetector;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

static NUMERIC_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<d>0?[1-9]|[12][0-9]|3[01])[./-](?P<m>0?[1-9]|1[0-2])[./-](?P<y>[0-9]{4}|[0-9]{2})\b|\b(?P<iy>[0-9]{4})[./-](?P<im>0[1-9]|1[0-2])[./-](?P<id>0[1-9]|[12][0-9]|3[01])\b",
    )
    .expect("valid numeric date regex")
});

/// Detector for dates written entirely in digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericDateDetector;

impl NumericDateDetector {
    pub fn new() -> Self {
        Self
    }

    fn candidates(&self, text: &str) -> Vec<RawCandidate> {
        NUMERIC_DATE_RE
            .captures_iter(text)
            .filter_map(|caps| parse_candidate(&caps))
            .collect()
    }
}

impl DateDetector for NumericDateDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Numeric
    }

    fn detect(&self, text: &str) -> BTreeSet<CanonicalDate> {
        self.candidates(text)
            .iter()
            .filter_map(|candidate| candidate.resolve().ok())
            .collect()
    }
}

fn parse_candidate(caps: &Captures<'_>) -> Option<RawCandidate> {
    let span = caps.get(0)?.range();

    if let (Some(day), Some(month), Some(year)) = (caps.name("d"), caps.name("m"), caps.name("y"))
    {
        let year_text = year.as_str();
        let year = if year_text.len() == 2 {
            RawYear::TwoDigit(year_text.parse().ok()?)
        } else {
            RawYear::Full(year_text.parse().ok()?)
        };
        return Some(RawCandidate {
            span,
            source: DetectorKind::Numeric,
            day: day.as_str().parse().ok()?,
            month: month.as_str().parse().ok()?,
            year,
        });
    }

    Some(RawCandidate {
        span,
        source: DetectorKind::Numeric,
        day: caps.name("id")?.as_str().parse().ok()?,
        month: caps.name("im")?.as_str().parse().ok()?,
        year: RawYear::Full(caps.name("iy")?.as_str().parse().ok()?),
    })
}

#[cfg(test)]
mod tests {
    use super::NumericDateDetector;
    use crate::dates::DateDetector;

    fn detect(text: &str) -> Vec<String> {
        NumericDateDetector::new()
            .detect(text)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn accepts_each_separator() {
        assert_eq!(detect("01.05.2000"), vec!["01.05.2000"]);
        assert_eq!(detect("1/5/2000"), vec!["01.05.2000"]);
        assert_eq!(detect("1-5-2000"), vec!["01.05.2000"]);
    }

    #[test]
    fn reads_iso_like_dates_year_first() {
        assert_eq!(detect("родился 2000-05-01 утром"), vec!["01.05.2000"]);
        assert_eq!(detect("1999/12/31"), vec!["31.12.1999"]);
    }

    #[test]
    fn iso_branch_requires_padded_fields() {
        assert!(detect("2000-5-1").is_empty());
    }

    #[test]
    fn expands_two_digit_years() {
        assert_eq!(detect("01.05.00"), vec!["01.05.2000"]);
        assert_eq!(detect("12.12.99"), vec!["12.12.1999"]);
        assert_eq!(detect("12.12.68"), vec!["12.12.2068"]);
        assert_eq!(detect("12.12.69"), vec!["12.12.1969"]);
    }

    #[test]
    fn drops_calendar_invalid_matches() {
        assert!(detect("30.02.2020").is_empty());
        assert!(detect("31.04.2000").is_empty());
        assert_eq!(detect("29.02.2020"), vec!["29.02.2020"]);
    }

    #[test]
    fn ignores_out_of_range_fields_and_glued_digits() {
        assert!(detect("32.01.2000").is_empty());
        assert!(detect("01.13.2000").is_empty());
        assert!(detect("01.05.200").is_empty());
        assert!(detect("101.05.2000").is_empty());
        assert!(detect("01.05.2000г").is_empty());
    }

    #[test]
    fn finds_several_dates_in_one_text() {
        assert_eq!(
            detect("01.05.2000 и 12.12.1999"),
            vec!["12.12.1999", "01.05.2000"],
            "detector output is chronological; merge decides final order"
        );
    }
}
