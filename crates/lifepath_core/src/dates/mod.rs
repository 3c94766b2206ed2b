//! Date extraction from free-form Russian text.
//!
//! # Responsibility
//! - Run independent detectors (digit dates, date phrases, strict word
//!   template) over the same text.
//! - Merge their outputs into one canonical, deduplicated list.
//!
//! # Invariants
//! - Detectors share no mutable state and never see each other's output.
//! - [`find_dates`] never fails: "no date" is an empty list.
//! - Output is sorted lexicographically by the `DD.MM.YYYY` string, which
//!   orders by day first, not chronologically.

pub mod calendar;
pub mod named_entity;
pub mod numeric;
pub mod vocab;
pub mod words;

pub use calendar::{CalendarError, CanonicalDate, DetectorKind};

use log::debug;
use named_entity::NamedEntityDateDetector;
use numeric::NumericDateDetector;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use words::WordDateDetector;

static DEFAULT_FINDER: Lazy<DateFinder> = Lazy::new(DateFinder::default);

/// One date recognition strategy: text in, calendar-valid dates out.
pub trait DateDetector: Send + Sync {
    fn kind(&self) -> DetectorKind;
    fn detect(&self, text: &str) -> BTreeSet<CanonicalDate>;
}

/// Fixed pipeline of detectors whose results are unioned.
pub struct DateFinder {
    detectors: Vec<Box<dyn DateDetector>>,
}

impl DateFinder {
    /// Creates a finder over a caller-provided detector set.
    pub fn with_detectors(detectors: Vec<Box<dyn DateDetector>>) -> Self {
        Self { detectors }
    }

    /// Runs every detector and merges their results.
    pub fn find(&self, text: &str) -> Vec<String> {
        let results = self
            .detectors
            .iter()
            .map(|detector| (detector.kind(), detector.detect(text)))
            .collect::<Vec<_>>();

        let counts = results
            .iter()
            .map(|(kind, dates)| format!("{}={}", kind.as_str(), dates.len()))
            .collect::<Vec<_>>()
            .join(" ");
        let merged = merge_dates(results.into_iter().map(|(_, dates)| dates));
        debug!(
            "event=find_dates module=dates status=ok {} merged={}",
            counts,
            merged.len()
        );
        merged
    }

    /// Same as [`DateFinder::find`] but returns typed dates in output order.
    pub fn find_typed(&self, text: &str) -> Vec<CanonicalDate> {
        self.find(text)
            .iter()
            .filter_map(|value| value.parse().ok())
            .collect()
    }
}

impl Default for DateFinder {
    fn default() -> Self {
        Self::with_detectors(vec![
            Box::new(WordDateDetector::new()),
            Box::new(NamedEntityDateDetector::new()),
            Box::new(NumericDateDetector::new()),
        ])
    }
}

/// Unions detector outputs into a deduplicated, lexicographically sorted list.
pub fn merge_dates<I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = BTreeSet<CanonicalDate>>,
{
    sets.into_iter()
        .flatten()
        .map(|date| date.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Finds every complete date (day, month and year) mentioned in `text`.
///
/// Each element matches `^\d{2}\.\d{2}\.\d{4}$`. Never panics, never errors.
pub fn find_dates(text: &str) -> Vec<String> {
    DEFAULT_FINDER.find(text)
}

/// Typed variant of [`find_dates`], in the same order.
pub fn find_dates_typed(text: &str) -> Vec<CanonicalDate> {
    DEFAULT_FINDER.find_typed(text)
}

#[cfg(test)]
mod tests {
    use super::calendar::{CanonicalDate, DetectorKind};
    use super::{merge_dates, DateDetector, DateFinder};
    use std::collections::BTreeSet;

    fn set(values: &[(u32, u32, i32)]) -> BTreeSet<CanonicalDate> {
        values
            .iter()
            .map(|&(d, m, y)| CanonicalDate::from_dmy(d, m, y).expect("valid date"))
            .collect()
    }

    #[test]
    fn merge_deduplicates_and_sorts_by_string() {
        let merged = merge_dates([
            set(&[(1, 5, 2000), (12, 12, 1999)]),
            set(&[(1, 5, 2000)]),
            set(&[(2, 1, 1980)]),
        ]);
        assert_eq!(merged, vec!["01.05.2000", "02.01.1980", "12.12.1999"]);
    }

    #[test]
    fn merge_of_empty_sets_is_empty() {
        assert!(merge_dates([BTreeSet::new(), BTreeSet::new(), BTreeSet::new()]).is_empty());
    }

    struct Fixed(DetectorKind, (u32, u32, i32));

    impl DateDetector for Fixed {
        fn kind(&self) -> DetectorKind {
            self.0
        }

        fn detect(&self, _text: &str) -> BTreeSet<CanonicalDate> {
            set(&[self.1])
        }
    }

    #[test]
    fn finder_unions_custom_detectors() {
        let finder = DateFinder::with_detectors(vec![
            Box::new(Fixed(DetectorKind::Word, (3, 3, 2003))),
            Box::new(Fixed(DetectorKind::Numeric, (3, 3, 2003))),
            Box::new(Fixed(DetectorKind::NamedEntity, (1, 1, 2001))),
        ]);
        assert_eq!(finder.find("ignored"), vec!["01.01.2001", "03.03.2003"]);
        assert_eq!(
            finder.find_typed("ignored"),
            vec![
                CanonicalDate::from_dmy(1, 1, 2001).expect("valid"),
                CanonicalDate::from_dmy(3, 3, 2003).expect("valid"),
            ]
        );
    }
}
