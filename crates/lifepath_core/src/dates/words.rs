//! Strict `<day word> <month word> <yyyy>` template (`первое мая 2000`).
//!
//! Matches only the closed vocabulary in [`super::vocab`]; anything outside
//! it is left to the other detectors.

use super::calendar::{CanonicalDate, DetectorKind, RawCandidate, RawYear};
use super::vocab::{STRICT_DAYS, STRICT_DAY_WORDS, STRICT_MONTHS, STRICT_MONTH_WORDS};
use super::DateDetector;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static STRICT_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    let days = alternation(STRICT_DAY_WORDS);
    let months = alternation(STRICT_MONTH_WORDS);
    Regex::new(&format!(
        r"(?i)\b({days})\s+({months})\s+([0-9]{{4}})\b"
    ))
    .expect("valid strict word date regex")
});

// Compound words accept any run of whitespace between their parts.
fn alternation(words: &[(&str, u32)]) -> String {
    words
        .iter()
        .map(|(word, _)| regex::escape(word).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Detector for fully spelled day and month words followed by a year.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordDateDetector;

impl WordDateDetector {
    pub fn new() -> Self {
        Self
    }

    fn candidates(&self, text: &str) -> Vec<RawCandidate> {
        STRICT_WORD_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let day_words = caps.get(1)?.as_str().split_whitespace();
                let day_word = day_words.collect::<Vec<_>>().join(" ").to_lowercase();
                let day = *STRICT_DAYS.get(day_word.as_str())?;
                let month = *STRICT_MONTHS.get(caps.get(2)?.as_str().to_lowercase().as_str())?;
                let year = caps.get(3)?.as_str().parse().ok()?;
                Some(RawCandidate {
                    span: caps.get(0)?.range(),
                    source: DetectorKind::Word,
                    day,
                    month,
                    year: RawYear::Full(year),
                })
            })
            .collect()
    }
}

impl DateDetector for WordDateDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Word
    }

    fn detect(&self, text: &str) -> BTreeSet<CanonicalDate> {
        self.candidates(text)
            .iter()
            .filter_map(|candidate| candidate.resolve().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::WordDateDetector;
    use crate::dates::DateDetector;

    fn detect(text: &str) -> Vec<String> {
        WordDateDetector::new()
            .detect(text)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn matches_the_strict_template() {
        assert_eq!(detect("первое мая 2000"), vec!["01.05.2000"]);
        assert_eq!(detect("Мой день: тридцать первое декабря 1999!"), vec!["31.12.1999"]);
        assert_eq!(detect("двадцать четвёртое июня 1941"), vec!["24.06.1941"]);
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(detect("ПЕРВОЕ МАЯ 2000"), vec!["01.05.2000"]);
        assert_eq!(detect("Двадцать Первое Марта 1990"), vec!["21.03.1990"]);
    }

    #[test]
    fn compound_day_words_tolerate_extra_whitespace() {
        assert_eq!(detect("двадцать  первое мая 2000"), vec!["21.05.2000"]);
        assert_eq!(detect("двадцать\nпервое мая 2000"), vec!["21.05.2000"]);
        assert_eq!(detect("Тридцать \t Первое декабря 1999"), vec!["31.12.1999"]);
    }

    #[test]
    fn rejects_words_outside_the_vocabulary() {
        assert!(detect("первого мая 2000").is_empty());
        assert!(detect("первое май 2000").is_empty());
        assert!(detect("четвертое мая 2000").is_empty());
        assert!(detect("1 мая 2000").is_empty());
        assert!(detect("первое мая 00").is_empty());
        assert!(detect("первое мая 20001").is_empty());
    }

    #[test]
    fn drops_impossible_combinations() {
        assert!(detect("тридцатое февраля 2020").is_empty());
        assert!(detect("тридцать первое апреля 2000").is_empty());
    }
}
