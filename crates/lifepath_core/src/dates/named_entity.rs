//! Date-phrase extraction for Russian text with spelled or mixed fields.
//!
//! # Responsibility
//! - Recognize date phrases such as `1-го мая 2000 г.`, `первого мая
//!   двухтысячного года` or `мая 1999 года` and expose their fields.
//! - Keep only phrases carrying day, month and year, validated against the
//!   calendar.
//!
//! # Invariants
//! - Extraction is a single left-to-right pass over tokens (linear time).
//! - Partial facts are returned by the extractor and discarded by the
//!   detector; they never reach the merged output.
//! - Extractor failure makes the detector contribute nothing; it never
//!   fails the caller.

use super::calendar::{CanonicalDate, DetectorKind, RawCandidate, RawYear};
use super::vocab::{
    fold_word, Cardinal, CARDINALS, DAY_NUMBER_SUFFIXES, MONTH_FORMS, ORDINAL_FORMS, YEAR_WORDS,
};
use super::DateDetector;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Inputs longer than this are refused by [`RussianDateExtractor`].
pub const MAX_EXTRACT_INPUT_CHARS: usize = 100_000;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<num>[0-9]+)(?:-(?P<suffix>\p{L}+))?|(?P<word>\p{L}+)|(?P<punct>\S)")
        .expect("valid token regex")
});

/// Date phrase found by an extractor; any field may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFact {
    pub span: Range<usize>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DateFact {
    /// Returns a raw candidate when all three fields are present.
    pub fn complete(&self) -> Option<RawCandidate> {
        Some(RawCandidate {
            span: self.span.clone(),
            source: DetectorKind::NamedEntity,
            day: self.day?,
            month: self.month?,
            year: RawYear::Full(self.year?),
        })
    }
}

/// Extractor failure; the detector treats it as "no contribution".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    InputTooLong { chars: usize, max: usize },
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputTooLong { chars, max } => {
                write!(f, "input has {chars} characters; extractor accepts at most {max}")
            }
        }
    }
}

impl Error for ExtractError {}

/// Language-aware date-phrase extractor contract.
pub trait DatePhraseExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<DateFact>, ExtractError>;
}

/// Rule-based extractor for Russian date phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussianDateExtractor;

impl DatePhraseExtractor for RussianDateExtractor {
    fn extract(&self, text: &str) -> Result<Vec<DateFact>, ExtractError> {
        let chars = text.chars().count();
        if chars > MAX_EXTRACT_INPUT_CHARS {
            return Err(ExtractError::InputTooLong {
                chars,
                max: MAX_EXTRACT_INPUT_CHARS,
            });
        }

        let tokens = tokenize(text);
        let mut facts = Vec::new();
        let mut index = 0;
        while index < tokens.len() {
            match match_fact(&tokens, index) {
                Some((fact, next)) => {
                    facts.push(fact);
                    index = next;
                }
                None => index += 1,
            }
        }
        Ok(facts)
    }
}

/// Detector backed by a [`DatePhraseExtractor`].
pub struct NamedEntityDateDetector {
    extractor: Box<dyn DatePhraseExtractor>,
}

impl NamedEntityDateDetector {
    pub fn new() -> Self {
        Self::with_extractor(Box::new(RussianDateExtractor))
    }

    pub fn with_extractor(extractor: Box<dyn DatePhraseExtractor>) -> Self {
        Self { extractor }
    }
}

impl Default for NamedEntityDateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DateDetector for NamedEntityDateDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::NamedEntity
    }

    fn detect(&self, text: &str) -> BTreeSet<CanonicalDate> {
        let facts = match self.extractor.extract(text) {
            Ok(facts) => facts,
            Err(err) => {
                warn!(
                    "event=date_extract module=dates status=skipped detector=named_entity error={}",
                    err
                );
                return BTreeSet::new();
            }
        };

        facts
            .iter()
            .filter_map(DateFact::complete)
            .filter_map(|candidate| candidate.resolve().ok())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Number {
        digits: String,
        suffix: Option<String>,
    },
    Word(String),
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    span: Range<usize>,
}

fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.range();
            let kind = if let Some(num) = caps.name("num") {
                TokenKind::Number {
                    digits: num.as_str().to_string(),
                    suffix: caps.name("suffix").map(|suffix| fold_word(suffix.as_str())),
                }
            } else if let Some(word) = caps.name("word") {
                TokenKind::Word(fold_word(word.as_str()))
            } else {
                TokenKind::Punct(caps.name("punct")?.as_str().chars().next()?)
            };
            Some(Token { kind, span })
        })
        .collect()
}

fn match_fact(tokens: &[Token], start: usize) -> Option<(DateFact, usize)> {
    if let Some((day, after_day)) = parse_day(tokens, start) {
        if let Some((month, after_month)) = parse_month(tokens, after_day) {
            let (year, end) = match parse_year(tokens, after_month) {
                Some((year, after_year)) => {
                    (Some(year), skip_year_word(tokens, after_year))
                }
                None => (None, after_month),
            };
            return Some((fact(tokens, start, end, Some(day), Some(month), year), end));
        }
    }

    if let Some((month, after_month)) = parse_month(tokens, start) {
        if let Some((year, after_year)) = parse_year(tokens, after_month) {
            let end = skip_year_word(tokens, after_year);
            return Some((fact(tokens, start, end, None, Some(month), Some(year)), end));
        }
    }

    if let Some((year, after_year)) = parse_year(tokens, start) {
        let end = skip_year_word(tokens, after_year);
        if end > after_year {
            return Some((fact(tokens, start, end, None, None, Some(year)), end));
        }
    }

    None
}

fn fact(
    tokens: &[Token],
    start: usize,
    end: usize,
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
) -> DateFact {
    DateFact {
        span: tokens[start].span.start..tokens[end - 1].span.end,
        day,
        month,
        year,
    }
}

fn parse_day(tokens: &[Token], index: usize) -> Option<(u32, usize)> {
    match &tokens.get(index)?.kind {
        TokenKind::Number { digits, suffix } => {
            if digits.len() > 2 {
                return None;
            }
            if let Some(suffix) = suffix {
                if !DAY_NUMBER_SUFFIXES.contains(&suffix.as_str()) {
                    return None;
                }
            }
            let day = digits.parse::<u32>().ok()?;
            (1..=31).contains(&day).then_some((day, index + 1))
        }
        TokenKind::Word(_) => {
            let (day, next) = parse_spelled_ordinal(tokens, index)?;
            (1..=31).contains(&day).then_some((day, next))
        }
        TokenKind::Punct(_) => None,
    }
}

fn parse_month(tokens: &[Token], index: usize) -> Option<(u32, usize)> {
    let TokenKind::Word(word) = &tokens.get(index)?.kind else {
        return None;
    };
    let form = MONTH_FORMS.get(word.as_str())?;
    let mut next = index + 1;
    if form.abbreviated && is_punct(tokens, next, '.') {
        next += 1;
    }
    Some((form.month, next))
}

fn parse_year(tokens: &[Token], index: usize) -> Option<(i32, usize)> {
    match &tokens.get(index)?.kind {
        TokenKind::Number { digits, .. } => {
            if digits.len() != 4 {
                return None;
            }
            Some((digits.parse::<i32>().ok()?, index + 1))
        }
        TokenKind::Word(_) => {
            let (year, next) = parse_spelled_ordinal(tokens, index)?;
            if year < 1000 {
                return None;
            }
            Some((i32::try_from(year).ok()?, next))
        }
        TokenKind::Punct(_) => None,
    }
}

fn skip_year_word(tokens: &[Token], index: usize) -> usize {
    let Some(TokenKind::Word(word)) = tokens.get(index).map(|token| &token.kind) else {
        return index;
    };
    if !YEAR_WORDS.contains(&word.as_str()) {
        return index;
    }
    if word == "г" && is_punct(tokens, index + 1, '.') {
        return index + 2;
    }
    index + 1
}

fn is_punct(tokens: &[Token], index: usize, expected: char) -> bool {
    matches!(tokens.get(index), Some(Token { kind: TokenKind::Punct(c), .. }) if *c == expected)
}

/// Parses cardinal words closed by one ordinal word
/// (`тысяча девятьсот девяносто девятого` -> 1999).
///
/// Each added part must be smaller than the place of the previous one, so
/// `двадцать сто первого` is rejected.
fn parse_spelled_ordinal(tokens: &[Token], start: usize) -> Option<(u32, usize)> {
    let mut thousands = 0_u32;
    let mut group = 0_u32;
    let mut cap = 1000_u32;
    let mut index = start;

    loop {
        let TokenKind::Word(word) = &tokens.get(index)?.kind else {
            return None;
        };

        if let Some(cardinal) = CARDINALS.get(word.as_str()) {
            match *cardinal {
                Cardinal::Thousand => {
                    if thousands != 0 || group >= 10 {
                        return None;
                    }
                    thousands = group.max(1) * 1000;
                    group = 0;
                    cap = 1000;
                }
                Cardinal::Value(value) => {
                    if value >= cap {
                        return None;
                    }
                    group += value;
                    cap = place_cap(value);
                }
            }
            index += 1;
            continue;
        }

        let value = *ORDINAL_FORMS.get(word.as_str())?;
        if value >= 1000 {
            if thousands != 0 || group != 0 {
                return None;
            }
            return Some((value, index + 1));
        }
        if value >= cap {
            return None;
        }
        return Some((thousands + group + value, index + 1));
    }
}

fn place_cap(value: u32) -> u32 {
    if value >= 100 {
        100
    } else if value >= 20 {
        10
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DateFact, DatePhraseExtractor, ExtractError, NamedEntityDateDetector,
        RussianDateExtractor, MAX_EXTRACT_INPUT_CHARS,
    };
    use crate::dates::DateDetector;

    fn detect(text: &str) -> Vec<String> {
        NamedEntityDateDetector::new()
            .detect(text)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn fields(text: &str) -> Vec<(Option<u32>, Option<u32>, Option<i32>)> {
        RussianDateExtractor
            .extract(text)
            .expect("extraction should succeed")
            .into_iter()
            .map(|fact| (fact.day, fact.month, fact.year))
            .collect()
    }

    #[test]
    fn digit_day_with_month_name_and_year() {
        assert_eq!(detect("я родился 1 мая 2000"), vec!["01.05.2000"]);
        assert_eq!(detect("1-го мая 2000 года"), vec!["01.05.2000"]);
        assert_eq!(detect("12 декабря 1999 г."), vec!["12.12.1999"]);
        assert_eq!(detect("12 ДЕКАБРЯ 1999г"), vec!["12.12.1999"]);
    }

    #[test]
    fn spelled_day_and_spelled_year() {
        assert_eq!(detect("первого мая двухтысячного года"), vec!["01.05.2000"]);
        assert_eq!(
            detect("двадцать первое марта тысяча девятьсот девяносто девятого"),
            vec!["21.03.1999"]
        );
        assert_eq!(detect("третьего июля две тысячи пятого"), vec!["03.07.2005"]);
        assert_eq!(detect("Четвёртое октября 1987"), vec!["04.10.1987"]);
    }

    #[test]
    fn month_abbreviations_accept_trailing_dot() {
        assert_eq!(detect("5 сент. 1985"), vec!["05.09.1985"]);
        assert_eq!(detect("5 янв 1985 г."), vec!["05.01.1985"]);
    }

    #[test]
    fn partial_phrases_are_extracted_but_not_detected() {
        assert_eq!(fields("встретимся 5 мая"), vec![(Some(5), Some(5), None)]);
        assert_eq!(fields("в мае 1999 года"), vec![(None, Some(5), Some(1999))]);
        assert_eq!(fields("в 1999 году"), vec![(None, None, Some(1999))]);
        assert!(detect("встретимся 5 мая").is_empty());
        assert!(detect("в мае 1999 года").is_empty());
        assert!(detect("встретимся 5-го").is_empty());
    }

    #[test]
    fn calendar_invalid_phrases_are_dropped() {
        assert!(detect("30 февраля 2020").is_empty());
        assert!(detect("тридцать первого апреля 2000").is_empty());
    }

    #[test]
    fn malformed_numerals_are_not_days() {
        assert_eq!(
            fields("двадцать сто первого мая"),
            vec![(Some(1), Some(5), None)]
        );
        assert!(detect("32 мая 2000").is_empty());
        assert!(detect("1-ый мая 2000").is_empty());
    }

    #[test]
    fn spans_cover_the_whole_phrase() {
        let text = "было 1 мая 2000 г. утром";
        let facts = RussianDateExtractor.extract(text).expect("extract");
        assert_eq!(facts.len(), 1);
        assert_eq!(&text[facts[0].span.clone()], "1 мая 2000 г.");
    }

    #[test]
    fn oversized_input_is_refused_by_extractor_and_ignored_by_detector() {
        let text = "1 мая 2000 ".repeat(MAX_EXTRACT_INPUT_CHARS / 5);
        assert!(matches!(
            RussianDateExtractor.extract(&text),
            Err(ExtractError::InputTooLong { .. })
        ));
        assert!(NamedEntityDateDetector::new().detect(&text).is_empty());
    }

    struct BrokenExtractor;

    impl DatePhraseExtractor for BrokenExtractor {
        fn extract(&self, _text: &str) -> Result<Vec<DateFact>, ExtractError> {
            Err(ExtractError::InputTooLong { chars: 1, max: 0 })
        }
    }

    #[test]
    fn failing_extractor_contributes_nothing() {
        let detector = NamedEntityDateDetector::with_extractor(Box::new(BrokenExtractor));
        assert!(detector.detect("1 мая 2000").is_empty());
    }
}
