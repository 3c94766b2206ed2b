//! Calendar validation primitive shared by every date detector.
//!
//! # Responsibility
//! - Turn raw `(day, month, year)` components into a validated
//!   [`CanonicalDate`].
//! - Own the canonical `DD.MM.YYYY` serialization and its parser.
//!
//! # Invariants
//! - A `CanonicalDate` always names a day that exists in the proleptic
//!   Gregorian calendar.
//! - Serialized values always match `^\d{2}\.\d{2}\.\d{4}$`.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

/// Smallest year that still serializes to four digits.
pub const MIN_YEAR: i32 = 1000;
/// Largest year that still serializes to four digits.
pub const MAX_YEAR: i32 = 9999;

/// Two-digit years below this value resolve to the 2000s, the rest to the
/// 1900s (`%y` convention).
const TWO_DIGIT_YEAR_PIVOT: u8 = 69;

/// Validation failure for raw date components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Components do not name an existing day (e.g. `30.02`).
    InvalidDate { day: u32, month: u32, year: i32 },
    /// Year cannot be serialized as four digits.
    YearOutOfRange(i32),
    /// Text is not in `DD.MM.YYYY` form.
    Malformed(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { day, month, year } => {
                write!(f, "no such calendar day: day={day} month={month} year={year}")
            }
            Self::YearOutOfRange(year) => {
                write!(f, "year {year} is outside {MIN_YEAR}..={MAX_YEAR}")
            }
            Self::Malformed(value) => write!(f, "expected DD.MM.YYYY, got `{value}`"),
        }
    }
}

impl Error for CalendarError {}

/// Calendar-valid date serialized as `DD.MM.YYYY`.
///
/// Field order makes the derived `Ord` chronological; the merged output is
/// ordered by the serialized string instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CanonicalDate {
    /// Validates day-month-year components against the Gregorian calendar.
    ///
    /// # Errors
    /// - `YearOutOfRange` when `year` is not four digits long.
    /// - `InvalidDate` when the day does not exist (no clamping).
    pub fn from_dmy(day: u32, month: u32, year: i32) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|_| Self { year, month, day })
            .ok_or(CalendarError::InvalidDate { day, month, year })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Display for CanonicalDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{:02}.{}", self.day, self.month, self.year)
    }
}

impl FromStr for CanonicalDate {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || CalendarError::Malformed(value.to_string());
        let mut parts = value.split('.');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        if day.len() != 2 || month.len() != 2 || year.len() != 4 {
            return Err(malformed());
        }
        if ![day, month, year]
            .iter()
            .all(|part| part.bytes().all(|byte| byte.is_ascii_digit()))
        {
            return Err(malformed());
        }

        let day = day.parse::<u32>().map_err(|_| malformed())?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;
        let year = year.parse::<i32>().map_err(|_| malformed())?;
        Self::from_dmy(day, month, year)
    }
}

/// Detector that produced a raw candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetectorKind {
    Numeric,
    NamedEntity,
    Word,
}

impl DetectorKind {
    /// Stable id used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::NamedEntity => "named_entity",
            Self::Word => "word",
        }
    }
}

/// Year component as written in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawYear {
    Full(i32),
    /// Two-digit year; century is inferred on resolve.
    TwoDigit(u8),
}

impl RawYear {
    /// Resolves the written year to a full year.
    ///
    /// `00..=68` maps to `2000..=2068`, `69..=99` to `1969..=1999`.
    pub fn resolve(self) -> i32 {
        match self {
            Self::Full(year) => year,
            Self::TwoDigit(short) if short < TWO_DIGIT_YEAR_PIVOT => 2000 + i32::from(short),
            Self::TwoDigit(short) => 1900 + i32::from(short),
        }
    }
}

/// Intermediate match produced and consumed within one detector pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Byte range of the matched text.
    pub span: Range<usize>,
    pub source: DetectorKind,
    pub day: u32,
    pub month: u32,
    pub year: RawYear,
}

impl RawCandidate {
    /// Validates the candidate into a canonical date.
    pub fn resolve(&self) -> Result<CanonicalDate, CalendarError> {
        CanonicalDate::from_dmy(self.day, self.month, self.year.resolve())
    }
}
