//! Per-message date decision.
//!
//! Zero dates asks the user for one, a single date proceeds, several dates
//! are offered as choices in `find_dates` order.

use crate::dates::{find_dates_typed, CanonicalDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTurn {
    NoDate,
    Single(CanonicalDate),
    Multiple(Vec<CanonicalDate>),
}

impl DateTurn {
    /// Dates the user can pick from, empty for `NoDate`.
    pub fn dates(&self) -> &[CanonicalDate] {
        match self {
            Self::NoDate => &[],
            Self::Single(date) => std::slice::from_ref(date),
            Self::Multiple(dates) => dates,
        }
    }
}

/// Classifies one incoming message.
pub fn classify_turn(text: &str) -> DateTurn {
    let mut dates = find_dates_typed(text);
    match dates.len() {
        0 => DateTurn::NoDate,
        1 => DateTurn::Single(dates.remove(0)),
        _ => DateTurn::Multiple(dates),
    }
}
