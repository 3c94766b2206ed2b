//! Immutable Russian vocabularies used by the word-based detectors.
//!
//! # Responsibility
//! - Hold the closed day/month vocabulary of the strict word template.
//! - Hold the open inflected vocabulary (ordinals, cardinals, month forms)
//!   used by the date-phrase extractor.
//!
//! # Invariants
//! - Tables are built once and never written afterwards.
//! - Open-vocabulary lookups expect lowercase text with `ё` folded to `е`
//!   (see [`fold_word`]).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Closed day vocabulary of the strict template, in regex alternation order.
pub const STRICT_DAY_WORDS: &[(&str, u32)] = &[
    ("первое", 1),
    ("второе", 2),
    ("третье", 3),
    ("четвёртое", 4),
    ("пятое", 5),
    ("шестое", 6),
    ("седьмое", 7),
    ("восьмое", 8),
    ("девятое", 9),
    ("десятое", 10),
    ("одиннадцатое", 11),
    ("двенадцатое", 12),
    ("тринадцатое", 13),
    ("четырнадцатое", 14),
    ("пятнадцатое", 15),
    ("шестнадцатое", 16),
    ("семнадцатое", 17),
    ("восемнадцатое", 18),
    ("девятнадцатое", 19),
    ("двадцатое", 20),
    ("двадцать первое", 21),
    ("двадцать второе", 22),
    ("двадцать третье", 23),
    ("двадцать четвёртое", 24),
    ("двадцать пятое", 25),
    ("двадцать шестое", 26),
    ("двадцать седьмое", 27),
    ("двадцать восьмое", 28),
    ("двадцать девятое", 29),
    ("тридцатое", 30),
    ("тридцать первое", 31),
];

/// Closed month vocabulary of the strict template (genitive forms).
pub const STRICT_MONTH_WORDS: &[(&str, u32)] = &[
    ("января", 1),
    ("февраля", 2),
    ("марта", 3),
    ("апреля", 4),
    ("мая", 5),
    ("июня", 6),
    ("июля", 7),
    ("августа", 8),
    ("сентября", 9),
    ("октября", 10),
    ("ноября", 11),
    ("декабря", 12),
];

pub static STRICT_DAYS: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| STRICT_DAY_WORDS.iter().copied().collect());

pub static STRICT_MONTHS: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| STRICT_MONTH_WORDS.iter().copied().collect());

const HARD_ADJ_ENDINGS: &[&str] = &[
    "ый", "ой", "ое", "ая", "ого", "ому", "ом", "ым", "ую", "ые", "ых",
];
// третий
const SOFT_ADJ_ENDINGS: &[&str] = &[
    "ий", "ье", "ья", "ьего", "ьему", "ьем", "ьим", "ью", "ьи", "ьих",
];

/// Ordinal stems: (stem, value, uses soft endings).
const ORDINAL_STEMS: &[(&str, u32, bool)] = &[
    ("перв", 1, false),
    ("втор", 2, false),
    ("трет", 3, true),
    ("четверт", 4, false),
    ("пят", 5, false),
    ("шест", 6, false),
    ("седьм", 7, false),
    ("восьм", 8, false),
    ("девят", 9, false),
    ("десят", 10, false),
    ("одиннадцат", 11, false),
    ("двенадцат", 12, false),
    ("тринадцат", 13, false),
    ("четырнадцат", 14, false),
    ("пятнадцат", 15, false),
    ("шестнадцат", 16, false),
    ("семнадцат", 17, false),
    ("восемнадцат", 18, false),
    ("девятнадцат", 19, false),
    ("двадцат", 20, false),
    ("тридцат", 30, false),
    ("сороков", 40, false),
    ("пятидесят", 50, false),
    ("шестидесят", 60, false),
    ("семидесят", 70, false),
    ("восьмидесят", 80, false),
    ("девяност", 90, false),
    ("сот", 100, false),
    ("двухсот", 200, false),
    ("трехсот", 300, false),
    ("четырехсот", 400, false),
    ("пятисот", 500, false),
    ("шестисот", 600, false),
    ("семисот", 700, false),
    ("восьмисот", 800, false),
    ("девятисот", 900, false),
    ("тысячн", 1000, false),
    ("двухтысячн", 2000, false),
];

/// Every inflected ordinal form mapped to its value.
pub static ORDINAL_FORMS: Lazy<HashMap<String, u32>> = Lazy::new(|| {
    let mut forms = HashMap::new();
    for &(stem, value, soft) in ORDINAL_STEMS {
        let endings = if soft {
            SOFT_ADJ_ENDINGS
        } else {
            HARD_ADJ_ENDINGS
        };
        for ending in endings {
            forms.insert(format!("{stem}{ending}"), value);
        }
    }
    forms
});

/// Cardinal number word used inside compound numerals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    Value(u32),
    /// `тысяча` and its forms; multiplies the preceding group.
    Thousand,
}

const CARDINAL_WORDS: &[(&str, Cardinal)] = &[
    ("один", Cardinal::Value(1)),
    ("одна", Cardinal::Value(1)),
    ("два", Cardinal::Value(2)),
    ("две", Cardinal::Value(2)),
    ("три", Cardinal::Value(3)),
    ("четыре", Cardinal::Value(4)),
    ("пять", Cardinal::Value(5)),
    ("шесть", Cardinal::Value(6)),
    ("семь", Cardinal::Value(7)),
    ("восемь", Cardinal::Value(8)),
    ("девять", Cardinal::Value(9)),
    ("десять", Cardinal::Value(10)),
    ("одиннадцать", Cardinal::Value(11)),
    ("двенадцать", Cardinal::Value(12)),
    ("тринадцать", Cardinal::Value(13)),
    ("четырнадцать", Cardinal::Value(14)),
    ("пятнадцать", Cardinal::Value(15)),
    ("шестнадцать", Cardinal::Value(16)),
    ("семнадцать", Cardinal::Value(17)),
    ("восемнадцать", Cardinal::Value(18)),
    ("девятнадцать", Cardinal::Value(19)),
    ("двадцать", Cardinal::Value(20)),
    ("тридцать", Cardinal::Value(30)),
    ("сорок", Cardinal::Value(40)),
    ("пятьдесят", Cardinal::Value(50)),
    ("шестьдесят", Cardinal::Value(60)),
    ("семьдесят", Cardinal::Value(70)),
    ("восемьдесят", Cardinal::Value(80)),
    ("девяносто", Cardinal::Value(90)),
    ("сто", Cardinal::Value(100)),
    ("двести", Cardinal::Value(200)),
    ("триста", Cardinal::Value(300)),
    ("четыреста", Cardinal::Value(400)),
    ("пятьсот", Cardinal::Value(500)),
    ("шестьсот", Cardinal::Value(600)),
    ("семьсот", Cardinal::Value(700)),
    ("восемьсот", Cardinal::Value(800)),
    ("девятьсот", Cardinal::Value(900)),
    ("тысяча", Cardinal::Thousand),
    ("тысячи", Cardinal::Thousand),
    ("тысяч", Cardinal::Thousand),
];

pub static CARDINALS: Lazy<HashMap<&'static str, Cardinal>> =
    Lazy::new(|| CARDINAL_WORDS.iter().copied().collect());

const SOFT_MONTH_ENDINGS: &[&str] = &["ь", "я", "ю", "ем", "е"];
const HARD_MONTH_ENDINGS: &[&str] = &["", "а", "у", "ом", "е"];

const MONTH_STEMS: &[(&str, u32, &[&str])] = &[
    ("январ", 1, SOFT_MONTH_ENDINGS),
    ("феврал", 2, SOFT_MONTH_ENDINGS),
    ("март", 3, HARD_MONTH_ENDINGS),
    ("апрел", 4, SOFT_MONTH_ENDINGS),
    ("ма", 5, &["й", "я", "ю", "ем", "е"]),
    ("июн", 6, SOFT_MONTH_ENDINGS),
    ("июл", 7, SOFT_MONTH_ENDINGS),
    ("август", 8, HARD_MONTH_ENDINGS),
    ("сентябр", 9, SOFT_MONTH_ENDINGS),
    ("октябр", 10, SOFT_MONTH_ENDINGS),
    ("ноябр", 11, SOFT_MONTH_ENDINGS),
    ("декабр", 12, SOFT_MONTH_ENDINGS),
];

/// Month abbreviations; a trailing dot is optional in text.
pub const MONTH_ABBREVIATIONS: &[(&str, u32)] = &[
    ("янв", 1),
    ("фев", 2),
    ("февр", 2),
    ("мар", 3),
    ("апр", 4),
    ("июн", 6),
    ("июл", 7),
    ("авг", 8),
    ("сен", 9),
    ("сент", 9),
    ("окт", 10),
    ("ноя", 11),
    ("нояб", 11),
    ("дек", 12),
];

/// Month form with abbreviation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthForm {
    pub month: u32,
    pub abbreviated: bool,
}

pub static MONTH_FORMS: Lazy<HashMap<String, MonthForm>> = Lazy::new(|| {
    let mut forms = HashMap::new();
    for &(abbr, month) in MONTH_ABBREVIATIONS {
        forms.insert(
            abbr.to_string(),
            MonthForm {
                month,
                abbreviated: true,
            },
        );
    }
    for &(stem, month, endings) in MONTH_STEMS {
        for ending in endings {
            forms.insert(
                format!("{stem}{ending}"),
                MonthForm {
                    month,
                    abbreviated: false,
                },
            );
        }
    }
    forms
});

/// Words that may follow a year (`2000 г.`, `2000 года`).
pub const YEAR_WORDS: &[&str] = &["г", "год", "года", "году", "годом", "гг"];

/// Suffixes accepted after a digit day (`1-го`, `5-е`).
pub const DAY_NUMBER_SUFFIXES: &[&str] = &["е", "ое", "го", "ого", "м", "ом"];

/// Lowercases a word and folds `ё` into `е`.
pub fn fold_word(word: &str) -> String {
    word.to_lowercase().replace('ё', "е")
}

#[cfg(test)]
mod tests {
    use super::{
        fold_word, Cardinal, CARDINALS, MONTH_FORMS, ORDINAL_FORMS, STRICT_DAYS,
        STRICT_DAY_WORDS, STRICT_MONTHS,
    };

    #[test]
    fn strict_vocabularies_cover_every_day_and_month() {
        assert_eq!(STRICT_DAYS.len(), 31);
        assert_eq!(STRICT_MONTHS.len(), 12);
        let mut days = STRICT_DAY_WORDS
            .iter()
            .map(|(_, day)| *day)
            .collect::<Vec<_>>();
        days.sort_unstable();
        assert_eq!(days, (1..=31).collect::<Vec<_>>());
    }

    #[test]
    fn ordinal_forms_cover_case_inflections() {
        assert_eq!(ORDINAL_FORMS.get("первое"), Some(&1));
        assert_eq!(ORDINAL_FORMS.get("первого"), Some(&1));
        assert_eq!(ORDINAL_FORMS.get("третьего"), Some(&3));
        assert_eq!(ORDINAL_FORMS.get("четвертое"), Some(&4));
        assert_eq!(ORDINAL_FORMS.get("девяносто"), None);
        assert_eq!(ORDINAL_FORMS.get("девяностого"), Some(&90));
        assert_eq!(ORDINAL_FORMS.get("двухтысячного"), Some(&2000));
        assert_eq!(ORDINAL_FORMS.get("пятом"), Some(&5));
    }

    #[test]
    fn month_forms_cover_inflections_and_abbreviations() {
        assert_eq!(MONTH_FORMS.get("мая").map(|form| form.month), Some(5));
        assert_eq!(MONTH_FORMS.get("марте").map(|form| form.month), Some(3));
        let june = MONTH_FORMS.get("июн").expect("june abbreviation");
        assert_eq!(june.month, 6);
        assert!(june.abbreviated);
        assert!(!MONTH_FORMS.get("июня").expect("june").abbreviated);
    }

    #[test]
    fn cardinals_include_thousand_forms() {
        assert_eq!(CARDINALS.get("тысячи"), Some(&Cardinal::Thousand));
        assert_eq!(CARDINALS.get("девятьсот"), Some(&Cardinal::Value(900)));
    }

    #[test]
    fn fold_word_lowercases_and_folds_yo() {
        assert_eq!(fold_word("ЧЕТВЁРТОЕ"), "четвертое");
    }
}
