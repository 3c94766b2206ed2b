//! Life-path numerology derived from a canonical birth date.
//!
//! # Invariants
//! - Pure: the same date always yields the same profile.
//! - Master numbers (11, 22, 33) are never reduced further.

use crate::dates::calendar::CanonicalDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Three-cell psychomatrix taken from the last digit of each date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Psychomatrix {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl Display for Psychomatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "1: {}, 2: {}, 3: {}", self.first, self.second, self.third)
    }
}

/// Attribute set consumed by report assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifePathProfile {
    pub life_path: u32,
    pub mission: String,
    pub psychomatrix: Psychomatrix,
    pub day_code: u32,
    pub month_code: u32,
    pub year_code: u32,
    pub karma: u32,
    pub archetypal_path: String,
    pub hidden_conflicts: String,
    pub inner_cycles: [u32; 3],
    pub collective_influences: String,
    pub ascii_pyramid: String,
    pub mantra: String,
    pub mandala_prompt: String,
    pub driver_portrait: String,
    pub repeats_analysis: String,
    pub psychic_harmony: String,
    pub pros_cons: String,
}

/// Sums decimal digits until one digit or a master number remains.
pub fn reduce_to_single(mut value: u32) -> u32 {
    while value > 9 && !MASTER_NUMBERS.contains(&value) {
        value = digit_sum(value);
    }
    value
}

fn digit_sum(mut value: u32) -> u32 {
    let mut sum = 0;
    while value > 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}

/// Computes the full profile for one birth date.
pub fn calculate(date: &CanonicalDate) -> LifePathProfile {
    let day = date.day();
    let month = date.month();
    // CanonicalDate keeps years in 1000..=9999.
    let year = date.year().unsigned_abs();

    let by_total = reduce_to_single(day + month + year);
    let by_parts = reduce_to_single(day + reduce_to_single(month) + reduce_to_single(year));
    let life_path = if by_total == by_parts {
        by_total
    } else {
        reduce_to_single((by_total + by_parts) / 2)
    };
    let year_code = reduce_to_single(year);

    LifePathProfile {
        life_path,
        mission: format!("Реализация потенциала числа {life_path}"),
        psychomatrix: Psychomatrix {
            first: day % 10,
            second: month % 10,
            third: year % 10,
        },
        day_code: reduce_to_single(day),
        month_code: reduce_to_single(month),
        year_code,
        karma: reduce_to_single(life_path * 2),
        archetypal_path: format!("Путь {life_path}: Проводник света"),
        hidden_conflicts: format!("Конфликт между {life_path} и {}", 10 - life_path % 9),
        inner_cycles: [
            life_path,
            reduce_to_single(life_path + 3),
            reduce_to_single(life_path * 2),
        ],
        collective_influences: format!("Эпоха числа {year_code}"),
        ascii_pyramid: " 1\n 2 2\n 3 3 3".to_string(),
        mantra: format!("Я --- {life_path}. Я в потоке."),
        mandala_prompt: format!(
            "mandala with {life_path} petals, golden light, cosmic symbols"
        ),
        driver_portrait: format!("Водитель: {life_path}-й тип. Интуиция + действие."),
        repeats_analysis: format!("Число {life_path} повторяется 3 раза в расчёте."),
        psychic_harmony: "Да".to_string(),
        pros_cons: "Плюсы: интуиция. Минусы: импульсивность. Рекомендации: медитация."
            .to_string(),
    }
}
