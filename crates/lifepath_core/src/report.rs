//! Report structure assembly: labeled lines per report mode.
//!
//! # Responsibility
//! - Define the three report modes and their stable string ids.
//! - Render a [`LifePathProfile`] into ordered, emoji-labeled lines.
//!
//! # Invariants
//! - Deeper modes extend shallower ones; line order is fixed.

use crate::numerology::LifePathProfile;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Report depth selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Short report: life path, mission, psychomatrix.
    Default,
    /// Adds day/month/year codes and inner dynamics.
    Deep,
    /// Full portrait with the master checklist.
    #[default]
    Master,
}

impl ReportMode {
    pub const ALL: [ReportMode; 3] = [Self::Default, Self::Deep, Self::Master];

    /// Stable id used for storage and parsing.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Deep => "deep",
            Self::Master => "master",
        }
    }

    /// Russian description inserted into generation prompts.
    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "краткий эзотерический отчёт",
            Self::Deep => "глубокий нумерологический анализ",
            Self::Master => "полный эзотерический портрет по методике Хшановской",
        }
    }
}

impl Display for ReportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown report mode id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReportModeError(pub String);

impl Display for ParseReportModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported report mode `{}`; expected default|deep|master",
            self.0
        )
    }
}

impl Error for ParseReportModeError {}

impl FromStr for ReportMode {
    type Err = ParseReportModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "default" => Ok(Self::Default),
            "deep" => Ok(Self::Deep),
            "master" => Ok(Self::Master),
            other => Err(ParseReportModeError(other.to_string())),
        }
    }
}

const DESTINY: &str = "🔮";
const MISSION: &str = "🎯";
const PSYCHO: &str = "🧩";
const DAY: &str = "☀️";
const MONTH: &str = "🌙";
const YEAR: &str = "🪐";
const ARCHETYPE: &str = "🌟";
const CONFLICT: &str = "⚔️";
const CYCLES: &str = "🔄";
const KARMA: &str = "🕉️";
const WORK: &str = "🛠️";
const RESULT: &str = "✨";
const HARMONY: &str = "☯️";
const PROS: &str = "⚖️";
const REPEAT: &str = "🔁";
const COLLECTIVE: &str = "🌌";
const ASCII: &str = "🎨";
const DRIVER: &str = "🚗";
const MANTRA: &str = "🕯️";
const MANDALA: &str = "🪷";
const FINAL: &str = "🌈";
const CHECK: &str = "✅";

/// Builds the labeled report lines for `mode`.
pub fn build_report_structure(profile: &LifePathProfile, mode: ReportMode) -> Vec<String> {
    let mut lines = base_lines(profile);
    if mode == ReportMode::Default {
        return lines;
    }

    lines.extend(deep_lines(profile));
    if mode == ReportMode::Deep {
        return lines;
    }

    lines.extend(master_lines(profile));
    lines.push(format!("{CHECK} Чек-лист master-режима пройден (19 пунктов)."));
    lines
}

fn base_lines(profile: &LifePathProfile) -> Vec<String> {
    vec![
        format!("{DESTINY} Число Судьбы: {}", profile.life_path),
        format!("{MISSION} Миссия: {}", profile.mission),
        format!("{PSYCHO} Психоматрица: {}", profile.psychomatrix),
    ]
}

fn deep_lines(profile: &LifePathProfile) -> Vec<String> {
    let [first, second, third] = profile.inner_cycles;
    vec![
        format!("{DAY} Код дня: {}", profile.day_code),
        format!("{MONTH} Код месяца: {}", profile.month_code),
        format!("{YEAR} Код года: {}", profile.year_code),
        format!("{ARCHETYPE} Архетипический путь души: {}", profile.archetypal_path),
        format!("{CONFLICT} Скрытые конфликты: {}", profile.hidden_conflicts),
        format!("{CYCLES} Внутренние циклы: {first}, {second}, {third}"),
    ]
}

fn master_lines(profile: &LifePathProfile) -> Vec<String> {
    vec![
        format!("{KARMA} Карма (9): {}", profile.karma),
        format!("{WORK} Способ проработки (10): Через служение"),
        format!("{RESULT} Результат (11): Гармония"),
        format!("{HARMONY} Психическая гармония (12): {}", profile.psychic_harmony),
        format!("{PROS} Плюсы/минусы/рекомендации: {}", profile.pros_cons),
        format!("{REPEAT} Анализ повторов карт: {}", profile.repeats_analysis),
        format!("{COLLECTIVE} Коллективные влияния: {}", profile.collective_influences),
        format!("{ASCII} ASCII-пирамида:\n{}", profile.ascii_pyramid),
        format!("{DRIVER} Водительский портрет: {}", profile.driver_portrait),
        format!("{MANTRA} Мантра: {}", profile.mantra),
        format!("{MANDALA} Описание мандалы: {}", profile.mandala_prompt),
        format!("{FINAL} Финальное заключение: Ты пришёл в этот мир не случайно."),
        format!("{FINAL} Напоминание: Если ты узнал себя — поставь ⭐ или сохрани расклад."),
    ]
}
