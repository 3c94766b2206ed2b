//! Birth-date extraction and life-path portraits for a Russian-language chat bot.
//!
//! The date pipeline ([`find_dates`]) is pure and never fails; everything that
//! touches the network or disk reports errors through per-layer enums.

pub mod config;
pub mod dates;
pub mod db;
pub mod llm;
pub mod logging;
pub mod numerology;
pub mod repo;
pub mod report;
pub mod service;

pub use config::{ConfigError, Settings};
pub use dates::{find_dates, find_dates_typed, CalendarError, CanonicalDate, DateFinder};
pub use llm::{build_generator, AiProvider, LlmError, TextGenerator};
pub use logging::{default_log_level, init_from_settings, init_logging, logging_status};
pub use numerology::{calculate, LifePathProfile};
pub use repo::{RepoError, RepoResult, ReportCacheRepository, ReportKey, SqliteReportCache};
pub use report::{build_report_structure, ReportMode};
pub use service::{classify_turn, DateTurn, Portrait, PortraitService, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
