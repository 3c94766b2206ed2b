//! Runtime settings loaded from `LIFEPATH_*` environment variables.
//!
//! # Invariants
//! - Blank values are treated as absent.
//! - Yandex credentials are mandatory only when Yandex is the provider.

use crate::llm::AiProvider;
use crate::logging::{default_log_level, normalize_level};
use crate::report::ReportMode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_YANDEX_API_KEY: &str = "LIFEPATH_YANDEX_API_KEY";
pub const ENV_YANDEX_FOLDER_ID: &str = "LIFEPATH_YANDEX_FOLDER_ID";
pub const ENV_DEEPSEEK_URL: &str = "LIFEPATH_DEEPSEEK_URL";
pub const ENV_DEEPSEEK_TIMEOUT_SECS: &str = "LIFEPATH_DEEPSEEK_TIMEOUT_SECS";
pub const ENV_DB_PATH: &str = "LIFEPATH_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIFEPATH_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIFEPATH_LOG_DIR";
pub const ENV_AI_PROVIDER: &str = "LIFEPATH_AI_PROVIDER";
pub const ENV_DEFAULT_MODE: &str = "LIFEPATH_DEFAULT_MODE";

const DEFAULT_DEEPSEEK_URL: &str = "http://localhost:8000/v1/chat/completions";
const DEFAULT_DEEPSEEK_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_FILE_NAME: &str = "lifepath_reports.sqlite3";

/// Configuration load error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid {
                key,
                value,
                message,
            } => write!(f, "invalid value `{value}` for `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub yandex_api_key: Option<String>,
    pub yandex_folder_id: Option<String>,
    pub deepseek_url: String,
    pub deepseek_timeout: Duration,
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub ai_provider: AiProvider,
    pub default_mode: ReportMode,
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup` (key -> raw value).
    ///
    /// # Errors
    /// - `Missing` when Yandex is selected without key or folder id.
    /// - `Invalid` for unparsable provider, mode, timeout or log level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let ai_provider = match get(ENV_AI_PROVIDER) {
            Some(value) => value.parse().map_err(|err: crate::llm::LlmError| {
                invalid(ENV_AI_PROVIDER, &value, err.to_string())
            })?,
            None => AiProvider::default(),
        };

        let default_mode = default_mode_from_lookup(&lookup)?;

        let deepseek_timeout = match get(ENV_DEEPSEEK_TIMEOUT_SECS) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(invalid(
                        ENV_DEEPSEEK_TIMEOUT_SECS,
                        &value,
                        "expected a positive number of seconds".to_string(),
                    ))
                }
            },
            None => Duration::from_secs(DEFAULT_DEEPSEEK_TIMEOUT_SECS),
        };

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(value) => {
                normalize_level(&value).map_err(|message| invalid(ENV_LOG_LEVEL, &value, message))?
            }
            None => default_log_level(),
        };

        let yandex_api_key = get(ENV_YANDEX_API_KEY);
        let yandex_folder_id = get(ENV_YANDEX_FOLDER_ID);
        if ai_provider == AiProvider::Yandex {
            if yandex_api_key.is_none() {
                return Err(ConfigError::Missing(ENV_YANDEX_API_KEY));
            }
            if yandex_folder_id.is_none() {
                return Err(ConfigError::Missing(ENV_YANDEX_FOLDER_ID));
            }
        }

        Ok(Self {
            yandex_api_key,
            yandex_folder_id,
            deepseek_url: get(ENV_DEEPSEEK_URL).unwrap_or_else(|| DEFAULT_DEEPSEEK_URL.to_string()),
            deepseek_timeout,
            db_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level,
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
            ai_provider,
            default_mode,
        })
    }
}

/// Reads only the report mode; usable without provider credentials.
pub fn default_mode_from_env() -> Result<ReportMode, ConfigError> {
    default_mode_from_lookup(|key| std::env::var(key).ok())
}

/// Parses `LIFEPATH_DEFAULT_MODE` through `lookup`; blank or absent means the
/// product default.
pub fn default_mode_from_lookup<F>(lookup: F) -> Result<ReportMode, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_DEFAULT_MODE)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        Some(value) => value
            .parse()
            .map_err(|err: crate::report::ParseReportModeError| {
                invalid(ENV_DEFAULT_MODE, &value, err.to_string())
            }),
        None => Ok(ReportMode::default()),
    }
}

fn invalid(key: &'static str, value: &str, message: String) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        message,
    }
}
