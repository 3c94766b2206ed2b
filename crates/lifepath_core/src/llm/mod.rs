//! Language-model adapters that turn report lines into prose.
//!
//! # Responsibility
//! - Define the generator contract shared by interchangeable providers.
//! - Build the portrait prompt and the raw passthrough fallback.
//!
//! # Invariants
//! - `TextGenerator::generate` never fails: transport or parsing errors
//!   degrade to the raw report lines plus a provider notice.
//! - Prompts and user text are never written to logs.

pub mod deepseek;
pub mod retry;
pub mod yandex;

use crate::config::Settings;
use crate::report::ReportMode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use deepseek::DeepSeekClient;
pub use retry::RetryPolicy;
pub use yandex::YandexGptClient;

/// Model provider selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AiProvider {
    #[default]
    Yandex,
    DeepSeek,
}

impl AiProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yandex => "yandex",
            Self::DeepSeek => "deepseek",
        }
    }
}

impl FromStr for AiProvider {
    type Err = LlmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yandex" => Ok(Self::Yandex),
            "deepseek" => Ok(Self::DeepSeek),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }
}

/// Adapter-level error; never escapes `TextGenerator::generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Transport failure (connect, timeout, TLS).
    Http(String),
    /// Non-success HTTP status.
    Status { status: u16, body: String },
    /// Response body does not have the expected shape.
    ResponseParsing(String),
    /// Response parsed but carried no text.
    EmptyText,
    /// Required credential is empty or absent.
    MissingCredential(&'static str),
    UnknownProvider(String),
}

impl Display for LlmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(message) => write!(f, "http request failed: {message}"),
            Self::Status { status, body } => write!(f, "http status {status}: {body}"),
            Self::ResponseParsing(message) => write!(f, "cannot parse response: {message}"),
            Self::EmptyText => write!(f, "response contained no text"),
            Self::MissingCredential(name) => write!(f, "missing credential `{name}`"),
            Self::UnknownProvider(value) => {
                write!(f, "unsupported ai provider `{value}`; expected yandex|deepseek")
            }
        }
    }
}

impl Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Http(format!("request timed out: {value}"))
        } else {
            Self::Http(value.to_string())
        }
    }
}

/// Prose generator over assembled report lines.
pub trait TextGenerator {
    fn provider(&self) -> AiProvider;
    fn generate(&self, structure: &[String], mode: ReportMode) -> String;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn provider(&self) -> AiProvider {
        (**self).provider()
    }

    fn generate(&self, structure: &[String], mode: ReportMode) -> String {
        (**self).generate(structure, mode)
    }
}

/// Builds the portrait prompt shared by all providers.
pub fn build_portrait_prompt(structure: &[String], mode: ReportMode) -> String {
    format!(
        "Ты — эзотерический нумеролог. Напиши {} на основе данных ниже. \
         Говори мягко, вдохновляюще, наставнически. Не задавай вопросов, \
         не ссылайся на источники, не философствуй. \
         Не удаляй эмодзи-иконки и не меняй заголовки. \
         Добавь по 1-3 предложения под каждым пунктом, сохрани формат «эмодзи + заголовок».\n\n\
         Заверши текст: «Если почувствуешь, что это о тебе — это не совпадение. \
         Всё записано в дате.» \
         «Если ты узнал себя — поставь ⭐ или сохрани расклад.»\n\n\
         Данные:\n{}",
        mode.description(),
        structure.join("\n")
    )
}

/// Degraded output used when no provider produced text.
pub fn raw_passthrough(structure: &[String], notice: &str) -> String {
    format!("{}\n\n({notice})", structure.join("\n"))
}

/// Creates the generator selected by `settings`.
///
/// # Errors
/// - `MissingCredential` when the Yandex provider lacks key or folder id.
/// - `Http` when the HTTP client cannot be built.
pub fn build_generator(settings: &Settings) -> Result<Box<dyn TextGenerator>, LlmError> {
    match settings.ai_provider {
        AiProvider::Yandex => {
            let client = YandexGptClient::new(
                settings.yandex_api_key.as_deref().unwrap_or_default(),
                settings.yandex_folder_id.as_deref().unwrap_or_default(),
            )?;
            Ok(Box::new(client))
        }
        AiProvider::DeepSeek => {
            let client = DeepSeekClient::new(&settings.deepseek_url, settings.deepseek_timeout)?;
            Ok(Box::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_portrait_prompt, raw_passthrough, AiProvider, LlmError};
    use crate::report::ReportMode;

    #[test]
    fn prompt_names_the_mode_and_carries_every_line() {
        let lines = vec!["🔮 Число Судьбы: 8".to_string(), "🎯 Миссия: x".to_string()];
        let prompt = build_portrait_prompt(&lines, ReportMode::Deep);
        assert!(prompt.contains("глубокий нумерологический анализ"));
        assert!(prompt.ends_with("Данные:\n🔮 Число Судьбы: 8\n🎯 Миссия: x"));
    }

    #[test]
    fn passthrough_keeps_lines_and_appends_notice() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(raw_passthrough(&lines, "нет ответа"), "a\nb\n\n(нет ответа)");
    }

    #[test]
    fn provider_parsing_is_case_insensitive() {
        assert_eq!(" DeepSeek ".parse::<AiProvider>(), Ok(AiProvider::DeepSeek));
        assert_eq!("yandex".parse::<AiProvider>(), Ok(AiProvider::Yandex));
        assert_eq!(
            "openai".parse::<AiProvider>(),
            Err(LlmError::UnknownProvider("openai".to_string()))
        );
    }
}
