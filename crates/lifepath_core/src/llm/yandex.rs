//! YandexGPT completion adapter.
//!
//! # Responsibility
//! - Generate portraits through the foundation-models completion API,
//!   trying the full model first and the lite model second.
//! - Produce the short "no date yet" conversational reply.
//!
//! # Invariants
//! - Each model gets its own retry budget.
//! - All failures end in a passthrough or canned reply, never an error.

use super::retry::RetryPolicy;
use super::{build_portrait_prompt, raw_passthrough, AiProvider, LlmError, TextGenerator};
use crate::report::ReportMode;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const YANDEX_COMPLETION_URL: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";

const PORTRAIT_TEMPERATURE: f64 = 0.6;
const PORTRAIT_MAX_TOKENS: u32 = 2_000;
const PORTRAIT_TIMEOUT: Duration = Duration::from_secs(30);
const REPLY_TEMPERATURE: f64 = 0.7;
const REPLY_MAX_TOKENS: u32 = 300;
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);
const PASSTHROUGH_NOTICE: &str = "Текст не сгенерирован";
const NO_DATE_REPLY: &str =
    "Я пока не понял, давай просто дату рождения в формате ДД.ММ.ГГГГ — и я создам твой портрет.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    model_uri: &'a str,
    completion_options: CompletionOptions,
    messages: [CompletionMessage<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Deserialize)]
struct CompletionResult {
    alternatives: Vec<CompletionAlternative>,
}

#[derive(Deserialize)]
struct CompletionAlternative {
    message: AlternativeMessage,
}

#[derive(Deserialize)]
struct AlternativeMessage {
    text: String,
}

/// YandexGPT client with full-then-lite model fallback.
pub struct YandexGptClient {
    api_key: String,
    folder_id: String,
    endpoint: String,
    client: reqwest::blocking::Client,
    retry: RetryPolicy,
    sleeper: fn(Duration),
}

impl YandexGptClient {
    /// Creates a client for the public completion endpoint.
    ///
    /// # Errors
    /// - `MissingCredential` when `api_key` or `folder_id` is blank.
    /// - `Http` when the HTTP client cannot be built.
    pub fn new(api_key: &str, folder_id: &str) -> Result<Self, LlmError> {
        let api_key = api_key.trim();
        let folder_id = folder_id.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingCredential("yandex_api_key"));
        }
        if folder_id.is_empty() {
            return Err(LlmError::MissingCredential("yandex_folder_id"));
        }

        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            api_key: api_key.to_string(),
            folder_id: folder_id.to_string(),
            endpoint: YANDEX_COMPLETION_URL.to_string(),
            client,
            retry: RetryPolicy::default(),
            sleeper: std::thread::sleep,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the backoff sleep (tests use a no-op).
    pub fn with_sleeper(mut self, sleeper: fn(Duration)) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Model URIs in fallback order.
    pub fn model_uris(&self) -> [(&'static str, String); 2] {
        [
            ("full", format!("gpt://{}/yandexgpt/latest", self.folder_id)),
            ("lite", format!("gpt://{}/yandexgpt-lite/latest", self.folder_id)),
        ]
    }

    /// Friendly nudge for a message without a recognizable birth date.
    ///
    /// One lite-model attempt with a short timeout; falls back to a canned
    /// reply.
    pub fn reply_without_date(&self, user_text: &str) -> String {
        let prompt = format!(
            "Пользователь написал: '{user_text}'. \
             Он не ввёл дату рождения в формате ДД.ММ.ГГГГ. \
             Ответь в стиле дружелюбного собеседника, слегка пошути, мягко подтолкни к тому, \
             чтобы он ввёл дату рождения. Не повторяйся, не говори, что ты бот."
        );
        let [_, (_, lite_uri)] = self.model_uris();
        match self.complete(&lite_uri, &prompt, REPLY_TEMPERATURE, REPLY_MAX_TOKENS, REPLY_TIMEOUT)
        {
            Ok(text) => text,
            Err(err) => {
                info!(
                    "event=llm_reply module=llm status=fallback provider=yandex error={}",
                    err
                );
                NO_DATE_REPLY.to_string()
            }
        }
    }

    fn complete(
        &self,
        model_uri: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model_uri,
            completion_options: CompletionOptions {
                stream: false,
                temperature,
                max_tokens,
            },
            messages: [CompletionMessage {
                role: "user",
                text: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Api-Key {}", self.api_key))
            .timeout(timeout)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_completion_text(&text)
    }
}

impl TextGenerator for YandexGptClient {
    fn provider(&self) -> AiProvider {
        AiProvider::Yandex
    }

    fn generate(&self, structure: &[String], mode: ReportMode) -> String {
        let prompt = build_portrait_prompt(structure, mode);

        for (model_key, model_uri) in self.model_uris() {
            info!(
                "event=llm_generate module=llm status=start provider=yandex model={} mode={}",
                model_key, mode
            );
            let result = self.retry.run(
                model_key,
                |_| {
                    self.complete(
                        &model_uri,
                        &prompt,
                        PORTRAIT_TEMPERATURE,
                        PORTRAIT_MAX_TOKENS,
                        PORTRAIT_TIMEOUT,
                    )
                },
                self.sleeper,
            );
            if let Ok(text) = result {
                info!(
                    "event=llm_generate module=llm status=ok provider=yandex model={} chars={}",
                    model_key,
                    text.chars().count()
                );
                return text;
            }
        }

        error!("event=llm_generate module=llm status=fallback provider=yandex");
        raw_passthrough(structure, PASSTHROUGH_NOTICE)
    }
}

/// Extracts `result.alternatives[0].message.text` from a response body.
pub fn parse_completion_text(body: &str) -> Result<String, LlmError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|err| LlmError::ResponseParsing(err.to_string()))?;
    let text = parsed
        .result
        .alternatives
        .into_iter()
        .next()
        .map(|alternative| alternative.message.text)
        .ok_or_else(|| LlmError::ResponseParsing("no alternatives".to_string()))?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyText);
    }
    Ok(text)
}
