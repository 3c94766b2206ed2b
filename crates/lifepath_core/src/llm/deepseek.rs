//! Self-hosted DeepSeek adapter over an OpenAI-compatible chat endpoint.

use super::retry::RetryPolicy;
use super::{build_portrait_prompt, raw_passthrough, AiProvider, LlmError, TextGenerator};
use crate::report::ReportMode;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MODEL: &str = "deepseek-chat";
const MAX_TOKENS: u32 = 2_000;
const TEMPERATURE: f64 = 0.7;
const PASSTHROUGH_NOTICE: &str = "DeepSeek не ответил";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// DeepSeek client for a local `chat/completions` endpoint.
pub struct DeepSeekClient {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
    retry: RetryPolicy,
    sleeper: fn(Duration),
}

impl DeepSeekClient {
    /// Creates a client for `url` with a per-request `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.trim().to_string(),
            client,
            timeout,
            retry: RetryPolicy::default(),
            sleeper: std::thread::sleep,
        })
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

    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Http(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    LlmError::from(err)
                }
            })?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_chat_content(&text)
    }
}

impl TextGenerator for DeepSeekClient {
    fn provider(&self) -> AiProvider {
        AiProvider::DeepSeek
    }

    fn generate(&self, structure: &[String], mode: ReportMode) -> String {
        let prompt = build_portrait_prompt(structure, mode);
        info!(
            "event=llm_generate module=llm status=start provider=deepseek mode={}",
            mode
        );

        match self
            .retry
            .run("deepseek", |_| self.complete(&prompt), self.sleeper)
        {
            Ok(text) => {
                info!(
                    "event=llm_generate module=llm status=ok provider=deepseek chars={}",
                    text.chars().count()
                );
                text
            }
            Err(err) => {
                error!(
                    "event=llm_generate module=llm status=fallback provider=deepseek error={}",
                    err
                );
                raw_passthrough(structure, PASSTHROUGH_NOTICE)
            }
        }
    }
}

/// Extracts trimmed `choices[0].message.content` from a response body.
pub fn parse_chat_content(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|err| LlmError::ResponseParsing(err.to_string()))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| LlmError::ResponseParsing("no choices".to_string()))?;
    let content = content.trim();
    if content.is_empty() {
        return Err(LlmError::EmptyText);
    }
    Ok(content.to_string())
}
