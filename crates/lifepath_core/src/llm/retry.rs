//! Bounded retries with exponential backoff for model calls.

use super::LlmError;
use log::{info, warn};
use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 4;
const DEFAULT_BACKOFF_FACTOR: f64 = 1.5;

/// Retry budget for one model endpoint.
///
/// The delay after failed attempt `n` (0-based) is `backoff_factor^n` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one; `0` behaves like `1`.
    pub max_attempts: u32,
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::try_from_secs_f64(self.backoff_factor.powi(exponent)).unwrap_or(Duration::ZERO)
    }

    /// Runs `op` until it succeeds or the attempt budget is spent.
    ///
    /// Returns the last error when every attempt fails. `sleep` is called
    /// between attempts only, never after the final one.
    pub fn run<T, F, S>(&self, label: &str, mut op: F, mut sleep: S) -> Result<T, LlmError>
    where
        F: FnMut(u32) -> Result<T, LlmError>,
        S: FnMut(Duration),
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(
                        "event=llm_attempt module=llm status=error target={} attempt={}/{} error={}",
                        label,
                        attempt + 1,
                        attempts,
                        err
                    );
                    if attempt + 1 >= attempts {
                        return Err(err);
                    }
                    let delay = self.delay_for(attempt);
                    info!(
                        "event=llm_retry module=llm status=wait target={} next_attempt={} delay_ms={}",
                        label,
                        attempt + 2,
                        delay.as_millis()
                    );
                    sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RetryPolicy;
    use crate::llm::LlmError;
    use std::time::Duration;

    #[test]
    fn delays_grow_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2250));
    }

    #[test]
    fn stops_at_first_success() {
        let mut calls = 0;
        let mut sleeps = Vec::new();
        let result = RetryPolicy::default().run(
            "test",
            |attempt| {
                calls += 1;
                if attempt < 2 {
                    Err(LlmError::EmptyText)
                } else {
                    Ok("done")
                }
            },
            |delay| sleeps.push(delay),
        );

        assert_eq!(result, Ok("done"));
        assert_eq!(calls, 3);
        assert_eq!(sleeps, vec![Duration::from_secs(1), Duration::from_millis(1500)]);
    }

    #[test]
    fn returns_last_error_without_trailing_sleep() {
        let mut sleeps = 0;
        let result: Result<(), LlmError> = RetryPolicy::default().run(
            "test",
            |attempt| {
                Err(LlmError::Status {
                    status: 500 + u16::try_from(attempt).expect("small attempt"),
                    body: String::new(),
                })
            },
            |_| sleeps += 1,
        );

        assert_eq!(
            result,
            Err(LlmError::Status {
                status: 503,
                body: String::new()
            })
        );
        assert_eq!(sleeps, 3);
    }

    #[test]
    fn zero_attempts_still_calls_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff_factor: 2.0,
        };
        let mut calls = 0;
        let _ = policy.run::<(), _, _>(
            "test",
            |_| {
                calls += 1;
                Err(LlmError::EmptyText)
            },
            |_| {},
        );
        assert_eq!(calls, 1);
    }
}
