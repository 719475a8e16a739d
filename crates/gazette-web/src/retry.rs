//! Fixed attempt count with linear backoff

use crate::WebError;
use std::time::Duration;
use tracing::warn;

/// Default attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default linear backoff step (milliseconds)
pub const DEFAULT_BACKOFF_MS: u64 = 500;

/// How many times a web request is attempted and how long to wait between
/// attempts. The wait after attempt `n` is `backoff * n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            backoff,
        }
    }

    /// Attempts per request
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Linear backoff step
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. The last retryable error is returned on exhaustion.
    pub fn run<T>(
        &self,
        target: &str,
        mut op: impl FnMut() -> Result<T, WebError>,
    ) -> Result<T, WebError> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(
                        "[{}] attempt {}/{} failed: {}",
                        target, attempt, self.max_retries, e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            if attempt < self.max_retries {
                std::thread::sleep(self.backoff * attempt);
            }
        }

        Err(last_error.unwrap_or_else(|| WebError::Http("Max retries exceeded".to_string())))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, Duration::from_millis(DEFAULT_BACKOFF_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn quick(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1))
    }

    #[test]
    fn test_second_attempt_succeeds_after_transient_failure() {
        let mut calls = 0;
        let result = quick(3).run("search", || {
            calls += 1;
            if calls == 1 {
                Err(WebError::Status {
                    status: 503,
                    url: "https://api.test/search".to_string(),
                })
            } else {
                Ok("hits")
            }
        });

        assert_eq!(result.unwrap(), "hits");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_exhausted_attempts_return_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = quick(3).run("fetch", || {
            calls += 1;
            Err(WebError::Timeout(format!("attempt {}", calls)))
        });

        assert_eq!(calls, 3);
        assert!(matches!(result, Err(WebError::Timeout(ref m)) if m == "attempt 3"));
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = quick(3).run("fetch", || {
            calls += 1;
            Err(WebError::Status {
                status: 404,
                url: "https://n.test/gone".to_string(),
            })
        });

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(WebError::Status { status: 404, .. })));
    }

    #[test]
    fn test_throttling_is_retried() {
        let mut calls = 0;
        let result = quick(2).run("search", || {
            calls += 1;
            if calls < 2 {
                Err(WebError::Status {
                    status: 429,
                    url: "https://api.test/search".to_string(),
                })
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(20));
        let started = Instant::now();
        let _: Result<(), _> = policy.run("fetch", || Err(WebError::Http("reset".to_string())));

        // 20ms after attempt 1, 40ms after attempt 2, none after the last
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_retries(), 1);

        let mut calls = 0;
        let _: Result<(), _> = policy.run("fetch", || {
            calls += 1;
            Err(WebError::Http("down".to_string()))
        });
        assert_eq!(calls, 1);
    }
}
