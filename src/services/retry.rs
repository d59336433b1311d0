//! Fixed-interval retry
//!
//! Every attempt is a fresh call; nothing is carried over between attempts.
//! The wait between attempts blocks the calling thread.

use std::time::Duration;

use tracing::warn;

use crate::config::settings::RetrySettings;
use crate::error::{GroceryError, GroceryResult};

/// How often to try and how long to wait between failed attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

/// All attempts failed
#[derive(Debug)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last_error: GroceryError,
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Run `operation` until it succeeds or the attempt budget is spent
    ///
    /// On success returns the value and the number of attempts used. There
    /// is no wait after the final failed attempt.
    pub fn run<T>(
        &self,
        label: &str,
        mut operation: impl FnMut() -> GroceryResult<T>,
    ) -> Result<(T, u32), RetryExhausted> {
        let mut attempt = 1;
        loop {
            match operation() {
                Ok(value) => return Ok((value, attempt)),
                Err(e) => {
                    warn!(
                        "{} failed (attempt {}/{}): {}",
                        label, attempt, self.attempts, e
                    );
                    if attempt >= self.attempts {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }
                    if !self.backoff.is_zero() {
                        std::thread::sleep(self.backoff);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self::new(settings.attempts, settings.backoff())
    }
}
