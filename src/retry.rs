//! Bounded retry execution with a fixed inter-attempt delay.
//!
//! [`RetryBudget`] describes one retried invocation: how many attempts it may
//! make and how long to wait between them. The wait happens inline on the
//! calling task, so retried work stays strictly sequential.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use browser_pool::RetryBudget;
//!
//! let budget = RetryBudget::new(5, Duration::from_millis(50));
//! let value = budget.run(|| async { flaky_operation().await }).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// RetryBudget
// ============================================================================

/// Immutable retry configuration consumed by one [`run`](Self::run) call.
///
/// A budget of one attempt behaves as a single unretried call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    /// Maximum number of attempts, always at least one.
    max_attempts: u32,
    /// Delay between consecutive attempts.
    delay: Duration,
}

// ============================================================================
// RetryBudget - Construction
// ============================================================================

impl RetryBudget {
    /// Creates a retry budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is zero.
    #[inline]
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        assert!(max_attempts >= 1, "retry budget needs at least one attempt");
        Self {
            max_attempts,
            delay,
        }
    }

    /// Returns the maximum number of attempts.
    #[inline]
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the inter-attempt delay.
    #[inline]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

// ============================================================================
// RetryBudget - Execution
// ============================================================================

impl RetryBudget {
    /// Runs `operation` until it succeeds or the budget is exhausted.
    ///
    /// The first success returns immediately; remaining attempts are not
    /// consumed. Between failed attempts the calling task sleeps for the
    /// configured delay. There is no delay before the first attempt or after
    /// the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExhaustedRetries`] carrying the failure from the
    /// final attempt. Earlier failures are discarded.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(attempt, max = self.max_attempts, error = %e, "Attempt failed");
                    last_error = Some(e);
                }
            }

            if attempt < self.max_attempts {
                sleep(self.delay).await;
            }
        }

        // max_attempts >= 1, so at least one failure was recorded.
        let last = last_error.unwrap_or_else(|| Error::backend("retried operation never ran"));
        Err(Error::exhausted_retries(self.max_attempts, last))
    }
}

// ============================================================================
// Tests
// ============================================================================
