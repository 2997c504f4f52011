//! Bounded retry with a fixed delay.
//!
//! [`retry`] runs a fallible async operation up to `max_attempts` times,
//! sleeping a fixed delay between failed attempts. It is strictly sequential:
//! the caller awaits every attempt and every delay.
//!
//! # Invariants
//! - A successful attempt returns immediately; no further attempts are made.
//! - After exhausting the budget the error from the last attempt is returned unchanged.
//! - With `max_attempts == 0` the operation is never invoked and
//!   [`ClientError::MaxRetriesExceeded`] is returned.
//! - Worst-case added latency is `(max_attempts - 1) * delay`.

use std::future::Future;
use std::time::Duration;

use autoindex_config::RetryConfig;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Attempt budget and delay for [`retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryConfig::default().into()
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self::new(config.max_attempts, config.delay)
    }
}

/// Run `operation` under `policy`.
///
/// `label` names the operation in logs and metrics (e.g. `"index_exists"`).
pub async fn retry<T, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    metrics: Option<&MetricsCollector>,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation = label, attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt < policy.max_attempts => {
                warn!(
                    operation = label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );
                if let Some(m) = metrics {
                    m.record_retry(label, attempt);
                }
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                debug!(
                    operation = label,
                    attempts = attempt,
                    "Retry budget exhausted"
                );
                return Err(e);
            }
        }
    }

    Err(ClientError::MaxRetriesExceeded(policy.max_attempts))
}
