//! Centralized constants for the autoindex workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default per-call HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum allowed per-call timeout in seconds (1 hour).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// Default number of idle connections kept per cluster host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Retry Defaults
// =============================================================================

/// Default number of attempts for each cluster operation.
pub const DEFAULT_RETRY_ATTEMPTS: usize = 3;

/// Upper bound accepted for `RETRY_ATTEMPTS`.
pub const MAX_RETRY_ATTEMPTS: usize = 10;

/// Default fixed delay between attempts in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

// =============================================================================
// Scheduling & Provisioning
// =============================================================================

/// Default cron schedule: every minute, at second zero.
pub const DEFAULT_CRON_SCHEDULE: &str = "0 * * * * *";

/// Date format appended to each index prefix (`YYYYMMDD`).
pub const INDEX_DATE_FORMAT: &str = "%Y%m%d";

/// Separator used by the list-valued environment variables.
pub const LIST_SEPARATOR: char = ',';
