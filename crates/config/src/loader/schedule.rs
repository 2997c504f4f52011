//! Cron expression normalization.
//!
//! The scheduler expects a seconds field. Classic five-field expressions
//! (`* * * * *`) are accepted and pinned to second zero. Descriptors such as
//! `@daily` or `@hourly` are passed through for the scheduler to parse.

use tracing::debug;

use super::error::ConfigError;

/// Normalize a cron expression to the six or seven field form.
///
/// Field contents are not validated here; the scheduler rejects malformed
/// expressions when the job is registered.
pub fn normalize_cron_schedule(schedule: &str) -> Result<String, ConfigError> {
    let fields: Vec<&str> = schedule.split_whitespace().collect();
    if let [descriptor] = fields.as_slice() {
        if descriptor.starts_with('@') {
            return Ok(descriptor.to_string());
        }
    }
    match fields.len() {
        5 => {
            let normalized = format!("0 {}", fields.join(" "));
            debug!(schedule, normalized = %normalized, "Pinned five-field cron schedule to second zero");
            Ok(normalized)
        }
        6 | 7 => Ok(fields.join(" ")),
        n => Err(ConfigError::InvalidCronSchedule {
            schedule: schedule.to_string(),
            message: format!("expected 5, 6 or 7 fields, found {n}"),
        }),
    }
}
