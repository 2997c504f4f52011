//! Configuration loader for environment variables.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for merging sources.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - Builder methods take precedence over environment variables when applied after `from_env()`.

mod builder;
mod env;
mod error;
mod schedule;

pub use builder::ConfigLoader;
pub use env::{env_var_or_none, parse_list};
pub use error::ConfigError;
pub use schedule::normalize_cron_schedule;

#[cfg(test)]
mod tests;
