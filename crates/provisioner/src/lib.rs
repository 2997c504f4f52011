//! Daily index provisioning for a search cluster.
//!
//! On every cron tick the job derives tomorrow's date-suffixed index names
//! from the configured prefixes, checks whether each exists, and creates the
//! missing ones with a template picked by classification lists.
//!
//! # Modules
//! - [`template`]: settings/mappings documents
//! - [`naming`]: `prefix + YYYYMMDD` index names
//! - [`classify`]: template selection
//! - [`provisioner`]: the per-invocation algorithm
//! - [`scheduler`]: cron trigger and per-tick configuration reload

pub mod classify;
pub mod error;
pub mod naming;
pub mod provisioner;
pub mod scheduler;
pub mod template;

pub use classify::Classifier;
pub use error::{InvocationError, SchedulerError};
pub use naming::IndexName;
pub use provisioner::{ProvisionEntry, ProvisionOutcome, ProvisionReport, Provisioner};
pub use scheduler::{ProvisionJob, Scheduler, load_provisioning};
pub use template::IndexTemplate;
