//! Date-suffixed index names.

use std::fmt;

use autoindex_config::constants::INDEX_DATE_FORMAT;
use chrono::{Days, NaiveDate};

/// `prefix` followed by a `YYYYMMDD` date, e.g. `logs20240615`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName {
    prefix: String,
    date: NaiveDate,
}

impl IndexName {
    pub fn new(prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            prefix: prefix.into(),
            date,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The day indexes are provisioned for: `today` plus one day.
    pub fn target_date(today: NaiveDate) -> NaiveDate {
        today + Days::new(1)
    }

    /// Tomorrow's index name for every prefix, in configuration order.
    pub fn for_tomorrow(prefixes: &[String], today: NaiveDate) -> Vec<IndexName> {
        let target = Self::target_date(today);
        prefixes
            .iter()
            .map(|prefix| IndexName::new(prefix.clone(), target))
            .collect()
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.date.format(INDEX_DATE_FORMAT))
    }
}
