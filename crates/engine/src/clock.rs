//! Source of "today" for the ledger rules and the summary windows.

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Decides which calendar day the engine considers today.
///
/// Dates are whole days; the time of day never matters to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Clock {
    /// The machine's local date.
    #[default]
    Local,
    /// Today in the given IANA timezone.
    Zoned(Tz),
    /// A pinned date, for tests and reproducible runs.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Zoned(tz) => Utc::now().with_timezone(tz).date_naive(),
            Self::Fixed(date) => *date,
        }
    }
}
