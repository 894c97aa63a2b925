//! Handles settings for the application.
//!
//! Sources, lowest priority first: built-in defaults, the TOML file
//! (`config/expense_tracker.toml` unless `--config` says otherwise), then
//! `EXPENSE_TRACKER_*` environment variables (`__` between nested keys, e.g.
//! `EXPENSE_TRACKER_APP__LEVEL=debug`). Command-line flags are applied
//! on top by the caller.
//!
//! ```toml
//! timezone = "Europe/Rome"
//! database = { sqlite = "./expenses.db" }
//!
//! [app]
//! level = "info"
//! ```
use config::{Config, Environment, File};
use engine::Clock;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/expense_tracker.toml";
const DEFAULT_DATABASE_PATH: &str = "./expenses.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite(DEFAULT_DATABASE_PATH.to_string())
    }
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Self::Memory => String::from("sqlite::memory:"),
            Self::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    /// IANA name; the machine's local date is used when absent.
    pub timezone: Option<String>,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(Environment::with_prefix("EXPENSE_TRACKER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn clock(&self) -> Result<Clock> {
        match &self.timezone {
            None => Ok(Clock::Local),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(Clock::Zoned)
                .map_err(|err| AppError::Timezone(format!("{name}: {err}"))),
        }
    }
}
