//! Expense ledger and spending summaries.
//!
//! The [`Engine`] owns a database connection and exposes two groups of
//! operations:
//!
//! - the ledger: create/update/delete/list of [`ExpenseRecord`]s plus named
//!   settings such as the monthly limit;
//! - summaries: read-only aggregates (month total vs limit, category
//!   breakdowns per window, twelve-month trend) recomputed on every call.
//!
//! Schema creation lives in the `migration` crate; run its `Migrator` before
//! building an engine on a fresh database.

pub use amount::Amount;
pub use category::Category;
pub use clock::Clock;
pub use error::EngineError;
pub use expenses::ExpenseRecord;
pub use ops::{Engine, EngineBuilder};
pub use settings::MONTHLY_LIMIT;
pub use summary::{Dashboard, LimitStatus, MonthlyTrend, SpendingWindow, WindowBreakdown};

mod amount;
mod category;
mod clock;
mod error;
mod expenses;
mod ops;
mod settings;
mod summary;

type ResultEngine<T> = Result<T, EngineError>;
