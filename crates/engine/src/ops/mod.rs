use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{Clock, ResultEngine};

mod expenses;
mod settings;
mod summary;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    clock: Clock,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The day the engine treats as today.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    clock: Clock,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override where "today" comes from (defaults to the local date).
    pub fn clock(mut self, clock: Clock) -> EngineBuilder {
        self.clock = clock;
        self
    }

    /// Construct `Engine`, failing if the database cannot be reached.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        tracing::debug!(clock = ?self.clock, "engine ready");
        Ok(Engine {
            database: self.database,
            clock: self.clock,
        })
    }
}
