//! Named scalar settings stored next to the ledger.

use sea_orm::entity::prelude::*;

/// Key of the monthly spending limit setting.
pub const MONTHLY_LIMIT: &str = "monthly_limit";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
