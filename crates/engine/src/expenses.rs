//! Expense records.
//!
//! An `ExpenseRecord` is one dated, categorized amount. The table row is
//! `(id, amount, category, date)` with `date` stored as `YYYY-MM-DD` text.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Amount, Category};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: f64,
    /// Category text as stored; rows written outside the ledger may hold
    /// values that are not a [`Category`].
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// The amount rendered with two decimals and thousands separators.
    pub fn display_amount(&self) -> String {
        Amount::new(self.amount).to_string()
    }

    /// The stored category, if it is one of the known [`Category`] values.
    pub fn known_category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

/// Validated input shared by create and update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ExpenseFields {
    pub(crate) amount: Amount,
    pub(crate) category: Category,
    pub(crate) date: NaiveDate,
}

impl ExpenseFields {
    pub(crate) fn to_active(self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            amount: ActiveValue::Set(self.amount.value()),
            category: ActiveValue::Set(self.category.as_str().to_string()),
            date: ActiveValue::Set(self.date),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            category: model.category,
            date: model.date,
        }
    }
}
