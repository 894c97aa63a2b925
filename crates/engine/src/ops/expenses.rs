use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Amount, Category, EngineError, ExpenseRecord, ResultEngine,
    expenses::{self, ExpenseFields},
};

use super::{Engine, with_tx};

impl Engine {
    /// Validate raw input for a create or update.
    ///
    /// Past dates are rejected uniformly, also when an update keeps the
    /// record's existing date.
    fn validate_expense(
        &self,
        amount: &str,
        category: &str,
        date: NaiveDate,
    ) -> ResultEngine<ExpenseFields> {
        let today = self.today();
        if date < today {
            return Err(EngineError::InvalidDate(format!(
                "cannot use past dates: {date} is before {today}"
            )));
        }
        let amount = Amount::parse_positive(amount)?;
        let category: Category = category.parse()?;
        Ok(ExpenseFields {
            amount,
            category,
            date,
        })
    }

    /// Records a new expense and returns its id.
    pub async fn add_expense(
        &self,
        amount: &str,
        category: &str,
        date: NaiveDate,
    ) -> ResultEngine<i64> {
        let fields = self
            .validate_expense(amount, category, date)
            .inspect_err(|err| tracing::warn!("rejected new expense: {err}"))?;

        let model = fields.to_active().insert(&self.database).await?;
        tracing::info!(
            id = model.id,
            amount = model.amount,
            category = %model.category,
            date = %model.date,
            "expense added"
        );
        Ok(model.id)
    }

    /// Replaces every field of an existing expense.
    pub async fn update_expense(
        &self,
        id: i64,
        amount: &str,
        category: &str,
        date: NaiveDate,
    ) -> ResultEngine<()> {
        let fields = self
            .validate_expense(amount, category, date)
            .inspect_err(|err| tracing::warn!(id, "rejected expense update: {err}"))?;

        with_tx!(self, |db_tx| {
            if expenses::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Err(expense_not_found(id));
            }
            let mut active = fields.to_active();
            active.id = ActiveValue::Unchanged(id);
            active.update(&db_tx).await?;
            tracing::info!(id, "expense updated");
            Ok(())
        })
    }

    /// Removes an expense. Deleting a missing id is a [`EngineError::KeyNotFound`].
    pub async fn delete_expense(&self, id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_by_id(id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                return Err(expense_not_found(id));
            }
            tracing::info!(id, "expense deleted");
            Ok(())
        })
    }

    /// Returns a single expense.
    pub async fn expense(&self, id: i64) -> ResultEngine<ExpenseRecord> {
        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| expense_not_found(id))?;
        Ok(ExpenseRecord::from(model))
    }

    /// Returns every expense, newest date first; same-day records newest id first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<ExpenseRecord>> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        tracing::debug!(count = models.len(), "listed expenses");
        Ok(models.into_iter().map(ExpenseRecord::from).collect())
    }
}

fn expense_not_found(id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("expense {id}"))
}
