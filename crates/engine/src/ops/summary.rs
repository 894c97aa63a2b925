use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{ConnectionTrait, Statement, Value};

use crate::{
    Dashboard, EngineError, LimitStatus, MonthlyTrend, ResultEngine, SpendingWindow,
    WindowBreakdown,
    summary::{month_bounds, year_bounds},
};

use super::Engine;

/// Dates are bound as the same `YYYY-MM-DD` text the table stores, so range
/// filters compare whole days.
fn iso(date: NaiveDate) -> Value {
    date.format("%Y-%m-%d").to_string().into()
}

impl Engine {
    async fn sum_between(&self, start: NaiveDate, end: NaiveDate) -> ResultEngine<f64> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT COALESCE(SUM(amount), 0.0) AS sum \
             FROM expenses \
             WHERE date >= ? AND date < ?",
            vec![iso(start), iso(end)],
        );
        let row = self.database.query_one(stmt).await?;
        Ok(row
            .map(|r| r.try_get::<f64>("", "sum"))
            .transpose()?
            .unwrap_or(0.0))
    }

    /// Total spent in the current calendar month.
    pub async fn current_month_total(&self) -> ResultEngine<f64> {
        let today = self.today();
        let (start, end) = month_bounds(today)
            .ok_or_else(|| EngineError::InvalidDate(format!("month out of range: {today}")))?;
        let total = self.sum_between(start, end).await?;
        tracing::debug!(%start, total, "current month total");
        Ok(total)
    }

    /// Current month spending against the saved limit (unset counts as `0`).
    pub async fn limit_status(&self) -> ResultEngine<LimitStatus> {
        let spent = self.current_month_total().await?;
        let limit = self.monthly_limit().await?.unwrap_or(0.0);
        Ok(LimitStatus::new(spent, limit))
    }

    /// Spending per category for records dated on or after `window_start`.
    ///
    /// Categories are grouped by their stored text without re-validation.
    pub async fn category_breakdown(
        &self,
        window_start: NaiveDate,
    ) -> ResultEngine<BTreeMap<String, f64>> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT category, COALESCE(SUM(amount), 0.0) AS total \
             FROM expenses \
             WHERE date >= ? \
             GROUP BY category",
            vec![iso(window_start)],
        );
        let rows = self.database.query_all(stmt).await?;

        let mut breakdown = BTreeMap::new();
        for row in rows {
            let category: String = row.try_get("", "category")?;
            let total: f64 = row.try_get("", "total")?;
            breakdown.insert(category, total);
        }
        Ok(breakdown)
    }

    /// The windows shown on the dashboard, relative to today.
    pub fn standard_windows(&self) -> [SpendingWindow; 3] {
        SpendingWindow::standard(self.today())
    }

    /// Category breakdown for each of the standard windows.
    pub async fn window_breakdowns(&self) -> ResultEngine<Vec<WindowBreakdown>> {
        let mut breakdowns = Vec::with_capacity(3);
        for window in self.standard_windows() {
            let by_category = self.category_breakdown(window.start).await?;
            breakdowns.push(WindowBreakdown::new(window, by_category));
        }
        Ok(breakdowns)
    }

    /// Spending per calendar month of `year`, zero-filled, with its mean.
    pub async fn monthly_trend(&self, year: i32) -> ResultEngine<MonthlyTrend> {
        let (start, end) = checked_year_bounds(year)?;
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT CAST(substr(date, 6, 2) AS INTEGER) AS month, \
                    COALESCE(SUM(amount), 0.0) AS total \
             FROM expenses \
             WHERE date >= ? AND date < ? \
             GROUP BY month",
            vec![iso(start), iso(end)],
        );
        let rows = self.database.query_all(stmt).await?;

        let mut months = [0.0; 12];
        for row in rows {
            let month: i64 = row.try_get("", "month")?;
            let total: f64 = row.try_get("", "total")?;
            match usize::try_from(month) {
                Ok(m @ 1..=12) => months[m - 1] += total,
                _ => tracing::warn!(month, year, "skipping expense rows with unreadable month"),
            }
        }
        Ok(MonthlyTrend::new(year, months))
    }

    /// Total spent in `year`, computed without the per-month grouping.
    pub async fn year_total(&self, year: i32) -> ResultEngine<f64> {
        let (start, end) = checked_year_bounds(year)?;
        self.sum_between(start, end).await
    }

    /// Limit status, standard window breakdowns and this year's trend.
    pub async fn dashboard(&self) -> ResultEngine<Dashboard> {
        let today = self.today();
        Ok(Dashboard {
            today,
            limit: self.limit_status().await?,
            windows: self.window_breakdowns().await?,
            trend: self.monthly_trend(today.year()).await?,
        })
    }
}

fn checked_year_bounds(year: i32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    year_bounds(year).ok_or_else(|| EngineError::InvalidDate(format!("year out of range: {year}")))
}
