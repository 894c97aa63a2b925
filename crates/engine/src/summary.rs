//! Result types returned by the summary queries.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Current month spending compared to the configured limit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub spent: f64,
    /// `0.0` when no limit is set.
    pub limit: f64,
    pub over_limit: bool,
}

impl LimitStatus {
    pub fn new(spent: f64, limit: f64) -> Self {
        Self {
            spent,
            limit,
            over_limit: limit > 0.0 && spent > limit,
        }
    }

    /// Amount left before the limit is hit; `None` when no limit is set.
    pub fn remaining(&self) -> Option<f64> {
        (self.limit > 0.0).then(|| self.limit - self.spent)
    }
}

/// A labelled window starting at `start` (inclusive) and running to today.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingWindow {
    pub label: String,
    pub start: NaiveDate,
}

impl SpendingWindow {
    /// Today, the trailing seven days and the current calendar month.
    pub fn standard(today: NaiveDate) -> [SpendingWindow; 3] {
        [
            SpendingWindow {
                label: "Today".to_string(),
                start: today,
            },
            SpendingWindow {
                label: "This Week".to_string(),
                start: today - Duration::days(7),
            },
            SpendingWindow {
                label: "This Month".to_string(),
                start: first_of_month(today),
            },
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowBreakdown {
    pub window: SpendingWindow,
    pub by_category: BTreeMap<String, f64>,
    pub total: f64,
}

impl WindowBreakdown {
    pub fn new(window: SpendingWindow, by_category: BTreeMap<String, f64>) -> Self {
        let total = by_category.values().sum();
        Self {
            window,
            by_category,
            total,
        }
    }

    /// Share of the window total per category, in percent.
    pub fn shares(&self) -> BTreeMap<String, f64> {
        if self.total <= 0.0 {
            return BTreeMap::new();
        }
        self.by_category
            .iter()
            .map(|(category, amount)| (category.clone(), amount / self.total * 100.0))
            .collect()
    }
}

/// Spending per calendar month of one year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub year: i32,
    /// Index 0 is January.
    pub months: [f64; 12],
    pub average: f64,
}

impl MonthlyTrend {
    pub fn new(year: i32, months: [f64; 12]) -> Self {
        let average = months.iter().sum::<f64>() / months.len() as f64;
        Self {
            year,
            months,
            average,
        }
    }

    pub fn total(&self) -> f64 {
        self.months.iter().sum()
    }
}

/// Everything a front-end needs to redraw its summary area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub limit: LimitStatus,
    pub windows: Vec<WindowBreakdown>,
    pub trend: MonthlyTrend,
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Half-open `[start, end)` range covering the month of `date`.
///
/// `None` when the end falls outside chrono's date range.
pub(crate) fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = first_of_month(date);
    let end = start.checked_add_months(chrono::Months::new(1))?;
    Some((start, end))
}

/// Half-open `[start, end)` range covering `year`.
///
/// `None` when either bound falls outside chrono's date range.
pub(crate) fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}
