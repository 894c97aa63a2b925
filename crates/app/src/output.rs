//! Prints engine results either as plain text or JSON.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use engine::{Amount, Dashboard, ExpenseRecord, LimitStatus, MonthlyTrend, WindowBreakdown};
use serde::Serialize;

use crate::error::Result;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    pub fn message(&self, text: &str) -> Result<()> {
        self.emit(&serde_json::json!({ "message": text }), || text.to_string())
    }

    pub fn record(&self, record: &ExpenseRecord) -> Result<()> {
        self.emit(record, || record_line(record))
    }

    pub fn records(&self, records: &[ExpenseRecord]) -> Result<()> {
        self.emit(&records, || {
            if records.is_empty() {
                return "no expenses recorded".to_string();
            }
            records
                .iter()
                .map(record_line)
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    pub fn limit(&self, status: &LimitStatus) -> Result<()> {
        self.emit(status, || limit_line(status))
    }

    pub fn breakdown(&self, start: NaiveDate, by_category: &BTreeMap<String, f64>) -> Result<()> {
        self.emit(by_category, || {
            let mut text = format!("Since {start}");
            push_categories(&mut text, by_category);
            text
        })
    }

    pub fn windows(&self, windows: &[WindowBreakdown]) -> Result<()> {
        self.emit(&windows, || windows_text(windows))
    }

    pub fn trend(&self, trend: &MonthlyTrend) -> Result<()> {
        self.emit(trend, || trend_text(trend))
    }

    pub fn dashboard(&self, dashboard: &Dashboard) -> Result<()> {
        self.emit(dashboard, || {
            [
                format!("Today: {}", dashboard.today),
                limit_line(&dashboard.limit),
                windows_text(&dashboard.windows),
                trend_text(&dashboard.trend),
            ]
            .join("\n\n")
        })
    }
}

fn money(value: f64) -> String {
    format!("${}", Amount::new(value))
}

fn record_line(record: &ExpenseRecord) -> String {
    format!(
        "{} | {} | {} | {}",
        record.id,
        money(record.amount),
        record.category,
        record.date
    )
}

fn limit_line(status: &LimitStatus) -> String {
    let mut line = format!("Total Spent: {}", money(status.spent));
    match status.remaining() {
        None => line.push_str(" (no monthly limit)"),
        Some(_) if status.over_limit => {
            line.push_str(&format!(" of {} (Over Limit!)", money(status.limit)))
        }
        Some(left) => line.push_str(&format!(" of {} ({} left)", money(status.limit), money(left))),
    }
    line
}

fn push_categories(text: &mut String, by_category: &BTreeMap<String, f64>) {
    if by_category.is_empty() {
        text.push_str("\n  (nothing spent)");
    }
    for (category, amount) in by_category {
        text.push_str(&format!("\n  {category:<14} {:>12}", money(*amount)));
    }
}

fn windows_text(windows: &[WindowBreakdown]) -> String {
    windows
        .iter()
        .map(|w| {
            let mut text = format!("{} (since {}): {}", w.window.label, w.window.start, money(w.total));
            let shares = w.shares();
            if w.by_category.is_empty() {
                text.push_str("\n  (nothing spent)");
            }
            for (category, amount) in &w.by_category {
                let share = shares.get(category).copied().unwrap_or(0.0);
                text.push_str(&format!(
                    "\n  {category:<14} {:>12} {share:>5.1}%",
                    money(*amount)
                ));
            }
            text
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn trend_text(trend: &MonthlyTrend) -> String {
    let mut text = format!("Yearly Expense Trend {}", trend.year);
    for (name, value) in MONTHS.iter().zip(trend.months.iter()) {
        text.push_str(&format!("\n  {name} {:>12}", money(*value)));
    }
    text.push_str(&format!("\n  Average: {}", money(trend.average)));
    text
}
