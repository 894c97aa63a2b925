use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use engine::Engine;

use crate::{error::Result, output::Output};

#[derive(Parser, Debug)]
#[command(name = "expense_tracker")]
#[command(about = "Record expenses, set a monthly limit and summarize spending")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,

    /// Database connection string; overrides the configured database.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new expense.
    Add(AddArgs),
    /// Replace every field of an existing expense.
    Update(UpdateArgs),
    /// Delete an expense.
    Delete { id: i64 },
    /// Show one expense.
    Show { id: i64 },
    /// List all expenses, newest first.
    List,
    /// Show or set the monthly spending limit.
    Limit(Limit),
    /// Spending per category since a date (default: today, this week, this month).
    Breakdown {
        #[arg(long)]
        since: Option<NaiveDate>,
    },
    /// Spending per month of a year.
    Trend {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Limit status, category windows and this year's trend.
    Summary,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount; thousands separators are allowed (e.g. 1,234.56).
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    #[arg(long)]
    pub category: String,
    /// Expense date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: i64,
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Args, Debug)]
pub struct Limit {
    #[command(subcommand)]
    pub command: LimitCommand,
}

#[derive(Subcommand, Debug)]
pub enum LimitCommand {
    Show,
    /// Save a new limit; 0 disables it.
    Set { value: String },
}

/// Runs one command against the engine and prints its result.
pub async fn dispatch(engine: &Engine, command: Command, out: &Output) -> Result<()> {
    match command {
        Command::Add(args) => {
            let date = args.date.unwrap_or_else(|| engine.today());
            let id = engine
                .add_expense(&args.amount, &args.category, date)
                .await?;
            out.record(&engine.expense(id).await?)?;
        }
        Command::Update(args) => {
            engine
                .update_expense(args.id, &args.amount, &args.category, args.date)
                .await?;
            out.record(&engine.expense(args.id).await?)?;
        }
        Command::Delete { id } => {
            engine.delete_expense(id).await?;
            out.message(&format!("deleted expense {id}"))?;
        }
        Command::Show { id } => out.record(&engine.expense(id).await?)?,
        Command::List => out.records(&engine.list_expenses().await?)?,
        Command::Limit(Limit {
            command: LimitCommand::Show,
        }) => out.limit(&engine.limit_status().await?)?,
        Command::Limit(Limit {
            command: LimitCommand::Set { value },
        }) => {
            engine.set_monthly_limit(&value).await?;
            out.limit(&engine.limit_status().await?)?;
        }
        Command::Breakdown { since: Some(start) } => {
            out.breakdown(start, &engine.category_breakdown(start).await?)?
        }
        Command::Breakdown { since: None } => out.windows(&engine.window_breakdowns().await?)?,
        Command::Trend { year } => {
            let year = year.unwrap_or_else(|| engine.today().year());
            out.trend(&engine.monthly_trend(year).await?)?;
        }
        Command::Summary => out.dashboard(&engine.dashboard().await?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_thousands_separator() {
        let cli = Cli::try_parse_from([
            "expense_tracker",
            "add",
            "--amount",
            "1,234.56",
            "--category",
            "Food",
            "--date",
            "2025-06-05",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.amount, "1,234.56");
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 6, 5));
    }

    #[test]
    fn rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "expense_tracker",
            "update",
            "3",
            "--amount",
            "1",
            "--category",
            "Food",
            "--date",
            "2025-13-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["expense_tracker", "summary", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Summary));
    }
}
