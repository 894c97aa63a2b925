use std::process::ExitCode;

use clap::Parser;
use engine::Engine;
use migration::{Migrator, MigratorTrait};

use crate::{cli::Cli, error::Result, output::Output, settings::Settings};

mod cli;
mod error;
mod output;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::new(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let url = cli
        .database_url
        .clone()
        .unwrap_or_else(|| settings.database.url());
    let db = connect_database(&url).await?;

    let engine = Engine::builder()
        .database(db)
        .clock(settings.clock()?)
        .build()
        .await?;

    cli::dispatch(&engine, cli.command, &Output::new(cli.json)).await
}

async fn connect_database(url: &str) -> Result<sea_orm::DatabaseConnection> {
    tracing::debug!("opening database {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
