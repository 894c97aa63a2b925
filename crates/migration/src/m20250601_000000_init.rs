//! Initial schema migration.
//!
//! - `expenses`: one row per recorded expense, `date` as `YYYY-MM-DD` text
//! - `settings`: named scalar values (`monthly_limit`)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Amount,
    Category,
    Date,
}

#[derive(Iden)]
enum Settings {
    Table,
    Key,
    Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::Category).text().not_null())
                    .col(ColumnDef::new(Expenses::Date).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Every summary query filters on date.
        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Settings::Key).text().not_null().primary_key())
                    .col(ColumnDef::new(Settings::Value).text())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        Ok(())
    }
}
