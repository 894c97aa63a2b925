use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Category, Clock, Engine, EngineError, MONTHLY_LIMIT};
use migration::MigratorTrait;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn engine_with_db(today: NaiveDate) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .clock(Clock::Fixed(today))
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn add_then_list_contains_exactly_the_new_record() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;

    let first = engine
        .add_expense("12.50", "Food", date(2025, 6, 10))
        .await
        .unwrap();
    let second = engine
        .add_expense("1,234.56", "transport", date(2025, 7, 1))
        .await
        .unwrap();
    assert_ne!(first, second);

    let all = engine.list_expenses().await.unwrap();
    assert_eq!(all.len(), 2);

    let added: Vec<_> = all.iter().filter(|r| r.id == second).collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].amount, 1234.56);
    assert_eq!(added[0].category, "Transport");
    assert_eq!(added[0].known_category(), Some(Category::Transport));
    assert_eq!(added[0].date, date(2025, 7, 1));
    assert_eq!(added[0].display_amount(), "1,234.56");
}

#[tokio::test]
async fn stored_row_matches_persisted_layout() {
    let (engine, db) = engine_with_db(date(2025, 6, 10)).await;
    let id = engine
        .add_expense("20", "Health", date(2025, 6, 11))
        .await
        .unwrap();

    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            "SELECT amount, category, date FROM expenses WHERE id = ?",
            vec![id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let amount: f64 = row.try_get("", "amount").unwrap();
    let category: String = row.try_get("", "category").unwrap();
    let stored_date: String = row.try_get("", "date").unwrap();
    assert_eq!(amount, 20.0);
    assert_eq!(category, "Health");
    assert_eq!(stored_date, "2025-06-11");
}

#[tokio::test]
async fn add_rejects_past_dates_without_writing() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;
    engine
        .add_expense("5", "Food", date(2025, 6, 10))
        .await
        .unwrap();
    let before = engine.list_expenses().await.unwrap();

    for _ in 0..2 {
        let err = engine
            .add_expense("5", "Food", date(2025, 6, 9))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDate(_)));
        assert!(err.is_validation());
    }

    assert_eq!(engine.list_expenses().await.unwrap(), before);
}

#[tokio::test]
async fn add_rejects_bad_amounts_and_categories() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;
    let today = date(2025, 6, 10);

    for amount in ["", "abc", "0", "-4", "0.00"] {
        let err = engine.add_expense(amount, "Food", today).await.unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidAmount(_)),
            "{amount:?} gave {err:?}"
        );
    }

    for category in ["", "   ", "Select Category"] {
        let err = engine.add_expense("3", category, today).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidCategory(_)));
    }

    assert!(engine.list_expenses().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;
    let id = engine
        .add_expense("10", "Food", date(2025, 6, 10))
        .await
        .unwrap();

    engine
        .update_expense(id, "99.9", "Shopping", date(2025, 8, 2))
        .await
        .unwrap();

    let record = engine.expense(id).await.unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.amount, 99.9);
    assert_eq!(record.known_category(), Some(Category::Shopping));
    assert_eq!(record.date, date(2025, 8, 2));
    assert_eq!(engine.list_expenses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_missing_id_is_not_found_and_changes_nothing() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;
    engine
        .add_expense("10", "Food", date(2025, 6, 10))
        .await
        .unwrap();
    let before = engine.list_expenses().await.unwrap();

    let err = engine
        .update_expense(4242, "1", "Other", date(2025, 6, 10))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("expense 4242".to_string()));
    assert!(err.is_not_found());

    assert_eq!(engine.list_expenses().await.unwrap(), before);
}

#[tokio::test]
async fn update_rejects_past_dates_even_for_existing_past_records() {
    let (engine, db) = engine_with_db(date(2025, 6, 10)).await;
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "INSERT INTO expenses (amount, category, date) VALUES (7.0, 'Food', '2025-01-15')",
    ))
    .await
    .unwrap();
    let old = engine.list_expenses().await.unwrap().remove(0);

    let err = engine
        .update_expense(old.id, "8", "Food", old.date)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));
    assert_eq!(engine.expense(old.id).await.unwrap(), old);
}

#[tokio::test]
async fn list_keeps_rows_with_foreign_categories() {
    let (engine, db) = engine_with_db(date(2025, 6, 10)).await;
    let food = engine
        .add_expense("5", "Food", date(2025, 6, 10))
        .await
        .unwrap();
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "INSERT INTO expenses (amount, category, date) VALUES (7.0, 'Groceries', '2025-06-11')",
    ))
    .await
    .unwrap();

    let all = engine.list_expenses().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Groceries");
    assert_eq!(all[0].known_category(), None);
    assert_eq!(all[1].id, food);
    assert_eq!(all[1].known_category(), Some(Category::Food));

    let foreign = engine.expense(all[0].id).await.unwrap();
    assert_eq!(foreign.category, "Groceries");
    assert_eq!(foreign.amount, 7.0);
}

#[tokio::test]
async fn unmigrated_database_reports_store_errors() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .clock(Clock::Fixed(date(2025, 6, 10)))
        .build()
        .await
        .unwrap();

    let errors = vec![
        engine
            .add_expense("5", "Food", date(2025, 6, 10))
            .await
            .unwrap_err(),
        engine.list_expenses().await.unwrap_err(),
        engine.current_month_total().await.unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, EngineError::Database(_)), "{err:?}");
        assert!(!err.is_validation());
        assert!(!err.is_not_found());
    }
}

#[tokio::test]
async fn delete_twice_is_safe() {
    let (engine, _db) = engine_with_db(date(2025, 6, 10)).await;
    let keep = engine
        .add_expense("1", "Other", date(2025, 6, 10))
        .await
        .unwrap();
    let gone = engine
        .add_expense("2", "Other", date(2025, 6, 11))
        .await
        .unwrap();

    engine.delete_expense(gone).await.unwrap();
    let ids: Vec<i64> = engine
        .list_expenses()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![keep]);

    let err = engine.delete_expense(gone).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        engine.expense(gone).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn list_is_sorted_by_date_descending() {
    let (engine, _db) = engine_with_db(date(2025, 6, 1)).await;
    let a = engine.add_expense("1", "Food", date(2025, 6, 3)).await.unwrap();
    let b = engine.add_expense("2", "Food", date(2025, 7, 1)).await.unwrap();
    let c = engine.add_expense("3", "Food", date(2025, 6, 3)).await.unwrap();
    let d = engine.add_expense("4", "Food", date(2025, 6, 1)).await.unwrap();

    let ids: Vec<i64> = engine
        .list_expenses()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![b, c, a, d]);
}

#[tokio::test]
async fn settings_upsert_overwrites() {
    let (engine, _db) = engine_with_db(date(2025, 6, 1)).await;
    assert_eq!(engine.setting("theme").await.unwrap(), None);

    engine.set_setting("theme", "light").await.unwrap();
    engine.set_setting("theme", "dark").await.unwrap();
    assert_eq!(
        engine.setting("theme").await.unwrap().as_deref(),
        Some("dark")
    );
}

#[tokio::test]
async fn monthly_limit_parses_and_persists() {
    let (engine, _db) = engine_with_db(date(2025, 6, 1)).await;
    assert_eq!(engine.monthly_limit().await.unwrap(), None);

    assert_eq!(engine.set_monthly_limit("1,500").await.unwrap(), 1500.0);
    assert_eq!(engine.monthly_limit().await.unwrap(), Some(1500.0));
    assert_eq!(
        engine.setting(MONTHLY_LIMIT).await.unwrap().as_deref(),
        Some("1500")
    );

    let err = engine.set_monthly_limit("lots").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(engine.monthly_limit().await.unwrap(), Some(1500.0));

    engine.set_monthly_limit("0").await.unwrap();
    assert_eq!(engine.monthly_limit().await.unwrap(), Some(0.0));
}

#[tokio::test]
async fn records_serialize_with_iso_dates() {
    let (engine, _db) = engine_with_db(date(2025, 6, 1)).await;
    let id = engine
        .add_expense("3.5", "Education", date(2025, 6, 2))
        .await
        .unwrap();
    let record = engine.expense(id).await.unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["date"], "2025-06-02");
    assert_eq!(json["category"], "Education");
    assert_eq!(json["amount"], 3.5);
}
