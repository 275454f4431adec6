//! SQLite store tests against a real database file.
//!
//! Each test gets its own temporary directory, so tests are independent
//! and can run in parallel.

use careerbot::config::Config;
use careerbot::db;
use careerbot::error::StoreError;
use careerbot::matcher::{best_matches, ingest_catalog, MatchParams};
use careerbot::migrate;
use careerbot::models::{AgeBracket, CareerRecord, Session};
use careerbot::sqlite_store::SqliteStore;
use careerbot::store::Store;
use sqlx::Connection;
use tempfile::TempDir;

// ─── Helpers ────────────────────────────────────────────────────────

fn test_config(tmp: &TempDir) -> Config {
    let db_path = tmp.path().join("data").join("careerbot.sqlite");
    let config_content = format!(
        r#"
[db]
path = "{}"
"#,
        db_path.display()
    );
    toml::from_str(&config_content).unwrap()
}

async fn test_store(tmp: &TempDir) -> (Config, SqliteStore) {
    let cfg = test_config(tmp);
    migrate::run_migrations(&cfg).await.unwrap();
    let store = SqliteStore::new(db::connect_options(&cfg).unwrap());
    (cfg, store)
}

fn tags(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

async fn session_rows(cfg: &Config) -> i64 {
    let mut conn = db::connect(cfg).await.unwrap();
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();
    n
}

// ─── Sessions ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_migrations_idempotent() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp);
    migrate::run_migrations(&cfg).await.unwrap();
    migrate::run_migrations(&cfg).await.unwrap();
    assert!(cfg.db.path.exists());
}

#[tokio::test]
async fn test_save_then_get_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;

    let saved = tags(&["analytical", "a,b", "analytical"]);
    store.save_session(42, &saved, 3).await.unwrap();

    let session = store.get_session(42).await.unwrap().unwrap();
    assert_eq!(
        session,
        Session {
            user_id: 42,
            tags: saved,
            current: 3,
        }
    );
}

#[tokio::test]
async fn test_save_updates_existing_row() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = test_store(&tmp).await;

    store.save_session(1, &tags(&["a"]), 1).await.unwrap();
    store.save_session(1, &tags(&["a", "b"]), 2).await.unwrap();

    let session = store.get_session(1).await.unwrap().unwrap();
    assert_eq!(session.tags, tags(&["a", "b"]));
    assert_eq!(session.current, 2);
    assert_eq!(session_rows(&cfg).await, 1);
}

#[tokio::test]
async fn test_get_absent_does_not_create_row() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = test_store(&tmp).await;

    assert!(store.get_session(7).await.unwrap().is_none());
    assert_eq!(session_rows(&cfg).await, 0);
}

#[tokio::test]
async fn test_create_or_reset_replaces_session() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;

    store.save_session(9, &tags(&["x", "y"]), 2).await.unwrap();
    let fresh = store.create_or_reset_session(9).await.unwrap();
    assert_eq!(fresh, Session::fresh(9));
    assert_eq!(store.get_session(9).await.unwrap(), Some(Session::fresh(9)));
}

#[tokio::test]
async fn test_clear_absent_is_noop() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = test_store(&tmp).await;

    store.clear_session(123).await.unwrap();
    assert_eq!(session_rows(&cfg).await, 0);

    store.save_session(123, &[], 0).await.unwrap();
    store.clear_session(123).await.unwrap();
    assert!(store.get_session(123).await.unwrap().is_none());
}

#[tokio::test]
async fn test_sessions_survive_new_store_instance() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = test_store(&tmp).await;
    store.save_session(5, &tags(&["creative"]), 1).await.unwrap();
    drop(store);

    let reopened = SqliteStore::new(db::connect_options(&cfg).unwrap());
    let session = reopened.get_session(5).await.unwrap().unwrap();
    assert_eq!(session.tags, tags(&["creative"]));
}

#[tokio::test]
async fn test_corrupt_tag_column_reported() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = test_store(&tmp).await;

    let mut conn = db::connect(&cfg).await.unwrap();
    sqlx::query("INSERT INTO sessions (user_id, tags, current) VALUES (1, 'a,b', 0)")
        .execute(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();

    let err = store.get_session(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_database_directory_is_backend_error() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp);
    let options = db::connect_options(&cfg).unwrap();
    std::fs::remove_dir_all(tmp.path().join("data")).unwrap();

    let store = SqliteStore::new(options);
    let err = store.get_session(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)), "got {:?}", err);
}

// ─── Catalog and matching ───────────────────────────────────────────

fn sample_catalog() -> Vec<CareerRecord> {
    vec![
        CareerRecord::new(
            "Accountant",
            "desc",
            AgeBracket::Under18,
            &["analytical", "detail_oriented"],
        ),
        CareerRecord::new("Artist", "desc", AgeBracket::All, &["creative"]),
    ]
}

#[tokio::test]
async fn test_ingest_twice_keeps_catalog_size() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;

    let first = ingest_catalog(&store, &sample_catalog()).await.unwrap();
    assert_eq!(first.inserted, 2);
    let size = store.career_count().await.unwrap();

    let second = ingest_catalog(&store, &sample_catalog()).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(store.career_count().await.unwrap(), size);
}

#[tokio::test]
async fn test_careers_returned_in_insertion_order() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;

    let catalog = vec![
        CareerRecord::new("Zeta", "d", AgeBracket::All, &["t"]),
        CareerRecord::new("Alpha", "d", AgeBracket::Over18, &["t"]),
        CareerRecord::new("Mid", "d", AgeBracket::All, &["t"]),
    ];
    ingest_catalog(&store, &catalog).await.unwrap();

    let careers = store
        .careers_in_brackets(&[AgeBracket::Over18, AgeBracket::All])
        .await
        .unwrap();
    let names: Vec<&str> = careers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    assert!(store.careers_in_brackets(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_best_matches_scenario() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;
    ingest_catalog(&store, &sample_catalog()).await.unwrap();

    store
        .save_session(
            1,
            &tags(&["analytical", "under_18", "detail_oriented"]),
            3,
        )
        .await
        .unwrap();

    let result = best_matches(&store, 1, &MatchParams::default()).await.unwrap();
    let pairs: Vec<(&str, usize)> = result.iter().map(|m| (m.name.as_str(), m.score)).collect();
    assert_eq!(pairs, vec![("Accountant", 2), ("Artist", 0)]);
}

#[tokio::test]
async fn test_best_matches_no_session_is_empty() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;
    ingest_catalog(&store, &sample_catalog()).await.unwrap();

    let result = best_matches(&store, 404, &MatchParams::default()).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_best_matches_ties_keep_catalog_order() {
    let tmp = TempDir::new().unwrap();
    let (_cfg, store) = test_store(&tmp).await;

    let catalog = vec![
        CareerRecord::new("Second Best", "d", AgeBracket::All, &["a"]),
        CareerRecord::new("Also One", "d", AgeBracket::All, &["b"]),
        CareerRecord::new("Top", "d", AgeBracket::All, &["a", "b"]),
    ];
    ingest_catalog(&store, &catalog).await.unwrap();
    store.save_session(1, &tags(&["a", "b"]), 2).await.unwrap();

    let result = best_matches(&store, 1, &MatchParams::default()).await.unwrap();
    let names: Vec<&str> = result.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Top", "Second Best", "Also One"]);
}
