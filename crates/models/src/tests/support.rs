use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::{connect_with_config, create_schema, test_connection, DatabaseConfig};

/// Connected, migrated database, or `None` when the tests should be skipped.
///
/// Skips when `SKIP_DB_TESTS` is set or no server answers at `DATABASE_URL`.
pub async fn live_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.connect_timeout_secs = 3;
    cfg.acquire_timeout_secs = 3;
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = test_connection(&db).await {
        eprintln!("skip: db not answering: {}", e);
        return None;
    }
    if let Err(e) = create_schema(&db).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

/// Suffix that keeps keys from different runs apart.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Positive id unlikely to collide with other runs.
pub fn unique_user_id() -> i64 {
    (Uuid::new_v4().as_u128() & 0x3fff_ffff_ffff_ffff) as i64
}
