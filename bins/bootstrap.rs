use std::io::Write;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / DATABASE_URL / DB_DEBUG take effect
    dotenv().ok();
    // stdout carries only the result lines
    common::utils::logging::init_logging_stderr();
    info!(service = "bootstrap", event = "logger_init", "tracing subscriber initialized");
}

async fn create_database() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::test_connection(&db).await?;
    models::db::create_schema(&db).await?;
    Ok(())
}

fn report(out: &mut impl Write, res: &anyhow::Result<()>) -> std::io::Result<()> {
    match res {
        Ok(()) => writeln!(out, "Database created"),
        Err(e) => writeln!(out, "[E] Failed to create database: {}", e),
    }
}

/// Creates any missing document tables.
///
/// The printed line is the result: failures are reported but the process
/// still exits successfully.
fn main() -> std::process::ExitCode {
    init_logging();

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "bootstrap", event = "start", %run_id, version, "schema bootstrap starting");
    println!("Creating database");

    let res = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt.block_on(create_database()),
        Err(e) => {
            error!(service = "bootstrap", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            Err(e.into())
        }
    };

    match &res {
        Ok(()) => info!(service = "bootstrap", event = "done", %run_id, "schema bootstrap finished"),
        Err(e) => error!(service = "bootstrap", event = "failed", %run_id, error = %e, "schema bootstrap failed"),
    }
    let _ = report(&mut std::io::stdout().lock(), &res);

    std::process::ExitCode::SUCCESS
}
