//! Corebank service entry point
//!
//! Wiring only: config → logging → database → gateway. All ledger semantics
//! live in [`corebank::store`].

use std::sync::Arc;

use corebank::config::AppConfig;
use corebank::db::Database;
use corebank::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;
    let _guard = init_logging(&config);

    tracing::info!("Starting corebank (env: {})", env);

    let db = Arc::new(Database::connect(&config.postgres_url).await?);
    db.init_schema().await?;
    tracing::info!("Ledger schema ready");

    corebank::gateway::run_server(&config.gateway.host, config.gateway.port, db).await
}
