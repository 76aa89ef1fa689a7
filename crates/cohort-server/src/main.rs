//! Cohort Server — application entry point.
//!
//! Loads configuration, connects to SurrealDB, applies migrations and
//! wires the group service that the API layer is served from.

use cohort_core::AccessPolicy;
use cohort_core::RoleRegistry;
use cohort_db::repository::SurrealGroupRepository;
use cohort_db::{DbConfig, DbManager};
use cohort_service::{GroupService, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cohort=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Cohort server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Cohort server...");

    let db_config = DbConfig::from_env();
    let manager = DbManager::connect(&db_config).await?;
    cohort_db::run_migrations(manager.client()).await?;

    let roles = RoleRegistry::builtin();
    let service_config = ServiceConfig::default();
    tracing::info!(
        default_page_limit = service_config.default_page_limit,
        max_page_limit = service_config.max_page_limit,
        "Group service configured"
    );
    let groups = GroupService::new(
        SurrealGroupRepository::new(manager.client().clone()),
        AccessPolicy::new(roles),
        service_config,
    );

    // TODO: Mount the group service behind the REST API once the HTTP
    // layer crate exists.
    tokio::signal::ctrl_c().await?;

    // The service and its DB handle stay alive until shutdown.
    drop(groups);
    tracing::info!("Cohort server stopped.");
    Ok(())
}
