use anyhow::{Context, Result};
use std::{fs, io::ErrorKind, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use car_rental::{
    config::AppConfig, database, dto::vehicle_dto::NewVehicle, repositories::SqliteStore,
    services::catalog_service::CatalogService, state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + startup actions ---
    let (cfg, actions) = AppConfig::from_env_and_args()?;

    tracing::info!("Starting car-rental with config: {:?}", cfg);

    // --- Initialize SQLite connection ---
    let db = database::connect(&cfg.database_url)
        .await
        .with_context(|| format!("opening database {}", cfg.database_url))?;
    database::run_migrations(&db).await?;

    // --- Handle migration mode ---
    if actions.migrate {
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    let store = Arc::new(SqliteStore::new(Arc::new(db)));
    let state = AppState::with_defaults(store, &cfg);

    if let Some(path) = &actions.seed_catalog {
        seed_catalog(&state.catalog, path).await?;
    }

    // --- Build router ---
    let app = car_rental::app(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Add every vehicle in a JSON array file to the catalog.
async fn seed_catalog(catalog: &CatalogService, path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog seed {}", path.display()))?;
    let vehicles: Vec<NewVehicle> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog seed {}", path.display()))?;

    let count = vehicles.len();
    for vehicle in vehicles {
        let name = vehicle.name.clone();
        catalog
            .add_vehicle(vehicle)
            .await
            .with_context(|| format!("adding vehicle `{name}`"))?;
    }
    tracing::info!("Seeded {} vehicles from {}", count, path.display());
    Ok(())
}
