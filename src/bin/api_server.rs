// src/bin/api_server.rs

use supplement_admin::infra::{config, logging};
use supplement_admin::transport;
use supplement_admin::DatabaseService;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    // --- Store Initialization ---
    let db_path = config::database_path();
    let db_service = DatabaseService::open(&db_path).await?;

    // Schema or seed failures are logged; the server still comes up.
    match db_service.initialize().await {
        Ok(report) => {
            for step in &report.migrations {
                info!(version = step.version(), step = step.name(), "Schema step applied");
            }
            if report.seeded {
                info!("Store was empty; starter dataset written");
            }
        }
        Err(e) => error!(error = %e, "Store initialization failed; continuing"),
    }

    // --- API Server Initialization ---
    let static_dir = config::static_dir();
    if !static_dir.join("index.html").exists() {
        info!(dir = %static_dir.display(), "Client bundle not found; non-API paths will 404");
    }
    let app_state = transport::http::AppState::new(db_service, static_dir);
    let app = transport::http::create_app(app_state);

    let port = config::port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://localhost:{}", port);
    info!("Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
