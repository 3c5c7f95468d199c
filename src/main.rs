use std::sync::Arc;

use disease_risk_api::{
    config::Settings,
    domains::{breast, diabetes, heart},
    handlers::router,
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    info!("Starting Disease Risk Predictor API");

    // All three serving contexts are fitted or loaded up front; a failure
    // here is fatal rather than surfacing as broken predictions later.
    let state = AppState {
        diabetes: Arc::new(diabetes::build(&settings)?),
        heart: Arc::new(heart::build(&settings)?),
        breast: Arc::new(breast::build(&settings)?),
    };

    let app = router(state);
    let addr = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Shutting down Disease Risk Predictor API");
    Ok(())
}
