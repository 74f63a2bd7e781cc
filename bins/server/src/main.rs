//! Douane API Server
//!
//! Main entry point for the customs administration backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use douane_api::{AppState, create_router, sydonia::SydoniaStub};
use douane_render::HtmlRenderer;
use douane_shared::{AppConfig, JwtService, jwt::JwtConfig};
use douane_store::{MemoryStore, seed::seed_defaults};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "douane=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Construct the store and seed reference data
    let store = Arc::new(MemoryStore::new());
    seed_defaults(&store).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    info!("Store initialized");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create application state with the collaborators
    let state = AppState {
        store,
        jwt_service: Arc::new(jwt_service),
        renderer: Arc::new(HtmlRenderer::new()),
        declarations: Arc::new(SydoniaStub::new()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
