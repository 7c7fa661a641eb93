use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_agent::config_manager::{default_config_paths, env_lookup, Config};
use translator_agent::routes;
use translator_agent::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translator_agent=debug,tower_http=debug")),
        )
        .init();

    // Load .env if present
    let _ = dotenvy::dotenv();

    let config_paths = default_config_paths(&env_lookup);
    let (config, _) = Config::discover(&config_paths, &env_lookup)?;

    // A missing credential stops startup here
    let app_state = AppState::new(config.clone(), &env_lookup)?;
    info!(
        "Using provider {} with model {}",
        app_state.llm_provider, app_state.model
    );

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.system_config.socket_addr()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
