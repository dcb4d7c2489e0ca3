mod config;
mod error;
mod handlers;
mod routes;
mod state;

use anyhow::Context;
use axum::http::{header, Method};
use resolver_cli::Resolver;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use routes::post::post_routes;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let resolver = Resolver::with_defaults().context("building HTTP client")?;

    let mut app = post_routes(AppState::new(resolver)).layer(TraceLayer::new_for_http());

    if let Some(origin) = config.client_origin.clone() {
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);
        app = app.layer(cors);
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "post proxy listening");
    axum::serve(listener, app).await?;
    Ok(())
}
