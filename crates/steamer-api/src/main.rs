mod auth;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::http::{header, Method};
use sqlx::postgres::PgPoolOptions;
use steamer_community::SteamCommunityClient;
use steamer_resolver::{
    FreshnessPolicy, MemoryProfileStore, PgProfileStore, ProfileResolver, ProfileStore,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use config::Config;
use state::AppState;

const DEFAULT_LOG_FILTER: &str = "steamer_api=info,steamer_resolver=info,steamer_community=info";

#[tokio::main]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // JSON output for Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    info!(
        port = config.port,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        steam_community_url = %config.steam_community_url,
        "Starting steamer-api"
    );

    let store: Arc<dyn ProfileStore> = if config.database_url == "memory" {
        warn!("DATABASE_URL=memory, profiles will not survive a restart");
        Arc::new(MemoryProfileStore::new())
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .expect("Failed to connect to database");
        steamer_db::migrate(&pool)
            .await
            .expect("Failed to run migrations");
        Arc::new(PgProfileStore::new(pool))
    };

    let fetcher = Arc::new(SteamCommunityClient::with_base_url(
        &config.steam_community_url,
    ));
    let resolver = ProfileResolver::new(store, fetcher)
        .with_policy(FreshnessPolicy::new(config.cache_ttl));

    let state = AppState::new(resolver, config.bearer_token.clone());

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(600))
    };

    let app = routes::router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind");

    info!(port = config.port, "Listening");

    axum::serve(listener, app).await.expect("Server failed");
}
