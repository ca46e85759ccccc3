use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wayfare_api::{app, AppState};
use wayfare_core::SearchService;
use wayfare_provider::{AmadeusClient, ProviderConfig};
use wayfare_store::{DbClient, PostgresAuditStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wayfare_api=debug,wayfare_core=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wayfare_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let provider = AmadeusClient::new(ProviderConfig {
        base_url: config.provider.base_url.clone(),
        api_key: config.provider.api_key.clone(),
    })
    .expect("Failed to build provider client");

    let search = SearchService::new(
        Arc::new(provider),
        Arc::new(PostgresAuditStore::new(db.pool.clone())),
        config.provider.currency.clone(),
    );

    let app = app(AppState {
        search: Arc::new(search),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
