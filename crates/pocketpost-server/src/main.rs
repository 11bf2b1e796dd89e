use std::sync::Arc;

use pocketpost_server::config::ServerConfig;
use pocketpost_server::storage::Storage;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pocketpost_server=debug".into()),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting PocketPost entry service");

    let config = ServerConfig::from_env().expect("Failed to load configuration");
    let storage = Arc::new(
        Storage::new(&config.db_path).expect("Failed to open the PocketPost database"),
    );

    let app = pocketpost_server::router(storage);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| panic!("Failed to bind {}: {}", addr, err));
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
