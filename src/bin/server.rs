//! Wayfarer server
//!
//! Serves the realtime relay endpoint and the static browser client.
//! Run with: wayfarer-server

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wayfarer::error::Result;
use wayfarer::flights::{FlightStore, FlightStoreConfig};
use wayfarer::relay::{relay_router, RelayState};
use wayfarer::retrieval::{HttpSearchIndex, RetrievalConfig};
use wayfarer::tools::ToolRouter;

#[derive(Parser, Debug)]
#[command(name = "wayfarer-server")]
#[command(about = "Wayfarer voice travel assistant backend")]
struct Args {
    /// Flight database path
    #[arg(long, env = "WAYFARER_DB_PATH", default_value = "data/flights.db")]
    db_path: String,

    /// Search service endpoint
    #[arg(long, env = "WAYFARER_SEARCH_ENDPOINT")]
    search_endpoint: String,

    /// Search index name
    #[arg(long, env = "WAYFARER_SEARCH_INDEX")]
    search_index: String,

    /// Search service API key
    #[arg(long, env = "WAYFARER_SEARCH_API_KEY")]
    search_api_key: String,

    /// Port to bind
    #[arg(long, env = "WAYFARER_PORT", default_value = "8765")]
    port: u16,

    /// Directory with the static browser client
    #[arg(long, env = "WAYFARER_STATIC_DIR", default_value = "static")]
    static_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // In development, pick up credentials from .env before clap reads env vars
    if std::env::var("RUNNING_IN_PRODUCTION").is_err() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let store = FlightStore::open(FlightStoreConfig {
        db_path: args.db_path.clone(),
    })?;
    tracing::info!("Flight store ready at {}", store.db_path());

    let index = Arc::new(HttpSearchIndex::new(
        args.search_endpoint,
        args.search_index,
        args.search_api_key,
    ));

    let router = Arc::new(ToolRouter::new(store, index, RetrievalConfig::default()));

    let app = relay_router(RelayState::new(router))
        .fallback_service(ServeDir::new(&args.static_dir))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Wayfarer server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
