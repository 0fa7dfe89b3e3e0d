use anyhow::Result;
use ops_shield::{api::create_routes, Config, RiskService};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ops_shield=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::default();

    tracing::info!(
        listen_addr = %config.listen_addr,
        "Starting ops-shield service"
    );

    let service = Arc::new(RiskService::new());
    let app = create_routes(service);

    let addr: SocketAddr = config.listen_addr.parse()?;
    tracing::info!(?addr, "Ops shield listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
