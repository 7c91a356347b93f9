use std::net::SocketAddr;

use dbaas_mock_server::{router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let socket = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("mock DBaaS API listening on http://{socket}");

    let listener = std::net::TcpListener::bind(socket)?;
    axum_server::from_tcp(listener)
        .serve(router(AppState::new()).into_make_service())
        .await?;

    Ok(())
}
