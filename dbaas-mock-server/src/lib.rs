//! In-memory implementation of the DBaaS admin API.
//!
//! Serves the databases/regions collections plus two test-support
//! endpoints (`/api/v1/session` sets a cookie, `/api/v1/echo*` reflect the
//! request) so client integration tests can assert credential modes, body
//! encodings, and error translation against a real HTTP server.
//!
//! State lives in a mutex-held map; nothing is persisted.

mod routes;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::{any, get, post};
use axum::Router;
use axum_server::Handle;

pub use state::{AppState, DbRecord};

/// Build the API router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/databases",
            get(routes::databases::list).post(routes::databases::create),
        )
        .route(
            "/api/v1/databases/{id}",
            get(routes::databases::retrieve)
                .put(routes::databases::update)
                .delete(routes::databases::remove),
        )
        .route(
            "/api/v1/databases/{id}/reconfigure",
            post(routes::databases::reconfigure),
        )
        .route(
            "/api/v1/databases/{id}/activate",
            post(routes::databases::activate),
        )
        .route("/api/v1/regions", get(routes::regions::list))
        .route("/api/v1/session", post(routes::session::open))
        .route("/api/v1/echo", any(routes::echo::raw))
        .route("/api/v1/echo/multipart", post(routes::echo::multipart))
        .with_state(state)
}

/// A running mock API server.
///
/// Binds an ephemeral port on `127.0.0.1`. When dropped, the server shuts
/// down gracefully.
pub struct MockApi {
    handle: Handle,
    socket: SocketAddr,
    state: AppState,
}

impl MockApi {
    /// Start a server with empty state.
    pub async fn run() -> anyhow::Result<Self> {
        Self::run_with_state(AppState::new()).await
    }

    /// Start a server over pre-seeded state.
    pub async fn run_with_state(state: AppState) -> anyhow::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let socket = listener.local_addr()?;
        let handle = Handle::new();

        let app = router(state.clone()).into_make_service();
        let server_handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = axum_server::from_tcp(listener)
                .handle(server_handle)
                .serve(app)
                .await
            {
                tracing::error!("mock api server stopped: {e}");
            }
        });

        Ok(Self {
            handle,
            socket,
            state,
        })
    }

    /// The socket the server listens on.
    pub fn listen_socket(&self) -> SocketAddr {
        self.socket
    }

    /// The server's base URL, e.g. `http://127.0.0.1:49152`.
    pub fn url(&self) -> String {
        format!("http://{}", self.socket)
    }

    /// The shared state, for seeding and direct inspection in tests.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.graceful_shutdown(Some(Duration::from_secs(1)));
    }
}
