use crate::auth::require_auth;
use crate::signaling::{AppState, ws_handler};
use axum::extract::State;
use axum::http::header;
use axum::routing::get;
use axum::{Json, Router, middleware};
use parley_core::UserId;
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub online_users: usize,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserId>,
}

/// `/ws` and `/users` sit behind the auth gate; `/health` does not.
pub fn router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/ws", get(ws_handler))
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        online_users: state.registry.connection_count(),
    })
}

pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    Json(UsersResponse {
        users: state.registry.snapshot(),
    })
}

/// Serve the signaling routes on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Signaling server listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}
