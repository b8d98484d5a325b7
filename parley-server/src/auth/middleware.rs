use crate::auth::extract_credential;
use crate::signaling::AppState;
use axum::extract::{ConnectInfo, Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::{debug, warn};

/// Route layer that runs the [`crate::AuthGate`] against the TCP peer address
/// and the presented credential.
pub async fn require_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Response {
    let client = addr.to_string();
    let verdict = state
        .auth
        .check(&client, extract_credential(&params, request.headers()));

    match verdict {
        Ok(()) => {
            debug!("Authentication successful for {}", client);
            next.run(request).await
        }
        Err(rejection) => {
            warn!("Rejected {} {}: {}", client, request.uri().path(), rejection);
            rejection.into_response()
        }
    }
}
