use crate::error::AdmissionError;
use crate::registry::RegistryHandle;
use crate::signaling::AppState;
use crate::transport::split_socket;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::{info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry))
}

async fn handle_socket(socket: WebSocket, registry: RegistryHandle) {
    let (reader, writer) = split_socket(socket);

    match registry.admit(reader, writer).await {
        Ok(session) => session.run().await,
        Err(AdmissionError::IdentityTaken(user_id)) => {
            warn!("WebSocket rejected: identity {} already connected", user_id);
        }
        Err(e) => info!("WebSocket rejected: {}", e),
    }
}
