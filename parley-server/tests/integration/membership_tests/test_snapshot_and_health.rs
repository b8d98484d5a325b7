use axum::extract::State;
use parley_server::{ApiKeyGate, AppState, ServerConfig, health, list_users};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{TestClient, users_of};

#[tokio::test]
async fn test_snapshot_and_health() {
    init_tracing();
    let registry = create_test_registry();
    let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), Some("secret".into()));
    let state = AppState::with_auth(registry.clone(), Arc::new(ApiKeyGate::new(&config)));

    let empty = health(State(state.clone())).await.0;
    assert_eq!(empty.status, "ok");
    assert_eq!(empty.online_users, 0);

    let mut zoe = TestClient::join(&registry, "zoe").await;
    let mut adam = TestClient::join(&registry, "adam").await;
    zoe.wait_for_user_list(&["adam", "zoe"]).await;
    adam.wait_for_user_list(&["adam", "zoe"]).await;

    assert_eq!(health(State(state.clone())).await.0.online_users, 2);
    assert_eq!(users_of(&list_users(State(state)).await.0), vec!["adam", "zoe"]);
}
