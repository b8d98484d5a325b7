use serde_json::json;

use crate::integration::{create_test_registry, init_tracing};
use crate::utils::TestClient;

#[tokio::test]
async fn test_leave_message_unregisters() {
    init_tracing();
    let registry = create_test_registry();

    let mut alice = TestClient::join(&registry, "alice").await;
    let mut bob = TestClient::join(&registry, "bob").await;
    bob.wait_for_user_list(&["alice", "bob"]).await;

    alice.send(json!({"type": "leave"}));

    assert_eq!(bob.expect_user_list().await, vec!["bob"]);
    alice.expect_closed().await;
    assert!(!registry.is_connected("alice"));
}
