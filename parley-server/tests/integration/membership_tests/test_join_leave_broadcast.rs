use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{TestClient, wait_for_snapshot};

#[tokio::test]
async fn test_join_leave_broadcast() {
    init_tracing();
    let registry = create_test_registry();

    let mut alice = TestClient::join(&registry, "alice").await;
    assert_eq!(alice.expect_user_list().await, vec!["alice"]);

    let mut bob = TestClient::join(&registry, "bob").await;
    assert_eq!(alice.expect_user_list().await, vec!["alice", "bob"]);
    assert_eq!(bob.expect_user_list().await, vec!["alice", "bob"]);

    bob.disconnect();
    assert_eq!(alice.expect_user_list().await, vec!["alice"]);
    bob.expect_closed().await;

    wait_for_snapshot(&registry, &["alice"]).await;
}

#[tokio::test]
async fn test_identity_reusable_after_disconnect() {
    init_tracing();
    let registry = create_test_registry();

    let mut watcher = TestClient::join(&registry, "watcher").await;
    watcher.wait_for_user_list(&["watcher"]).await;

    let mut first = TestClient::join(&registry, "alice").await;
    watcher.wait_for_user_list(&["alice", "watcher"]).await;

    first.disconnect();
    watcher.wait_for_user_list(&["watcher"]).await;

    let mut second = TestClient::join(&registry, "alice").await;
    assert_eq!(second.expect_user_list().await, vec!["alice", "watcher"]);
    watcher.wait_for_user_list(&["alice", "watcher"]).await;
}
