use crate::integration::{create_test_registry, init_tracing};
use crate::utils::{TestClient, offer_to};

#[tokio::test]
async fn test_bad_frame_keeps_connection() {
    init_tracing();
    let registry = create_test_registry();

    let alice = TestClient::join(&registry, "alice").await;
    let mut bob = TestClient::join(&registry, "bob").await;
    bob.wait_for_user_list(&["alice", "bob"]).await;

    alice.send_raw("{ this is not json");
    alice.send_raw(r#"{"type":"offer","to":"bob","payload":{"sdp":42}}"#);
    alice.send_raw(r#"{"type":"answer","to":"bob"}"#);
    alice.send(offer_to("bob", "still here"));

    let offer = bob.expect_message().await;
    assert_eq!(offer["payload"]["sdp"], "still here");
    assert!(registry.is_connected("alice"));
    bob.expect_nothing_pending();
}
