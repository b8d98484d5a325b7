use parley_server::RegistrySettings;

use crate::integration::{create_test_registry_with, init_tracing};
use crate::utils::{StalledWriter, TestClient, join_frame, offer_to};

#[tokio::test]
async fn test_stalled_peer_does_not_block() {
    init_tracing();
    let registry = create_test_registry_with(RegistrySettings {
        queue_capacity: 4,
        ..RegistrySettings::default()
    });

    // `slow` is admitted but never drains a single frame.
    let (slow, reader, _) = TestClient::pair("slow");
    slow.send_raw(&join_frame("slow"));
    let session = registry
        .admit(reader, StalledWriter)
        .await
        .expect("slow should be admitted");
    tokio::spawn(session.run());

    let mut alice = TestClient::join(&registry, "alice").await;
    alice.wait_for_user_list(&["alice", "slow"]).await;

    for i in 0..100 {
        alice.send(offer_to("slow", &format!("flood-{i}")));
    }

    let mut bob = TestClient::join(&registry, "bob").await;
    bob.wait_for_user_list(&["alice", "bob", "slow"]).await;

    alice.send(offer_to("bob", "after the flood"));
    let offer = bob.expect_message().await;
    assert_eq!(offer["payload"]["sdp"], "after the flood");

    // Full queues drop frames, they do not evict the peer.
    assert!(registry.is_connected("slow"));
}
