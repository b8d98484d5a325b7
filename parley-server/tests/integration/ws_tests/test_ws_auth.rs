use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;

use super::{TEST_API_KEY, spawn_server, test_config};
use crate::integration::init_tracing;

fn rejected_status(result: Result<impl Sized, WsError>) -> u16 {
    match result {
        Err(WsError::Http(response)) => response.status().as_u16(),
        Err(e) => panic!("expected an HTTP rejection, got {e}"),
        Ok(_) => panic!("expected the upgrade to be rejected"),
    }
}

#[tokio::test]
async fn test_missing_or_wrong_key_rejected() {
    init_tracing();
    let addr = spawn_server(test_config()).await;

    let missing = connect_async(format!("ws://{addr}/ws")).await;
    assert_eq!(rejected_status(missing), 401);

    let wrong = connect_async(format!("ws://{addr}/ws?api_key=nope")).await;
    assert_eq!(rejected_status(wrong), 401);
}

#[tokio::test]
async fn test_key_accepted_from_query_header_or_bearer() {
    init_tracing();
    let addr = spawn_server(test_config()).await;

    let (_query, _) = connect_async(format!("ws://{addr}/ws?api_key={TEST_API_KEY}"))
        .await
        .expect("query key should be accepted");

    let mut request = format!("ws://{addr}/ws").into_client_request().unwrap();
    request
        .headers_mut()
        .insert("X-API-Key", TEST_API_KEY.parse().unwrap());
    let (_header, _) = connect_async(request)
        .await
        .expect("X-API-Key header should be accepted");

    let mut request = format!("ws://{addr}/ws").into_client_request().unwrap();
    request.headers_mut().insert(
        "Authorization",
        format!("Bearer {TEST_API_KEY}").parse().unwrap(),
    );
    let (_bearer, _) = connect_async(request)
        .await
        .expect("bearer token should be accepted");
}

#[tokio::test]
async fn test_address_not_in_allowlist_rejected() {
    init_tracing();
    let config = test_config().with_ip_whitelist(true, vec!["10.1.2.3".to_string()]);
    let addr = spawn_server(config).await;

    // Checked before the key, so even a valid key gets 403.
    let result = connect_async(format!("ws://{addr}/ws?api_key={TEST_API_KEY}")).await;
    assert_eq!(rejected_status(result), 403);
}

#[tokio::test]
async fn test_allowlisted_address_accepted() {
    init_tracing();
    let config = test_config().with_ip_whitelist(true, vec!["127.0.0.1".to_string()]);
    let addr = spawn_server(config).await;

    connect_async(format!("ws://{addr}/ws?api_key={TEST_API_KEY}"))
        .await
        .expect("loopback is allowlisted");
}
