use std::time::Duration;

use reqwest::StatusCode;
use spotauth::server::{CallbackReceiver, MalformedPolicy};
use spotauth::types::{AuthError, AuthorizationResult};
use tokio::time::timeout;

// Bound on every wait so a regression cannot hang the suite.
const TEST_WAIT: Duration = Duration::from_secs(5);

// Helper to bind a receiver on an ephemeral port and build its callback URL
async fn bind_receiver(policy: MalformedPolicy) -> (CallbackReceiver, String) {
    let receiver = CallbackReceiver::bind(0, policy)
        .await
        .expect("failed to bind an ephemeral port");
    let addr = receiver
        .local_addr()
        .expect("listener has no local address");
    let url = format!("http://{}/callback", addr);
    (receiver, url)
}

#[tokio::test]
async fn callback_with_code_yields_code_and_200() {
    let (receiver, url) = bind_receiver(MalformedPolicy::FailFast).await;
    let wait = tokio::spawn(receiver.receive(None));

    let response = reqwest::get(format!("{}?code=XYZ", url))
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("no response body");
    assert!(body.contains("Authorization Successful"));

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(result.unwrap(), AuthorizationResult::Code("XYZ".to_string()));
}

#[tokio::test]
async fn callback_decodes_percent_encoded_code() {
    let (receiver, url) = bind_receiver(MalformedPolicy::FailFast).await;
    let wait = tokio::spawn(receiver.receive(None));

    let response = reqwest::get(format!("{}?code=a%2Fb%3D", url))
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(
        result.unwrap(),
        AuthorizationResult::Code("a/b=".to_string())
    );
}

#[tokio::test]
async fn callback_with_error_yields_error_and_400() {
    let (receiver, url) = bind_receiver(MalformedPolicy::FailFast).await;
    let wait = tokio::spawn(receiver.receive(None));

    let response = reqwest::get(format!("{}?error=access_denied", url))
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The error page must include the error text
    let body = response.text().await.expect("no response body");
    assert!(body.contains("access_denied"));

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(
        result.unwrap(),
        AuthorizationResult::Error("access_denied".to_string())
    );
}

#[tokio::test]
async fn malformed_callback_keeps_waiting_when_configured() {
    let (receiver, url) = bind_receiver(MalformedPolicy::KeepWaiting).await;
    let wait = tokio::spawn(receiver.receive(None));

    // Neither parameter: 400, but the receiver stays alive
    let response = reqwest::get(url.clone())
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await.expect("no response body");
    assert!(body.contains("Invalid Request"));
    assert!(!wait.is_finished());

    // A later well-formed redirect still completes the flow
    let response = reqwest::get(format!("{}?code=second", url))
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(
        result.unwrap(),
        AuthorizationResult::Code("second".to_string())
    );
}

#[tokio::test]
async fn malformed_callback_fails_fast_when_configured() {
    let (receiver, url) = bind_receiver(MalformedPolicy::FailFast).await;
    let wait = tokio::spawn(receiver.receive(None));

    let response = reqwest::get(url).await.expect("callback request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert!(matches!(result, Err(AuthError::MalformedCallback)));
}

#[tokio::test]
async fn receiver_stops_after_first_result() {
    let (receiver, url) = bind_receiver(MalformedPolicy::FailFast).await;
    let wait = tokio::spawn(receiver.receive(None));

    let response = reqwest::get(format!("{}?code=first", url))
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(
        result.unwrap(),
        AuthorizationResult::Code("first".to_string())
    );

    // receive() only returns once the listener has shut down, so a second
    // redirect has nothing to connect to
    assert!(reqwest::get(format!("{}?code=second", url)).await.is_err());
}

#[tokio::test]
async fn receive_times_out_without_callback() {
    let (receiver, _url) = bind_receiver(MalformedPolicy::FailFast).await;

    let result = receiver.receive(Some(Duration::from_millis(200))).await;
    assert!(matches!(result, Err(AuthError::Timeout(_))));
}

#[tokio::test]
async fn bind_fails_when_port_is_taken() {
    let (receiver, _url) = bind_receiver(MalformedPolicy::FailFast).await;
    let port = receiver
        .local_addr()
        .expect("listener has no local address")
        .port();

    let second = CallbackReceiver::bind(port, MalformedPolicy::FailFast).await;
    assert!(matches!(second, Err(AuthError::Bind { .. })));
}

#[tokio::test]
async fn end_to_end_callback_on_fixed_port() {
    // Full scenario on a fixed port: receiver on 9000, one redirect carrying
    // code=XYZ. Skipped if something else holds the port; the ephemeral-port
    // tests above exercise the same path.
    let receiver = match CallbackReceiver::bind(9000, MalformedPolicy::FailFast).await {
        Ok(receiver) => receiver,
        Err(_) => return,
    };
    let wait = tokio::spawn(receiver.receive(Some(TEST_WAIT)));

    let response = reqwest::get("http://127.0.0.1:9000/callback?code=XYZ")
        .await
        .expect("callback request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let result = timeout(TEST_WAIT, wait)
        .await
        .expect("receiver did not resolve in time")
        .expect("receiver task panicked");
    assert_eq!(result.unwrap(), AuthorizationResult::Code("XYZ".to_string()));
}
