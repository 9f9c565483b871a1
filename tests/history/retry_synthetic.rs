use httpmock::Method::GET;
use std::sync::Arc;
use std::time::Duration;
use tickerboard::{DashError, ErrorKind, Period};

use crate::common::{RecordingSleeper, client_builder, setup_server};

#[tokio::test]
async fn history_retries_rate_limit_until_exhausted() {
    let server = setup_server();
    let sym = "BUSY";

    let fail_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(429).body("Too Many Requests");
    });

    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_builder(&server)
        .sleeper(sleeper.clone())
        .build()
        .unwrap();

    let err = client.fetch_history(sym, Period::M1).await.unwrap_err();

    // Default policy: three attempts in total, two backoff sleeps of 1s then 2s.
    fail_mock.assert_calls(3);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
    assert!(matches!(err, DashError::RateLimited { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::RemoteUnavailable);
}

#[tokio::test]
async fn history_does_not_retry_server_errors() {
    let server = setup_server();
    let sym = "DOWN";

    let fail_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(503).body("Service Unavailable");
    });

    let sleeper = Arc::new(RecordingSleeper::default());
    let client = client_builder(&server)
        .sleeper(sleeper.clone())
        .build()
        .unwrap();

    let result = client.fetch_history(sym, Period::M1).await;

    fail_mock.assert_calls(1);
    assert!(sleeper.delays().is_empty());
    match result {
        Err(DashError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected a Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn history_retry_disabled_makes_single_attempt() {
    let server = setup_server();
    let sym = "BUSY";

    let fail_mock = server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{sym}"));
        then.status(429);
    });

    let client = client_builder(&server)
        .retry_enabled(false)
        .build()
        .unwrap();

    let err = client.fetch_history(sym, Period::M1).await.unwrap_err();

    fail_mock.assert_calls(1);
    assert!(err.is_rate_limited());
}
