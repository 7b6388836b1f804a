/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-futures-adapter tests

#![allow(dead_code)]

use std::time::Duration;

use binance_futures_adapter::{Credentials, FuturesClient, RequestOptions};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret-key";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET_KEY)
}

/// Signed client pointed at `base_url`. Build it on a blocking thread.
pub fn signed_client(base_url: &str) -> FuturesClient {
    FuturesClient::builder()
        .credentials(test_credentials())
        .options(RequestOptions::default().with_base_url(base_url))
        .build()
        .expect("client init")
}

/// Anonymous client pointed at `base_url`. Build it on a blocking thread.
pub fn public_client(base_url: &str) -> FuturesClient {
    FuturesClient::builder()
        .options(
            RequestOptions::default()
                .with_base_url(base_url)
                .with_read_timeout(Duration::from_secs(5)),
        )
        .build()
        .expect("client init")
}

/// Run blocking client code off the async test runtime.
///
/// The blocking client owns an internal runtime, so it must be created,
/// used and dropped outside async context.
pub async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// Split a query string into decoded `(name, value)` pairs, keeping order.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect()
}
