//! Shared test utilities for integration tests

use std::time::Duration;

use cfproxy_dns::{CfProxyClient, Credentials};
use wiremock::{MockServer, Request};

pub const TEST_USER: &str = "admin@example.com";
pub const TEST_KEY: &str = "test-api-key";

/// Install a test-friendly subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_credentials(endpoint: &str) -> Credentials {
    Credentials::new(TEST_USER, TEST_KEY, endpoint).unwrap()
}

/// Client pointed at the mock server
pub fn test_client(server: &MockServer) -> CfProxyClient {
    init_tracing();
    CfProxyClient::new(test_credentials(&server.uri()), Duration::from_secs(5)).unwrap()
}

/// JSON bodies of every request the server has seen, in arrival order
pub async fn received_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request: &Request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}
