//! Shared test infrastructure for cloudinfo-images integration tests
//!
//! Provides the recorded catalog fixture and wiremock helpers that serve it
//! at the path the engine is expected to request.

#![allow(dead_code)]

use cloudinfo_images::SearchParams;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Catalog of 22 active images in eu-central-1
pub const ACTIVE_CATALOG: &str = include_str!("../fixtures/active.json");

pub const ACTIVE_IMAGE_COUNT: usize = 22;

pub const CLOUD_AMAZON: &str = "amazon";
pub const REGION_EU_CENTRAL_1: &str = "eu-central-1";

/// Path the engine must request for active amazon images in eu-central-1
pub const ACTIVE_PATH: &str = "/v1/amazon/eu-central-1/images/active.json";

pub const BYOS_REGEX: &str = "suse-sles-15-sp1-byos.*-hvm-ssd-x86_64";
pub const SAPCAL_REGEX: &str = "suse-sles-.*-sapcal.*-hvm-ssd-x86_64";

/// SAP CAL images in ascending publication order
pub const SAPCAL_IDS_ASCENDING: [&str; 3] = [
    "ami-082bfb28e7de47e17",
    "ami-057b6b1654d10ff7b",
    "ami-07dd6bca2aa25c67d",
];

/// SAP CAL images in descending publication order; the two images
/// published on the same day keep their catalog order
pub const SAPCAL_IDS_DESCENDING: [&str; 3] = [
    "ami-057b6b1654d10ff7b",
    "ami-07dd6bca2aa25c67d",
    "ami-082bfb28e7de47e17",
];

/// Search parameters for active amazon images in eu-central-1 served by `server`
pub fn active_params(server: &MockServer) -> SearchParams {
    SearchParams::new(CLOUD_AMAZON, REGION_EU_CENTRAL_1)
        .with_api_version("v1")
        .with_endpoint(server.uri())
}

/// Serve `body` with `status` at `request_path`, expecting exactly one GET
pub async fn mock_catalog(server: &MockServer, request_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(request_path))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Serve the recorded active catalog
pub async fn mock_active_catalog(server: &MockServer) {
    mock_catalog(server, ACTIVE_PATH, 200, ACTIVE_CATALOG).await;
}

/// Start a server that fails the test if it receives any request
pub async fn silent_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}
