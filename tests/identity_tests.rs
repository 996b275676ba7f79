//! Metadata-server identity provider against a mock endpoint.

use assistlink::auth::{IdentityProvider, MetadataIdentity};
use assistlink::error::AssistError;
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity(server: &MockServer) -> MetadataIdentity {
    MetadataIdentity::new().with_token_url(format!(
        "{}/computeMetadata/v1/instance/service-accounts/default/token",
        server.uri()
    ))
}

#[tokio::test]
async fn fetches_fresh_token_with_metadata_flavor_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
        .and(header("Metadata-Flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.fresh",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let identity = identity(&server);

    let token = identity.fetch_token().await.expect("token");
    assert_eq!(token.token, "ya29.fresh");
    assert!(token.is_valid_at(Utc::now()));

    // Forced refresh: every call hits the endpoint again.
    identity.fetch_token().await.expect("second token");
}

#[tokio::test]
async fn unreachable_endpoint_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = identity(&server).fetch_token().await.expect_err("fail");
    assert!(matches!(err, AssistError::Authentication(_)));
}

#[tokio::test]
async fn malformed_token_payload_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = identity(&server).fetch_token().await.expect_err("fail");
    assert!(matches!(err, AssistError::Authentication(_)));
}
