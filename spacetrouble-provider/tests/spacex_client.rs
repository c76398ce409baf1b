use std::time::Duration;

use serde_json::json;
use spacetrouble_core::{CollaboratorError, LaunchProvider};
use spacetrouble_provider::SpacexClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SpacexClient {
    SpacexClient::new(server.uri(), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_lists_launchpads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/launchpads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "5e9e4501f509094ba4566f84",
                "name": "CCSFS SLC 40",
                "full_name": "Cape Canaveral Space Force Station Space Launch Complex 40",
                "locality": "Cape Canaveral",
                "region": "Florida",
                "latitude": 28.5618571,
                "longitude": -80.577366,
                "rockets": ["5e9d0d95eda69973a809d1ec"],
                "status": "active"
            },
            { "id": "5e9e4502f5090995de566f86" }
        ])))
        .mount(&server)
        .await;

    let pads = client_for(&server).list_launchpads().await.unwrap();

    assert_eq!(pads.len(), 2);
    assert_eq!(pads[0].id, "5e9e4501f509094ba4566f84");
    assert_eq!(pads[0].locality.as_deref(), Some("Cape Canaveral"));
    assert_eq!(pads[1].name, None);
}

#[tokio::test]
async fn test_lists_upcoming_launches_skipping_unusable_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/launches/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "62f3b5200f55c50e192a4e6c",
                "name": "Crew-5",
                "launchpad": "5e9e4502f509094188566f88",
                "date_utc": "2022-10-03T05:40:00.000Z",
                "upcoming": true
            },
            { "name": "TBD", "launchpad": null, "date_utc": "2022-11-01T00:00:00.000Z" },
            { "name": "Garbled", "launchpad": "5e9e4502f509094188566f88", "date_utc": "not a date" }
        ])))
        .mount(&server)
        .await;

    let launches = client_for(&server).list_upcoming_launches().await.unwrap();

    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].launchpad_id, "5e9e4502f509094188566f88");
    assert_eq!(launches[0].date_utc.to_rfc3339(), "2022-10-03T05:40:00+00:00");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/launchpads"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).list_launchpads().await.unwrap_err();
    assert!(matches!(err, CollaboratorError::Upstream { status: 503 }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/launchpads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_launchpads().await.unwrap_err();
    assert!(matches!(err, CollaboratorError::Decode(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/launches/upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = SpacexClient::new(server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.list_upcoming_launches().await.unwrap_err();
    assert!(matches!(err, CollaboratorError::Io(_)));
}
