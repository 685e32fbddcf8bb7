use std::time::Duration;

use nppes_async::types::{NpiNumber, RegistryQuery};
use nppes_async::{Client, NppesConfig, NppesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<NppesConfig> {
    let config = NppesConfig::new()
        .with_api_base(format!("{}/api", server.uri()))
        .with_request_timeout(Duration::from_secs(2));
    Client::with_config(config).unwrap()
}

fn mock_registry_response() -> serde_json::Value {
    serde_json::json!({
        "result_count": 1,
        "results": [
            {
                "number": 1_003_000_126_u64,
                "enumeration_type": "NPI-1",
                "basic": {
                    "first_name": "JANE",
                    "last_name": "DOE",
                    "credential": "MD",
                    "gender": "F",
                    "status": "A"
                },
                "addresses": [
                    {
                        "address_purpose": "MAILING",
                        "address_1": "PO BOX 1",
                        "city": "AUSTIN",
                        "state": "TX"
                    },
                    {
                        "address_purpose": "LOCATION",
                        "address_1": "100 CONGRESS AVE",
                        "city": "AUSTIN",
                        "state": "TX",
                        "postal_code": "787011234",
                        "telephone_number": "512-555-0100"
                    }
                ],
                "taxonomies": [
                    { "code": "207RC0000X", "desc": "Cardiovascular Disease", "primary": true },
                    { "code": "207R00000X", "desc": "Internal Medicine", "primary": false }
                ]
            }
        ]
    })
}

#[tokio::test]
async fn search_sends_query_params_and_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("version", "2.1"))
        .and(query_param("limit", "5"))
        .and(query_param("pretty", "True"))
        .and(query_param("last_name", "Doe"))
        .and(query_param("state", "TX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_registry_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = RegistryQuery::new()
        .with_last_name("Doe")
        .with_state("TX")
        .with_limit(5);
    let resp = client.search().create(&query).await.unwrap();

    assert_eq!(resp.result_count, Some(1));
    let items = resp.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].number, Some(NpiNumber::Number(1_003_000_126)));
    assert_eq!(items[0].addresses().len(), 2);
    assert_eq!(items[0].taxonomies().len(), 2);
    let basic = items[0].basic.as_ref().unwrap();
    assert_eq!(basic.credential.as_deref(), Some("MD"));
}

#[tokio::test]
async fn empty_results_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "result_count": 0, "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .search()
        .create(&RegistryQuery::new().with_city("Nowhere"))
        .await
        .unwrap();
    assert!(resp.items().is_empty());
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search()
        .create(&RegistryQuery::new().with_city("Austin"))
        .await
        .unwrap_err();

    match &err {
        NppesError::Api(obj) => {
            assert_eq!(obj.status_code, 503);
            assert_eq!(obj.message, "Service Unavailable");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.is_transport());
}

#[tokio::test]
async fn malformed_body_is_serde_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search()
        .create(&RegistryQuery::new().with_city("Austin"))
        .await
        .unwrap_err();

    assert!(matches!(err, NppesError::Serde(_)), "got {err:?}");
    assert!(err.to_string().contains("<html>oops</html>"));
}

#[tokio::test]
async fn registry_errors_payload_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Errors": [
                {
                    "description": "Field state requires additional search criteria",
                    "field": "state",
                    "number": "07"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search()
        .create(&RegistryQuery::new().with_state("TX"))
        .await
        .unwrap_err();

    assert!(matches!(err, NppesError::Registry(ref e) if e.len() == 1));
    assert!(err.to_string().contains("requires additional search criteria"));
}

#[tokio::test]
async fn slow_registry_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "results": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = NppesConfig::new()
        .with_api_base(format!("{}/api", server.uri()))
        .with_request_timeout(Duration::from_millis(200));
    let client = Client::with_config(config).unwrap();

    let err = client
        .search()
        .create(&RegistryQuery::new().with_city("Austin"))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = NppesConfig::new()
        .with_api_base(format!("{uri}/api"))
        .with_request_timeout(Duration::from_secs(2));
    let client = Client::with_config(config).unwrap();

    let err = client
        .search()
        .create(&RegistryQuery::new().with_city("Austin"))
        .await
        .unwrap_err();
    assert!(matches!(err, NppesError::Reqwest(_)), "got {err:?}");
    assert!(!err.to_string().is_empty());
}
