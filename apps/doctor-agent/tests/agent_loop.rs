//! Tool-use round trips against mocked Anthropic and registry servers.

use std::sync::Arc;
use std::time::Duration;

use doctor_agent::anthropic::{AnthropicConfig, MessagesClient};
use doctor_agent::{AgentError, DoctorAgent, repl};
use nppes_async::{Client, NppesConfig};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_for(anthropic: &MockServer, registry: &MockServer) -> DoctorAgent {
    let nppes = Client::with_config(
        NppesConfig::new()
            .with_api_base(format!("{}/api", registry.uri()))
            .with_request_timeout(Duration::from_secs(2)),
    )
    .unwrap();
    let tools = Arc::new(doctor_search::build_registry(Arc::new(nppes)));

    let config = AnthropicConfig::new(SecretString::from("sk-test".to_string()))
        .with_api_base(anthropic.uri());
    let client = MessagesClient::new(config).unwrap();
    DoctorAgent::new(client, tools).with_model("test-model")
}

fn tool_use_reply() -> serde_json::Value {
    json!({
        "id": "msg_1",
        "model": "test-model",
        "stop_reason": "tool_use",
        "content": [
            {"type": "text", "text": "Let me look that up."},
            {
                "type": "tool_use",
                "id": "toolu_1",
                "name": "search_doctors",
                "input": {"specialty": "Cardiologist", "city": "Austin", "state": "TX"}
            }
        ]
    })
}

fn final_reply(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_2",
        "model": "test-model",
        "stop_reason": "end_turn",
        "content": [{"type": "text", "text": text}]
    })
}

async fn mount_registry(registry: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("taxonomy_description", "Cardiovascular Disease"))
        .and(query_param("city", "Austin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result_count": 1,
            "results": [{
                "number": 1_234_567_890_u64,
                "basic": {"first_name": "JANE", "last_name": "DOE", "credential": "MD"},
                "taxonomies": [{"desc": "Cardiovascular Disease", "primary": true}]
            }]
        })))
        .expect(1)
        .mount(registry)
        .await;
}

#[tokio::test]
async fn tool_use_round_trip_produces_final_answer() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    mount_registry(&registry).await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(body_string_contains("tool_result"))
        .and(body_string_contains("JANE"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(final_reply("Dr. Jane Doe, MD in Austin.")),
        )
        .with_priority(1)
        .expect(1)
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("search_doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_reply()))
        .expect(1)
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let answer = agent
        .run_turn("Find me a cardiologist in Austin, TX")
        .await
        .unwrap();

    assert_eq!(answer, "Dr. Jane Doe, MD in Austin.");
    // user, assistant(tool_use), user(tool_result), assistant(text)
    assert_eq!(agent.history().len(), 4);

    let first = &anthropic.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&first.body).unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["tools"][0]["name"], "search_doctors");
    assert!(body["system"].as_str().unwrap().contains("Cardiologist -> Cardiovascular Disease"));
}

#[tokio::test]
async fn tool_failure_is_reported_to_the_model() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&registry)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("\"is_error\":true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(final_reply("The registry is unavailable.")),
        )
        .with_priority(1)
        .expect(1)
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_reply()))
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let answer = agent.run_turn("cardiologists in Austin").await.unwrap();
    assert_eq!(answer, "The registry is unavailable.");
}

#[tokio::test]
async fn endless_tool_use_is_bounded() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&registry)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_reply()))
        .expect(2)
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry).with_max_iterations(2);
    let err = agent.run_turn("loop forever").await.unwrap_err();
    assert!(matches!(err, AgentError::MaxIterations(2)));
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn api_error_leaves_history_untouched() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let err = agent.run_turn("hello").await.unwrap_err();
    assert_eq!(err.to_string(), "API error 401: invalid x-api-key");
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn empty_reply_is_an_error_and_not_replayed() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_empty",
            "model": "test-model",
            "stop_reason": "end_turn",
            "content": []
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&anthropic)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(final_reply("Hello again.")))
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let err = agent.run_turn("hi").await.unwrap_err();
    assert!(matches!(err, AgentError::EmptyReply));
    assert!(agent.history().is_empty());

    let answer = agent.run_turn("hi").await.unwrap();
    assert_eq!(answer, "Hello again.");
    assert_eq!(agent.history().len(), 2);

    let requests = anthropic.received_requests().await.unwrap();
    let last: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = last["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
}

#[tokio::test]
async fn repl_runs_a_turn_then_quits() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(final_reply("Hello there.")))
        .expect(1)
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let input = tokio::io::BufReader::new(&b"\n   \nhi\nQUIT\nnever read\n"[..]);
    let mut out = Vec::new();
    repl::run(&mut agent, input, &mut out, std::future::pending())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(repl::BANNER));
    assert!(text.contains("Agent: Thinking..."));
    assert!(text.contains("Hello there."));
    assert!(text.trim_end().ends_with("Goodbye!"));
    assert_eq!(agent.history().len(), 2);
}

#[tokio::test]
async fn repl_reports_errors_and_continues() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&anthropic)
        .await;

    let mut agent = agent_for(&anthropic, &registry);
    let input = tokio::io::BufReader::new(&b"first\nsecond\n"[..]);
    let mut out = Vec::new();
    repl::run(&mut agent, input, &mut out, std::future::pending())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("An error occurred:").count(), 2);
    assert!(text.contains("API error 500: boom"));
    assert!(text.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn repl_stops_on_shutdown() {
    let anthropic = MockServer::start().await;
    let registry = MockServer::start().await;

    let mut agent = agent_for(&anthropic, &registry);
    let (_tx, rx) = tokio::io::duplex(64);
    let mut out = Vec::new();
    repl::run(
        &mut agent,
        tokio::io::BufReader::new(rx),
        &mut out,
        std::future::ready(()),
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.trim_end().ends_with("Goodbye!"));
    assert!(anthropic.received_requests().await.unwrap().is_empty());
}
