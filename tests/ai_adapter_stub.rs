// tests/ai_adapter_stub.rs
// Contracts of the completion-client seam: disabled client, mock queue, and
// the AI_TEST_MODE escape hatch. Env-mutating tests are serialized.

use std::sync::Arc;

use resume_matcher::ai::{
    build_client_from_config, CompletionClient, CompletionRequest, DisabledClient, MockClient,
};
use resume_matcher::config::AiConfig;
use serial_test::serial;

fn req<'a>(user: &'a str) -> CompletionRequest<'a> {
    CompletionRequest {
        system: "system prompt",
        user,
        temperature: 0.2,
        max_tokens: 64,
    }
}

#[tokio::test]
async fn disabled_client_returns_none() {
    let client = DisabledClient;
    let res = client.complete(&req("Extract this resume.")).await;
    assert!(res.is_none(), "disabled client must always return None");
    assert_eq!(client.provider_name(), "disabled");
}

#[tokio::test]
async fn mock_queue_drains_then_degrades() {
    let client: Arc<dyn CompletionClient> = Arc::new(MockClient::new([r#"{"skills": ["Rust"]}"#]));
    assert!(client.complete(&req("first")).await.is_some());
    assert!(client.complete(&req("second")).await.is_none());
}

#[test]
#[serial]
fn factory_disabled_config_builds_disabled_client() {
    std::env::remove_var("AI_TEST_MODE");
    let cfg = AiConfig::default();
    let client = build_client_from_config(&cfg);
    assert_eq!(client.provider_name(), "disabled");
}

#[test]
#[serial]
fn factory_unknown_provider_degrades_to_disabled() {
    std::env::remove_var("AI_TEST_MODE");
    let cfg = AiConfig {
        enabled: true,
        provider: "claude".into(),
        model: None,
        api_key: "key".into(),
    };
    let client = build_client_from_config(&cfg);
    assert_eq!(client.provider_name(), "disabled");
}

#[test]
#[serial]
fn factory_openai_provider_when_enabled() {
    std::env::remove_var("AI_TEST_MODE");
    let cfg = AiConfig {
        enabled: true,
        provider: "openai".into(),
        model: Some("gpt-4o".into()),
        api_key: "sk-test".into(),
    };
    let client = build_client_from_config(&cfg);
    assert_eq!(client.provider_name(), "openai");
}

#[test]
#[serial]
fn test_mode_mock_overrides_config() {
    std::env::set_var("AI_TEST_MODE", "mock");
    let cfg = AiConfig {
        enabled: true,
        provider: "openai".into(),
        model: None,
        api_key: "sk-test".into(),
    };
    let client = build_client_from_config(&cfg);
    assert_eq!(client.provider_name(), "mock");
    std::env::remove_var("AI_TEST_MODE");
}
