//! Completion-service adapter: provider abstraction over the external
//! structured-completion API, plus disabled/mock clients for local runs and
//! tests.
//!
//! Calls are absorbing by design: any transport error, non-success status,
//! timeout, or empty payload yields `None` and the pipeline takes its
//! deterministic fallback. One attempt per call, no retries.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiConfig;

/// One completion request. The pipeline issues two per analysis at most:
/// extraction (low temperature) and recommendations (higher temperature).
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait object used by the pipeline and tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion. `None` on any failure; never panics or errors out.
    async fn complete(&self, req: &CompletionRequest<'_>) -> Option<String>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynCompletionClient = Arc<dyn CompletionClient>;

/// Factory: build a client according to config and environment.
///
/// * If `AI_TEST_MODE=mock`, returns an empty mock (always `None`, so the
///   deterministic fallback path runs) regardless of config.
/// * Else if `config.enabled == false`, returns a disabled client.
/// * Else builds the real OpenAI-compatible provider.
pub fn build_client_from_config(config: &AiConfig) -> DynCompletionClient {
    if std::env::var("AI_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockClient::new(Vec::<String>::new()));
    }

    if !config.enabled {
        return Arc::new(DisabledClient);
    }

    match config.provider.as_str() {
        "openai" => Arc::new(OpenAiProvider::new(
            config.api_key.clone(),
            config.model.as_deref(),
        )),
        other => {
            warn!(provider = other, "unsupported completion provider, AI path disabled");
            Arc::new(DisabledClient)
        }
    }
}

/// Chat-completions provider. Requires a resolved API key (see `AiConfig`).
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// `model_override`: pass Some("gpt-4o") to override; defaults to gpt-4o-mini.
    pub fn new(api_key: String, model_override: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("resume-matcher/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        let model = model_override.unwrap_or("gpt-4o-mini").to_string();
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiProvider {
    async fn complete(&self, req: &CompletionRequest<'_>) -> Option<String> {
        if self.api_key.is_empty() {
            return None;
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct ResponseFormat<'a> {
            #[serde(rename = "type")]
            kind: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
            response_format: ResponseFormat<'a>,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let body = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: req.system,
                },
                Msg {
                    role: "user",
                    content: req.user,
                },
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let resp = match self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "completion request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "completion request returned non-success");
            return None;
        }

        let parsed: Resp = resp.json().await.ok()?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        if content.is_empty() {
            debug!("completion response had no content");
            None
        } else {
            Some(content.to_string())
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Returns `None` always; used when the AI path is disabled.
pub struct DisabledClient;

#[async_trait]
impl CompletionClient for DisabledClient {
    async fn complete(&self, _req: &CompletionRequest<'_>) -> Option<String> {
        None
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Queue-backed mock for tests: pops one canned payload per call, `None` once
/// drained. An empty queue behaves like `DisabledClient`.
pub struct MockClient {
    responses: Mutex<VecDeque<String>>,
}

impl MockClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    async fn complete(&self, _req: &CompletionRequest<'_>) -> Option<String> {
        self.responses.lock().expect("poisoned mock queue").pop_front()
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Strip markdown code fences the completion service sometimes wraps JSON in.
/// Returns the inner payload trimmed; input without fences passes through.
pub fn strip_code_fences(raw: &str) -> &str {
    let s = raw.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_client_returns_none() {
        let req = CompletionRequest {
            system: "sys",
            user: "user",
            temperature: 0.2,
            max_tokens: 100,
        };
        assert!(DisabledClient.complete(&req).await.is_none());
    }

    #[tokio::test]
    async fn mock_client_pops_in_order_then_none() {
        let mock = MockClient::new(["first", "second"]);
        let req = CompletionRequest {
            system: "sys",
            user: "user",
            temperature: 0.2,
            max_tokens: 100,
        };
        assert_eq!(mock.complete(&req).await.as_deref(), Some("first"));
        assert_eq!(mock.complete(&req).await.as_deref(), Some("second"));
        assert!(mock.complete(&req).await.is_none());
    }

    #[test]
    fn fence_stripping() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }
}
