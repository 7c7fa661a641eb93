use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::stateless_llm_factory::LLMSettings;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::error::{Result, TranslatorError};

/// Longest slice of an error body copied into a provider error.
const ERROR_BODY_LIMIT: usize = 300;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI compatible LLM implementation
/// Talks to `{base_url}/chat/completions` directly over HTTPS
pub struct OpenAICompatibleLLM {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

impl OpenAICompatibleLLM {
    pub fn new(settings: LLMSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            TranslatorError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let endpoint = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        info!(
            "Initialized OpenAICompatibleLLM: model={}, endpoint={}",
            settings.model, endpoint
        );

        Ok(Self {
            client,
            endpoint,
            model: settings.model,
            api_key: settings.api_key,
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, system: &str, input: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            temperature: self.temperature,
        };

        debug!("Sending chat completion ({} chars) to {}", input.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            warn!("Provider returned {}: {}", status, body);
            return Err(TranslatorError::Provider(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                TranslatorError::Provider("response contained no final output".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn_provider(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1/", addr)
    }

    fn settings(base_url: String) -> LLMSettings {
        LLMSettings {
            llm_provider: "openai_compatible_llm".to_string(),
            display_name: "OpenAI-compatible API".to_string(),
            base_url,
            model: "gemini-2.0-flash".to_string(),
            api_key: "test-key".to_string(),
            temperature: None,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    async fn capture(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        captured.lock().unwrap().push((auth, body));
        Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "میں سیکھ رہا ہوں۔" } }]
        }))
    }

    #[tokio::test]
    async fn test_sends_system_and_user_messages() {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route("/v1/chat/completions", post(capture))
            .with_state(captured.clone());
        let llm = OpenAICompatibleLLM::new(settings(spawn_provider(app).await)).unwrap();

        let out = llm
            .chat_completion("You are a translator.", "Translate to Urdu: I am learning.")
            .await
            .unwrap();
        assert_eq!(out, "میں سیکھ رہا ہوں۔");

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (auth, body) = &captured[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-key"));
        assert_eq!(body["model"], "gemini-2.0-flash");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are a translator.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Translate to Urdu: I am learning.");
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let llm = OpenAICompatibleLLM::new(settings(spawn_provider(app).await)).unwrap();

        match llm.chat_completion("sys", "hello").await {
            Err(TranslatorError::Provider(msg)) => assert!(msg.contains("401")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_provider_error() {
        let app = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
        let llm = OpenAICompatibleLLM::new(settings(spawn_provider(app).await)).unwrap();

        assert!(matches!(
            llm.chat_completion("sys", "hello").await,
            Err(TranslatorError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_choices_is_provider_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let llm = OpenAICompatibleLLM::new(settings(spawn_provider(app).await)).unwrap();

        match llm.chat_completion("sys", "hello").await {
            Err(TranslatorError::Provider(msg)) => assert!(msg.contains("no final output")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_provider_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "choices": [] }))
            }),
        );
        let mut s = settings(spawn_provider(app).await);
        s.timeout = Some(Duration::from_millis(200));
        let llm = OpenAICompatibleLLM::new(s).unwrap();

        match llm.chat_completion("sys", "hello").await {
            Err(TranslatorError::Provider(msg)) => assert!(msg.contains("timed out")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_provider_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let llm = OpenAICompatibleLLM::new(settings(format!("http://{}/v1", addr))).unwrap();
        assert!(matches!(
            llm.chat_completion("sys", "hello").await,
            Err(TranslatorError::Provider(_))
        ));
    }
}
