//! @ai:module:intent HTTP client for the chat-completion inference endpoint
//! @ai:module:layer infrastructure
//! @ai:module:public_api InferenceClientTrait, HttpInferenceClient, MockInferenceClient
//! @ai:module:stateless false

use crate::answer::{AnswerParser, ParsedAnswer};
use crate::config::{BenchmarkConfig, ModelConfig, PromptConfig, SamplingConfig, TimeoutConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Fixed low temperature for the finalize call of two-phase mode.
const FINALIZE_TEMPERATURE: f64 = 0.1;

/// @ai:intent Trait for asking the model one question (allows mocking)
pub trait InferenceClientTrait: Send + Sync {
    /// @ai:intent Send one question prompt and return the parsed choice
    fn answer(&self, prompt: &str) -> impl std::future::Future<Output = ParsedAnswer> + Send;
}

/// @ai:intent Request body for the chat-completion endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    temperature: f64,
    top_k: u32,
    top_p: f64,
    min_p: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// @ai:intent Response-format hint constraining the reply to one choice letter
/// @ai:effects pure
fn answer_schema() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "answer_choice",
            "schema": {
                "$schema": "http://json-schema.org/draft-07/schema#",
                "title": "AnswerChoice",
                "type": "object",
                "properties": {
                    "answer": {"type": "string", "enum": ["A", "B", "C", "D"]}
                },
                "required": ["answer"],
                "additionalProperties": false
            }
        }
    })
}

/// @ai:intent Client for an OpenAI-style chat-completion server
pub struct HttpInferenceClient {
    http: reqwest::Client,
    parser: AnswerParser,
    model: ModelConfig,
    sampling: SamplingConfig,
    prompts: PromptConfig,
    timeouts: TimeoutConfig,
    silent: bool,
}

impl HttpInferenceClient {
    /// @ai:intent Create a client from the benchmark configuration
    /// @ai:effects pure
    pub fn new(config: &BenchmarkConfig, silent: bool) -> Self {
        Self {
            // Timeouts differ per phase, so they are set per request.
            http: reqwest::Client::new(),
            parser: AnswerParser::new(),
            model: config.model.clone(),
            sampling: config.sampling,
            prompts: config.prompts.clone(),
            timeouts: config.timeouts,
            silent,
        }
    }

    /// @ai:intent Build one request body, merging the configured custom field
    /// @ai:effects pure
    fn build_body(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        constrained: bool,
    ) -> Result<Value> {
        let request = ChatRequest {
            model: &self.model.name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            temperature,
            top_k: self.sampling.top_k,
            top_p: self.sampling.top_p,
            min_p: self.sampling.min_p,
            response_format: constrained.then(answer_schema),
        };

        let mut body =
            serde_json::to_value(&request).context("Failed to serialize request body")?;

        if let Some(field) = &self.prompts.custom_field {
            if let Some(map) = body.as_object_mut() {
                map.insert(field.name.clone(), field.value.clone());
            }
        }

        Ok(body)
    }

    /// @ai:intent POST one request and return the trimmed message content
    /// @ai:effects network
    async fn request_content(&self, body: &Value, timeout: Duration) -> Result<String> {
        let mut request = self
            .http
            .post(&self.model.server_url)
            .timeout(timeout)
            .json(body);

        if let Some(key) = self.model.api_key.as_deref().filter(|key| !key.is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach inference endpoint")?;

        let status = response.status();

        // The endpoint contract requires exactly 200, not just any 2xx.
        if status != reqwest::StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference endpoint returned {}: {}", status, error_text);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to decode inference response")?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .context("Inference response contained no choices")?;

        Ok(choice.message.content.trim().to_string())
    }

    /// @ai:intent One constrained call carrying the full question
    /// @ai:effects network
    async fn single_phase(&self, prompt: &str) -> Result<String> {
        let body = self.build_body(
            &self.prompts.system_prompt,
            prompt,
            self.sampling.temperature,
            true,
        )?;

        self.request_content(&body, self.timeouts.single_phase())
            .await
    }

    /// @ai:intent Free-form reasoning call, then a constrained finalize call
    /// @ai:effects network
    async fn two_phase(&self, prompt: &str) -> Result<String> {
        if !self.silent {
            tracing::info!("Phase 1: reasoning");
        }
        let started = Instant::now();

        let reasoning_body = self.build_body(
            &self.prompts.reasoning_system_prompt,
            prompt,
            self.sampling.temperature,
            false,
        )?;
        let reasoning = self
            .request_content(&reasoning_body, self.timeouts.reasoning_phase())
            .await
            .context("Reasoning phase failed")?;

        if !self.silent {
            tracing::info!(
                "Phase 1 completed in {:.1}s ({} characters)",
                started.elapsed().as_secs_f64(),
                reasoning.len()
            );
            tracing::info!("Phase 2: structured answer");
        }

        let finalize_prompt = format!(
            "Based on the following analysis of the question:\n\n\
             QUESTION: {prompt}\n\n\
             ANALYSIS: {reasoning}\n\n\
             Now choose the final answer."
        );

        let finalize_body = self.build_body(
            &self.prompts.answer_system_prompt,
            &finalize_prompt,
            FINALIZE_TEMPERATURE,
            true,
        )?;
        let content = self
            .request_content(&finalize_body, self.timeouts.single_phase())
            .await
            .context("Finalize phase failed")?;

        if !self.silent {
            tracing::info!("Phase 2 completed");
        }

        Ok(content)
    }
}

impl InferenceClientTrait for HttpInferenceClient {
    /// @ai:intent Run the configured flow; every failure becomes Error
    /// @ai:effects network
    async fn answer(&self, prompt: &str) -> ParsedAnswer {
        let outcome = if self.prompts.use_two_phase {
            self.two_phase(prompt).await
        } else {
            self.single_phase(prompt).await
        };

        match outcome {
            Ok(content) => self.parser.parse(&content),
            Err(error) => {
                tracing::error!("Inference request failed: {:#}", error);
                ParsedAnswer::Error
            }
        }
    }
}

/// @ai:intent Mock client for testing
pub struct MockInferenceClient {
    answer: ParsedAnswer,
    script: Mutex<VecDeque<ParsedAnswer>>,
    panic_marker: Option<String>,
    calls: AtomicUsize,
}

impl MockInferenceClient {
    /// @ai:intent Create a mock that always gives the same answer
    /// @ai:effects pure
    pub fn new(answer: ParsedAnswer) -> Self {
        Self {
            answer,
            script: Mutex::new(VecDeque::new()),
            panic_marker: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// @ai:intent Create a mock that plays scripted answers first, then the fixed one
    /// @ai:effects pure
    pub fn with_script(answer: ParsedAnswer, script: Vec<ParsedAnswer>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::new(answer)
        }
    }

    /// @ai:intent Create a mock that panics when the prompt contains the marker
    /// @ai:effects pure
    pub fn panicking_on(answer: ParsedAnswer, marker: &str) -> Self {
        Self {
            panic_marker: Some(marker.to_string()),
            ..Self::new(answer)
        }
    }

    /// @ai:intent Number of answer calls made so far
    /// @ai:effects pure
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InferenceClientTrait for MockInferenceClient {
    async fn answer(&self, prompt: &str) -> ParsedAnswer {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(marker) = &self.panic_marker {
            if prompt.contains(marker) {
                panic!("mock client failing on marker {marker}");
            }
        }

        let scripted = self.script.lock().await.pop_front();
        scripted.unwrap_or(self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomField;

    fn test_client() -> HttpInferenceClient {
        let mut config = BenchmarkConfig::default();
        config.model.name = "org/test-model".to_string();
        config.prompts.custom_field = Some(CustomField {
            name: "cache_prompt".to_string(),
            value: json!(true),
        });
        HttpInferenceClient::new(&config, true)
    }

    #[test]
    fn test_build_body_carries_messages_and_sampling() {
        let client = test_client();
        let body = client.build_body("sys", "the question", 0.7, true).unwrap();

        assert_eq!(body["model"], "org/test-model");
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["temperature"], json!(0.7));
        assert_eq!(body["top_k"], json!(40));
        assert_eq!(body["top_p"], json!(0.95));
        assert_eq!(body["min_p"], json!(0.05));
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "the question");
    }

    #[test]
    fn test_build_body_merges_custom_field() {
        let client = test_client();
        let body = client.build_body("sys", "q", 0.7, false).unwrap();
        assert_eq!(body["cache_prompt"], json!(true));
    }

    #[test]
    fn test_build_body_schema_only_when_constrained() {
        let client = test_client();

        let constrained = client.build_body("sys", "q", 0.1, true).unwrap();
        assert_eq!(constrained["response_format"]["type"], "json_schema");
        assert_eq!(
            constrained["response_format"]["json_schema"]["name"],
            "answer_choice"
        );

        let free = client.build_body("sys", "q", 0.7, false).unwrap();
        assert!(free.get("response_format").is_none());
    }

    #[test]
    fn test_answer_schema_allows_only_choice_letters() {
        let schema = answer_schema();
        let inner = &schema["json_schema"]["schema"];

        assert_eq!(
            inner["properties"]["answer"]["enum"],
            json!(["A", "B", "C", "D"])
        );
        assert_eq!(inner["required"], json!(["answer"]));
        assert_eq!(inner["additionalProperties"], json!(false));
    }

    #[tokio::test]
    async fn test_mock_client_fixed_answer() {
        let mock = MockInferenceClient::new(ParsedAnswer::C);

        assert_eq!(mock.answer("anything").await, ParsedAnswer::C);
        assert_eq!(mock.answer("anything").await, ParsedAnswer::C);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_script_then_fixed() {
        let mock = MockInferenceClient::with_script(
            ParsedAnswer::A,
            vec![ParsedAnswer::B, ParsedAnswer::Invalid],
        );

        assert_eq!(mock.answer("q").await, ParsedAnswer::B);
        assert_eq!(mock.answer("q").await, ParsedAnswer::Invalid);
        assert_eq!(mock.answer("q").await, ParsedAnswer::A);
        assert_eq!(mock.call_count(), 3);
    }
}
