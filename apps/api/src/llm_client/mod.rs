/// LLM Client — the single point of entry for all generative calls in Ascent.
///
/// ARCHITECTURAL RULE: No other module may call the model provider directly.
/// All LLM interactions MUST go through `FallbackClient`.
///
/// One logical generation = a linear scan over an ordered candidate list:
/// first success wins, overloaded models are skipped, any other provider
/// error aborts the scan. No backoff, no racing, at most one attempt per
/// candidate.
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Candidate models tried in order for every generation.
/// The list order is the fallback order — strongest model first.
pub const MODEL_FALLBACK: [&str; 3] = [
    "gemini-2.5-pro",
    "gemini-1.5-pro-latest",
    "gemini-1.5-flash-latest",
];

/// Attachment media types the provider accepts for inline image data.
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Provider-reported capacity/overload. Recovered by advancing to the
    /// next candidate model; never surfaced directly to a caller.
    #[error("model '{model}' unavailable: {message}")]
    ModelUnavailable { model: String, message: String },

    /// Any non-overload provider error. Aborts the scan immediately.
    #[error("model '{model}' failed: {message}")]
    ModelFatal { model: String, message: String },

    /// Every candidate in the list reported overload.
    #[error("all {tried} candidate models are overloaded")]
    AllModelsUnavailable { tried: usize },

    /// Structured parsing failed after a nominally successful generation.
    /// Not retried against another model.
    #[error("malformed model output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// Generation succeeded but carried no usable text.
    #[error("model returned empty content")]
    EmptyContent,
}

impl GenerateError {
    fn is_unavailable(&self) -> bool {
        matches!(self, GenerateError::ModelUnavailable { .. })
    }
}

/// Inline binary payload sent alongside a prompt (e.g. a resume image).
#[derive(Debug, Clone)]
pub struct Attachment {
    pub media_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn is_supported(media_type: &str) -> bool {
        ALLOWED_ATTACHMENT_TYPES.contains(&media_type)
    }
}

/// Raw text returned by whichever model succeeded, plus which model served
/// it. The model name is diagnostic only.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub model: String,
}

/// One attempt to generate text from one named model.
///
/// Implementations classify each failure as `ModelUnavailable` (overload)
/// or `ModelFatal` (everything else) and perform no retries of their own.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<String, GenerateError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini transport
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiInlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Production transport against the Google Generative Language REST API.
pub struct GeminiTransport {
    client: Client,
    api_key: String,
}

impl GeminiTransport {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl GenerationTransport for GeminiTransport {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<String, GenerateError> {
        let mut parts = vec![GeminiPart {
            text: Some(prompt),
            inline_data: None,
        }];
        if let Some(att) = attachment {
            parts.push(GeminiPart {
                text: None,
                inline_data: Some(GeminiInlineData {
                    mime_type: &att.media_type,
                    data: base64::engine::general_purpose::STANDARD.encode(&att.data),
                }),
            });
        }
        let request_body = GeminiRequest {
            contents: vec![GeminiContent { parts }],
        };

        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| classify_failure(model, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(classify_failure(model, Some(status), message));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| classify_failure(model, None, e.to_string()))?;

        parsed.text().ok_or(GenerateError::EmptyContent)
    }
}

/// Splits provider failures into unavailable (advance to next model) and
/// fatal (abort). Typed HTTP 503 is checked first; the substring match is a
/// compatibility shim for gateways that report overload only in the
/// message body.
fn classify_failure(model: &str, status: Option<StatusCode>, message: String) -> GenerateError {
    let overloaded = status == Some(StatusCode::SERVICE_UNAVAILABLE)
        || message.contains("overloaded")
        || message.contains("503");
    if overloaded {
        GenerateError::ModelUnavailable {
            model: model.to_string(),
            message,
        }
    } else {
        GenerateError::ModelFatal {
            model: model.to_string(),
            message,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// The shared generation client: an injected transport plus an ordered,
/// non-empty candidate list. Every call constructs its own scan; there is
/// no state shared between invocations.
#[derive(Clone)]
pub struct FallbackClient {
    transport: Arc<dyn GenerationTransport>,
    models: Vec<String>,
}

impl FallbackClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, models: Vec<String>) -> Self {
        Self { transport, models }
    }

    /// Production client: Gemini transport with the standard fallback list.
    pub fn gemini(api_key: String) -> Self {
        Self::new(
            Arc::new(GeminiTransport::new(api_key)),
            MODEL_FALLBACK.iter().map(|m| m.to_string()).collect(),
        )
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Returns the first successful generation, trying each candidate model
    /// once in order. Overloaded models are skipped; any other failure
    /// aborts immediately.
    pub async fn generate(&self, prompt: &str) -> Result<Generation, GenerateError> {
        self.generate_inner(prompt, None).await
    }

    /// Multimodal variant carrying an inline attachment.
    pub async fn generate_with_attachment(
        &self,
        prompt: &str,
        attachment: &Attachment,
    ) -> Result<Generation, GenerateError> {
        self.generate_inner(prompt, Some(attachment)).await
    }

    async fn generate_inner(
        &self,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<Generation, GenerateError> {
        for model in &self.models {
            match self.transport.generate(model, prompt, attachment).await {
                Ok(text) => {
                    debug!("Generation served by model {model}");
                    return Ok(Generation {
                        text,
                        model: model.clone(),
                    });
                }
                Err(e) if e.is_unavailable() => {
                    warn!("Model {model} unavailable, advancing to next candidate: {e}");
                }
                Err(e) => return Err(e),
            }
        }
        Err(GenerateError::AllModelsUnavailable {
            tried: self.models.len(),
        })
    }

    /// Convenience method that generates and parses the text as JSON.
    /// The prompt must instruct the model to return valid JSON; stray code
    /// fences are stripped before parsing. A parse failure is terminal and
    /// is not retried against another model.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
    ) -> Result<T, GenerateError> {
        let generation = self.generate(prompt).await?;
        let text = strip_code_fences(&generation.text);
        serde_json::from_str(text).map_err(GenerateError::MalformedOutput)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// Idempotent: stripping already-stripped text yields the same text.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted transport: returns the next outcome per call and records
    /// which models were attempted.
    struct MockTransport {
        outcomes: Mutex<Vec<Result<String, GenerateError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(outcomes: Vec<Result<String, GenerateError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationTransport for MockTransport {
        async fn generate(
            &self,
            model: &str,
            _prompt: &str,
            _attachment: Option<&Attachment>,
        ) -> Result<String, GenerateError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn unavailable(model: &str) -> GenerateError {
        GenerateError::ModelUnavailable {
            model: model.to_string(),
            message: "The model is overloaded. Please try again later.".to_string(),
        }
    }

    fn fatal(model: &str) -> GenerateError {
        GenerateError::ModelFatal {
            model: model.to_string(),
            message: "API key not valid".to_string(),
        }
    }

    fn client_with(transport: MockTransport) -> (FallbackClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let client = FallbackClient::new(
            transport.clone(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        (client, transport)
    }

    #[tokio::test]
    async fn test_first_model_success_short_circuits() {
        let (client, transport) = client_with(MockTransport::new(vec![Ok("answer".to_string())]));

        let generation = client.generate("prompt").await.unwrap();

        assert_eq!(generation.text, "answer");
        assert_eq!(generation.model, "a");
        assert_eq!(transport.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_falls_through_overloaded_models_in_order() {
        let (client, transport) = client_with(MockTransport::new(vec![
            Err(unavailable("a")),
            Err(unavailable("b")),
            Ok("third time lucky".to_string()),
        ]));

        let generation = client.generate("prompt").await.unwrap();

        assert_eq!(generation.text, "third time lucky");
        assert_eq!(generation.model, "c");
        assert_eq!(transport.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_all_models_unavailable_after_trying_each_once() {
        let (client, transport) = client_with(MockTransport::new(vec![
            Err(unavailable("a")),
            Err(unavailable("b")),
            Err(unavailable("c")),
        ]));

        let err = client.generate("prompt").await.unwrap_err();

        assert!(matches!(
            err,
            GenerateError::AllModelsUnavailable { tried: 3 }
        ));
        assert_eq!(transport.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_fatal_error_aborts_without_trying_remaining_models() {
        let (client, transport) = client_with(MockTransport::new(vec![Err(fatal("a"))]));

        let err = client.generate("prompt").await.unwrap_err();

        assert!(matches!(err, GenerateError::ModelFatal { .. }));
        assert_eq!(transport.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_generate_json_strips_fences_and_parses() {
        let (client, _) = client_with(MockTransport::new(vec![Ok(
            "```json\n{\"a\": 1}\n```".to_string()
        )]));

        let value: serde_json::Value = client.generate_json("prompt").await.unwrap();

        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_generate_json_parse_failure_is_malformed_output() {
        let (client, transport) =
            client_with(MockTransport::new(vec![Ok("not json at all".to_string())]));

        let err = client
            .generate_json::<serde_json::Value>("prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::MalformedOutput(_)));
        // Malformed output is terminal — no second model is attempted.
        assert_eq!(transport.calls(), vec!["a"]);
    }

    #[test]
    fn test_classify_503_status_as_unavailable() {
        let err = classify_failure(
            "m",
            Some(StatusCode::SERVICE_UNAVAILABLE),
            "upstream busy".to_string(),
        );
        assert!(matches!(err, GenerateError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_classify_overloaded_message_as_unavailable() {
        // Compatibility shim: no status, overload only visible in the body.
        let err = classify_failure("m", None, "The model is overloaded.".to_string());
        assert!(matches!(err, GenerateError::ModelUnavailable { .. }));

        let err = classify_failure("m", None, "error 503 from upstream".to_string());
        assert!(matches!(err, GenerateError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_classify_other_errors_as_fatal() {
        let err = classify_failure(
            "m",
            Some(StatusCode::BAD_REQUEST),
            "API key not valid".to_string(),
        );
        assert!(matches!(err, GenerateError::ModelFatal { .. }));
    }

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_is_idempotent() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        let once = strip_code_fences(input);
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn test_attachment_media_types() {
        assert!(Attachment::is_supported("image/png"));
        assert!(Attachment::is_supported("image/jpeg"));
        assert!(!Attachment::is_supported("application/pdf"));
    }
}
