//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Sends the persona's system instruction, the conversation history and the
//! new user message to `generateContent` and returns the first text part of
//! the reply. The API key comes from `GEMINI_API_KEY` or from secret.json.

use async_trait::async_trait;
use hakone_core::config::{ChatSettings, DEFAULT_GEMINI_MODEL};
use hakone_core::error::RemoteCallError;
use hakone_core::reply::{ReplyGenerator, ReplyRequest};
use hakone_infrastructure::storage::{SecretStorage, SecretStorageError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable that takes precedence over secret.json.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Reply generator that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Resolves the API key from the environment, then secret.json.
    ///
    /// The model is taken from secret.json's `model_name` when present,
    /// otherwise from `settings.model`.
    pub fn try_from_env(settings: &ChatSettings) -> Result<Self, RemoteCallError> {
        let storage = SecretStorage::new().ok();
        Self::try_from_sources(std::env::var(API_KEY_ENV).ok(), storage.as_ref(), settings)
    }

    fn try_from_sources(
        env_key: Option<String>,
        storage: Option<&SecretStorage>,
        settings: &ChatSettings,
    ) -> Result<Self, RemoteCallError> {
        let secrets = match storage.map(SecretStorage::load) {
            Some(Ok(config)) => config.gemini,
            Some(Err(SecretStorageError::NotFound(_))) | None => None,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Ignoring unreadable secret file");
                None
            }
        };

        let api_key = env_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| secrets.as_ref().map(|g| g.api_key.clone()))
            .filter(|key| !key.trim().is_empty())
            .ok_or(RemoteCallError::MissingApiKey)?;

        let model = secrets
            .and_then(|g| g.model_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| settings.model.clone());

        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, RemoteCallError> {
        let url = format!("{BASE_URL}/{}:generateContent", self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| RemoteCallError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| RemoteCallError::Parse(format!("Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

impl Default for GeminiApiAgent {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_GEMINI_MODEL)
    }
}

#[async_trait]
impl ReplyGenerator for GeminiApiAgent {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<String, RemoteCallError> {
        if self.api_key.trim().is_empty() {
            return Err(RemoteCallError::MissingApiKey);
        }
        tracing::debug!(
            model = %self.model,
            history_len = request.history.len(),
            "Calling Gemini generateContent"
        );
        self.send_request(&build_request(request)).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    max_output_tokens: u32,
}

fn build_request(request: &ReplyRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|entry| Content::text(Some(entry.role.as_str()), &entry.text))
        .collect();
    contents.push(Content::text(Some("user"), &request.message));

    let system_instruction = Some(request.system_instruction.as_str())
        .filter(|text| !text.trim().is_empty())
        .map(|text| Content::text(None, text));

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            max_output_tokens: request.max_output_tokens,
        },
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, RemoteCallError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(RemoteCallError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn map_http_error(status: StatusCode, body: String) -> RemoteCallError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    RemoteCallError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hakone_core::session::{HistoryEntry, MessageRole};
    use serde_json::json;
    use tempfile::TempDir;

    fn request() -> ReplyRequest {
        ReplyRequest {
            system_instruction: "\nIDENTITY: Izumida Touichirou\n".to_string(),
            history: vec![
                HistoryEntry {
                    role: MessageRole::User,
                    text: "hi".to_string(),
                },
                HistoryEntry {
                    role: MessageRole::Model,
                    text: "Abu!".to_string(),
                },
            ],
            message: "yes".to_string(),
            max_output_tokens: 1000,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request(&request())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "Abu!" }] },
                    { "role": "user", "parts": [{ "text": "yes" }] }
                ],
                "system_instruction": { "parts": [{ "text": "\nIDENTITY: Izumida Touichirou\n" }] },
                "generation_config": { "max_output_tokens": 1000 }
            })
        );
    }

    #[test]
    fn test_blank_system_instruction_is_omitted() {
        let mut req = request();
        req.system_instruction = "   ".to_string();
        let body = serde_json::to_value(build_request(&req)).unwrap();
        assert!(body.get("system_instruction").is_none());
    }

    #[test]
    fn test_extract_joins_text_parts() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Abu! " }, { "text": "Then let's ride!" }] }
            }]
        }))
        .unwrap();
        assert_eq!(extract_text_response(parsed).unwrap(), "Abu! Then let's ride!");
    }

    #[test]
    fn test_extract_without_candidates() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(
            extract_text_response(parsed).unwrap_err(),
            RemoteCallError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_reads_envelope() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err,
            RemoteCallError::Http {
                status: 429,
                message: "RESOURCE_EXHAUSTED: Quota exceeded".to_string(),
            }
        );
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(
            err,
            RemoteCallError::Http {
                status: 502,
                message: "upstream down".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let agent = GeminiApiAgent::default();
        assert_eq!(
            agent.generate_reply(&request()).await.unwrap_err(),
            RemoteCallError::MissingApiKey
        );
    }

    #[test]
    fn test_key_resolution_prefers_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(
            &path,
            r#"{ "gemini": { "api_key": "from-file", "model_name": "gemini-2.5-pro" } }"#,
        )
        .unwrap();
        let storage = SecretStorage::with_path(path);

        let agent = GeminiApiAgent::try_from_sources(
            Some("from-env".to_string()),
            Some(&storage),
            &ChatSettings::default(),
        )
        .unwrap();
        assert_eq!(agent.api_key, "from-env");
        assert_eq!(agent.model(), "gemini-2.5-pro");

        let agent =
            GeminiApiAgent::try_from_sources(None, Some(&storage), &ChatSettings::default()).unwrap();
        assert_eq!(agent.api_key, "from-file");
    }

    #[test]
    fn test_key_resolution_without_any_source() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        let err = GeminiApiAgent::try_from_sources(
            Some("  ".to_string()),
            Some(&storage),
            &ChatSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err, RemoteCallError::MissingApiKey);
    }
}
