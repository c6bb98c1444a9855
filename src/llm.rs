//! Chat-completion backed re-chunker.
//!
//! Sends the emitted text to an OpenAI-compatible chat endpoint and asks for
//! a JSON list of semantic chunks under the token budget. Transport and HTTP
//! failures are collaborator errors; a 200 with an uninterpretable payload is
//! a malformed response, which the caller degrades from locally.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::rechunk::{RechunkRequest, RechunkResponse, Rechunker};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You split documents into semantically coherent chunks. \
Respond with a JSON object of the form {\"chunks\": [\"...\", \"...\"]} where each \
chunk preserves the source text verbatim, keeps the original order, and stays under \
the requested token budget. Do not paraphrase, summarize, or drop text.";

/// Re-chunker backed by a chat-completions endpoint.
pub struct ChatRechunker {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl ChatRechunker {
    /// Build a client against the default endpoint and model.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_MODEL.to_string(), DEFAULT_ENDPOINT.to_string())
    }

    /// Build a client against an explicit endpoint, for compatible servers.
    pub fn with_endpoint(api_key: String, model: String, endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Collaborator(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api_key,
            model,
            endpoint,
            client,
        })
    }
}

impl Rechunker for ChatRechunker {
    fn rechunk(&self, request: &RechunkRequest) -> Result<RechunkResponse> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|e| Error::Collaborator(format!("invalid API key: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_prompt = format!(
            "Split the following text into chunks of at most {} tokens each.\n\n{}",
            request.max_tokens, request.text
        );
        let body = ChatRequest {
            model: &self.model,
            temperature: 0.3,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .map_err(|e| Error::Collaborator(format!("chat completion request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(Error::Collaborator(format!(
                "chat endpoint returned {status}: {text}"
            )));
        }

        let raw = resp
            .text()
            .map_err(|e| Error::Collaborator(format!("failed to read response body: {e}")))?;
        let Ok(parsed) = serde_json::from_str::<ChatResponse>(&raw) else {
            return Ok(RechunkResponse::Malformed(raw));
        };
        let Some(content) = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
        else {
            return Ok(RechunkResponse::Malformed(raw));
        };

        debug!(content_len = content.len(), "chat re-chunker replied");
        match parse_chunk_list(&content) {
            Some(pieces) => Ok(RechunkResponse::Pieces(pieces)),
            None => Ok(RechunkResponse::Malformed(content)),
        }
    }
}

/// Interpret model output as a list of chunk strings.
///
/// Accepts a bare JSON array of strings, or an object whose single array
/// value holds strings (the prompted `{"chunks": [...]}` shape, keyed
/// however the model chose).
#[must_use]
pub fn parse_chunk_list(content: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(content.trim()).ok()?;
    match value {
        Value::Array(items) => strings_of(items),
        Value::Object(map) => {
            let arrays: Vec<&Value> = map.values().filter(|v| v.is_array()).collect();
            if let [Value::Array(items)] = arrays.as_slice() {
                strings_of(items.clone())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn strings_of(items: Vec<Value>) -> Option<Vec<String>> {
    items
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}
