//! Gemini `generateContent` over browser fetch.

use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};

use super::completion::{GenerateContent, Role, Turn};
use super::config::ChatConfig;
use super::error::CompletionError;

#[derive(Clone, Debug)]
pub struct GeminiClient {
	api_key: String,
	model: String,
	endpoint: String,
}

#[derive(Serialize)]
struct Part<'a> {
	text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	role: Option<Role>,
	parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
	system_instruction: Content<'a>,
	contents: Vec<Content<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
	fn new(system: &'a str, turns: &'a [Turn]) -> Self {
		Self {
			system_instruction: Content {
				role: None,
				parts: vec![Part { text: system }],
			},
			contents: turns
				.iter()
				.map(|t| Content {
					role: Some(t.role),
					parts: vec![Part { text: &t.text }],
				})
				.collect(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
	text: Option<String>,
}

impl GenerateContentResponse {
	/// Text parts of the first candidate, concatenated. Empty when the model said nothing.
	fn text(&self) -> String {
		self.candidates
			.first()
			.and_then(|c| c.content.as_ref())
			.map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
			.unwrap_or_default()
	}
}

impl GeminiClient {
	/// `None` when no API key is configured.
	pub fn new(config: &ChatConfig) -> Option<Self> {
		let api_key = config.api_key.clone()?;
		Some(Self {
			api_key,
			model: config.model.clone(),
			endpoint: config.endpoint.clone(),
		})
	}

	fn url(&self) -> String {
		format!(
			"{}/models/{}:generateContent",
			self.endpoint.trim_end_matches('/'),
			self.model
		)
	}

	async fn post(&self, body: &GenerateContentRequest<'_>) -> Result<String, CompletionError> {
		let response = Request::post(&self.url())
			.header("x-goog-api-key", &self.api_key)
			.json(body)
			.map_err(|e| CompletionError::Transport(e.to_string()))?
			.send()
			.await
			.map_err(|e| CompletionError::Transport(e.to_string()))?;

		if !response.ok() {
			let status = response.status();
			let body = response.text().await.unwrap_or_default();
			return Err(CompletionError::Status {
				status,
				body: body.chars().take(200).collect(),
			});
		}

		let parsed: GenerateContentResponse = response
			.json()
			.await
			.map_err(|e| CompletionError::Malformed(e.to_string()))?;
		Ok(parsed.text())
	}
}

impl GenerateContent for GeminiClient {
	async fn generate(&self, system: &str, contents: &[Turn]) -> Result<String, CompletionError> {
		self.post(&GenerateContentRequest::new(system, contents)).await
	}
}

/// Browser timer that fires once `limit` has elapsed.
pub fn deadline(limit: Duration) -> TimeoutFuture {
	TimeoutFuture::new(u32::try_from(limit.as_millis()).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn request_body_shape() {
		let turns = vec![Turn::user("hi"), Turn::assistant("hello"), Turn::user("why?")];
		let body = serde_json::to_value(GenerateContentRequest::new("be brief", &turns)).unwrap();
		assert_eq!(
			body,
			json!({
				"systemInstruction": { "parts": [{ "text": "be brief" }] },
				"contents": [
					{ "role": "user", "parts": [{ "text": "hi" }] },
					{ "role": "model", "parts": [{ "text": "hello" }] },
					{ "role": "user", "parts": [{ "text": "why?" }] },
				]
			})
		);
	}

	#[test]
	fn response_text_joins_parts() {
		let parsed: GenerateContentResponse = serde_json::from_value(json!({
			"candidates": [{
				"content": { "role": "model", "parts": [{ "text": "NVLink " }, { "text": "wins." }] },
				"finishReason": "STOP"
			}]
		}))
		.unwrap();
		assert_eq!(parsed.text(), "NVLink wins.");
	}

	#[test]
	fn blocked_response_is_empty_text() {
		let parsed: GenerateContentResponse =
			serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
				.unwrap();
		assert_eq!(parsed.text(), "");
	}

	#[test]
	fn url_uses_model_and_trims_endpoint() {
		let config = ChatConfig {
			api_key: Some("k".into()),
			endpoint: "https://example.test/v1beta/".into(),
			..ChatConfig::default()
		};
		let client = GeminiClient::new(&config).unwrap();
		assert_eq!(
			client.url(),
			"https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
		);
	}

	#[test]
	fn no_key_no_client() {
		assert!(GeminiClient::new(&ChatConfig::default()).is_none());
	}
}
