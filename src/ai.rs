use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::models::ChatMessage;

// Prompts matching any of these are refused before reaching the provider and
// the conversation is flagged for review.
const FLAGGED_TERMS: &[&str] = &[
    "fake transcript",
    "forged document",
    "forge my",
    "fake diploma",
    "bribe",
    "plagiarize",
    "plagiarise",
    "write my exam",
];

/// Returns the matched term if the message trips the moderation denylist.
pub fn moderation_flag(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    FLAGGED_TERMS.iter().copied().find(|term| lowered.contains(term))
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Thin wrapper over an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

const SYSTEM_PROMPT: &str = "You are an assistant for an education consultancy. \
Answer questions about scholarships, study-abroad programs and job opportunities \
concisely and honestly.";

impl AiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ApiError::Internal("AI chat is not configured".to_string()))?;

        let mut messages = vec![WireMessage { role: "system", content: SYSTEM_PROMPT }];
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.role.as_str(),
            content: m.content.as_str(),
        }));

        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("AI provider request failed: {}", e);
                ApiError::Internal("AI provider request failed".to_string())
            })?;

        if !response.status().is_success() {
            error!("AI provider returned status {}", response.status());
            return Err(ApiError::Internal("AI provider request failed".to_string()));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse AI provider response: {}", e);
            ApiError::Internal("AI provider returned an unexpected response".to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ApiError::Internal("AI provider returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_catches_flagged_terms_case_insensitively() {
        assert_eq!(moderation_flag("Can you get me a FAKE TRANSCRIPT?"), Some("fake transcript"));
        assert_eq!(moderation_flag("how do I apply for scholarships?"), None);
    }

    #[test]
    fn completion_response_parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Hello");
    }
}
