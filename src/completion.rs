//! # Completion Client Module
//!
//! One-shot YandexGPT completion call: the stored instruction and the user's
//! question are concatenated into a single user-role message with fixed
//! sampling parameters. The first alternative's text is the answer; markdown
//! bold markers are stripped before it reaches the chat.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::BotError;

/// Fixed sampling parameters for every completion call.
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f64 = 0.6;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    model_uri: String,
    completion_options: CompletionOptions,
    messages: Vec<CompletionMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct CompletionMessage {
    role: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    result: Option<CompletionResult>,
}

#[derive(Debug, Deserialize)]
struct CompletionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    message: Option<AlternativeMessage>,
}

#[derive(Debug, Deserialize)]
struct AlternativeMessage {
    #[serde(default)]
    text: String,
}

/// Build the prompt sent to the model: instruction, one space, question.
pub fn build_prompt(instruction: &str, question: &str) -> String {
    format!("{instruction} {question}")
}

/// Remove every markdown bold marker from the model's answer.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

/// Ask the model one question primed with the instruction. Any transport
/// failure, non-success status or empty alternative list comes back as
/// [`BotError::CompletionUnavailable`]; no retry is attempted.
pub async fn ask(
    http: &reqwest::Client,
    config: &Config,
    instruction: &str,
    question: &str,
) -> Result<String, BotError> {
    let request = CompletionRequest {
        model_uri: config.model_uri(),
        completion_options: CompletionOptions {
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        },
        messages: vec![CompletionMessage {
            role: "user".to_string(),
            text: build_prompt(instruction, question),
        }],
    };

    let response = http
        .post(&config.completion_url)
        .header("Authorization", format!("Api-Key {}", config.user_key))
        .header("x-folder-id", &config.folder_id)
        .json(&request)
        .send()
        .await
        .map_err(|e| BotError::CompletionUnavailable(format!("completion request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, response = %body, "completion returned a non-success status");
        return Err(BotError::CompletionUnavailable(format!(
            "completion returned status {status}"
        )));
    }

    let parsed: CompletionResponse = response.json().await.map_err(|e| {
        BotError::CompletionUnavailable(format!("completion response unreadable: {e}"))
    })?;

    let answer = parsed
        .result
        .and_then(|result| result.alternatives.into_iter().next())
        .and_then(|alternative| alternative.message)
        .map(|message| strip_bold_markers(&message.text))
        .ok_or_else(|| {
            BotError::CompletionUnavailable("completion response had no alternatives".to_string())
        })?;

    info!(chars = answer.len(), "completion answer received");
    Ok(answer)
}
