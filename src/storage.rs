//! # Instruction Loader Module
//!
//! Fetches the instruction document from object storage. The document is a
//! small JSON object with an `instruction` field; it is loaded fresh on every
//! invocation, never cached. Any failure along the way is logged and reported
//! as [`BotError::InstructionUnavailable`].

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::BotError;

#[derive(Debug, Deserialize)]
struct InstructionDocument {
    instruction: String,
}

/// Load the priming instruction from the configured bucket and object key.
pub async fn load_instruction(http: &reqwest::Client, config: &Config) -> Result<String, BotError> {
    let url = config.instruction_object_url();
    debug!(url = %url, "loading instruction from object storage");

    let response = http
        .get(&url)
        .header("Authorization", format!("Bearer {}", config.iam_key))
        .send()
        .await
        .map_err(|e| BotError::InstructionUnavailable(format!("storage request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, response = %body, "storage returned a non-success status");
        return Err(BotError::InstructionUnavailable(format!(
            "storage returned status {status}"
        )));
    }

    let body = response.text().await.map_err(|e| {
        BotError::InstructionUnavailable(format!("storage body unreadable: {e}"))
    })?;

    let document: InstructionDocument = serde_json::from_str(&body).map_err(|e| {
        BotError::InstructionUnavailable(format!("instruction document malformed: {e}"))
    })?;

    // An empty instruction cannot prime the model; treat it as missing.
    if document.instruction.is_empty() {
        return Err(BotError::InstructionUnavailable(
            "instruction field is empty".to_string(),
        ));
    }

    debug!(chars = document.instruction.len(), "instruction loaded");
    Ok(document.instruction)
}
