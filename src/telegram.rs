//! # Telegram Client Module
//!
//! Raw Bot API calls used by the pipeline: file resolution, file download
//! and the outbound reply. Replies are fire-and-forget — a failed send is
//! logged and dropped, never escalated.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::errors::BotError;

#[derive(Debug, Deserialize)]
struct GetFileResponse {
    #[serde(default)]
    ok: bool,
    result: Option<FileInfo>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: String,
}

/// Resolve a photo's file id to a download URL via `getFile`.
pub async fn get_file_url(
    http: &reqwest::Client,
    config: &Config,
    file_id: &str,
) -> Result<String, BotError> {
    let url = config.telegram_method_url("getFile");
    let response = http
        .get(&url)
        .query(&[("file_id", file_id)])
        .send()
        .await
        .map_err(|e| BotError::FileResolution(format!("getFile request failed: {e}")))?;

    let body: GetFileResponse = response
        .json()
        .await
        .map_err(|e| BotError::FileResolution(format!("getFile response unreadable: {e}")))?;

    match body.result {
        Some(info) if body.ok => {
            debug!(file_id, file_path = %info.file_path, "resolved file path");
            Ok(config.telegram_file_url(&info.file_path))
        }
        _ => Err(BotError::FileResolution(format!(
            "getFile returned no file path for id {file_id}"
        ))),
    }
}

/// Download a file's bytes from the URL produced by [`get_file_url`].
pub async fn download_file(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, BotError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| BotError::FileResolution(format!("file download failed: {e}")))?;

    if !response.status().is_success() {
        return Err(BotError::FileResolution(format!(
            "file download returned status {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| BotError::FileResolution(format!("file body unreadable: {e}")))?;

    debug!(size = bytes.len(), "downloaded file from Telegram");
    Ok(bytes.to_vec())
}

/// Post a plain-text reply to a chat. Best-effort: failures are logged only.
pub async fn send_message(http: &reqwest::Client, config: &Config, chat_id: i64, text: &str) {
    let url = config.telegram_method_url("sendMessage");
    let payload = json!({ "chat_id": chat_id, "text": text });

    match http.post(&url).json(&payload).send().await {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            info!(chat_id, status = %status, response = %body, "sendMessage completed");
        }
        Err(e) => {
            error!(chat_id, error = %e, "failed to send reply");
        }
    }
}
