//! # Configuration Module
//!
//! Process-wide immutable configuration, read once from the environment at
//! startup and passed by reference into every component. Credentials are not
//! validated here; a missing value surfaces as a failed downstream call.

use std::env;

// Default endpoint bases, overridable through the environment for testing.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_COMPLETION_URL: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const DEFAULT_OCR_URL: &str = "https://vision.api.cloud.yandex.net/vision/v1/batchAnalyze";
pub const DEFAULT_STORAGE_BASE: &str = "https://storage.yandexcloud.net";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Immutable configuration for one bot process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token (`TG_BOT_KEY`).
    pub bot_token: String,
    /// Yandex IAM key used for object-storage access (`YANDEX_IAM_KEY`).
    pub iam_key: String,
    /// Yandex API key for the GPT and Vision services (`YANDEX_USER_KEY`).
    pub user_key: String,
    /// Yandex Cloud folder id (`YANDEX_FOLDER_ID`).
    pub folder_id: String,
    /// Object-storage bucket holding the instruction document.
    pub storage_bucket: String,
    /// Object key of the instruction document.
    pub storage_object: String,
    /// Static access key pair for object storage. Kept to preserve the
    /// deployed environment contract; the loader authenticates with the IAM
    /// key instead of signing requests.
    pub storage_access_key: String,
    pub storage_secret_key: String,
    /// Telegram Bot API base, without the `/bot<token>` segment.
    pub telegram_api_base: String,
    /// YandexGPT completion endpoint.
    pub completion_url: String,
    /// Yandex Vision batchAnalyze endpoint.
    pub ocr_url: String,
    /// Object-storage endpoint base.
    pub storage_base: String,
    /// Socket address the webhook server binds to.
    pub bind_addr: String,
}

impl Config {
    /// Read configuration from the environment. Absent credentials become
    /// empty strings and fail later at the call that needs them.
    pub fn from_env() -> Self {
        Self {
            bot_token: env::var("TG_BOT_KEY").unwrap_or_default(),
            iam_key: env::var("YANDEX_IAM_KEY").unwrap_or_default(),
            user_key: env::var("YANDEX_USER_KEY").unwrap_or_default(),
            folder_id: env::var("YANDEX_FOLDER_ID").unwrap_or_default(),
            storage_bucket: env::var("YANDEX_GPT_BUCKET").unwrap_or_default(),
            storage_object: env::var("YANDEX_GPT_OBJECT").unwrap_or_default(),
            storage_access_key: env::var("YANDEX_STORAGE_ACCESS_KEY").unwrap_or_default(),
            storage_secret_key: env::var("YANDEX_STORAGE_SECRET_KEY").unwrap_or_default(),
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string()),
            completion_url: env::var("YANDEX_GPT_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            ocr_url: env::var("YANDEX_VISION_URL").unwrap_or_else(|_| DEFAULT_OCR_URL.to_string()),
            storage_base: env::var("YANDEX_STORAGE_URL")
                .unwrap_or_else(|_| DEFAULT_STORAGE_BASE.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// URL of a Bot API method, e.g. `https://api.telegram.org/bot<token>/sendMessage`.
    pub fn telegram_method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.telegram_api_base, self.bot_token, method)
    }

    /// Download URL for a file path returned by `getFile`.
    pub fn telegram_file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.telegram_api_base, self.bot_token, file_path
        )
    }

    /// Model URI sent with every completion request.
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/yandexgpt-lite/latest", self.folder_id)
    }

    /// URL of the instruction document in object storage.
    pub fn instruction_object_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.storage_base, self.storage_bucket, self.storage_object
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            bot_token: "123:abc".into(),
            iam_key: "iam".into(),
            user_key: "key".into(),
            folder_id: "folder42".into(),
            storage_bucket: "bucket".into(),
            storage_object: "instruction.json".into(),
            storage_access_key: String::new(),
            storage_secret_key: String::new(),
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.into(),
            completion_url: DEFAULT_COMPLETION_URL.into(),
            ocr_url: DEFAULT_OCR_URL.into(),
            storage_base: DEFAULT_STORAGE_BASE.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
        }
    }

    #[test]
    fn telegram_urls_embed_the_token() {
        let config = test_config();
        assert_eq!(
            config.telegram_method_url("getFile"),
            "https://api.telegram.org/bot123:abc/getFile"
        );
        assert_eq!(
            config.telegram_file_url("photos/file_1.jpg"),
            "https://api.telegram.org/file/bot123:abc/photos/file_1.jpg"
        );
    }

    #[test]
    fn model_uri_uses_folder_id() {
        assert_eq!(test_config().model_uri(), "gpt://folder42/yandexgpt-lite/latest");
    }

    #[test]
    fn instruction_url_joins_bucket_and_object() {
        assert_eq!(
            test_config().instruction_object_url(),
            "https://storage.yandexcloud.net/bucket/instruction.json"
        );
    }
}
