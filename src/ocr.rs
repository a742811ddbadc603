//! # OCR Module
//!
//! Text recognition through the Yandex Vision `batchAnalyze` endpoint. The
//! image is submitted as base64 with a single TEXT_DETECTION feature, and the
//! deeply nested response is flattened into one space-joined string. Every
//! intermediate level of the response is optional; an absent level simply
//! contributes no words.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::BotError;

/// Recognition locale sent with every request.
pub const OCR_LANGUAGE: &str = "ru";
/// Vision text-detection model.
pub const OCR_MODEL: &str = "page";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    analyze_specs: Vec<AnalyzeSpec>,
    folder_id: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeSpec {
    content: String,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    r#type: String,
    text_detection_config: TextDetectionConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextDetectionConfig {
    language_codes: Vec<String>,
    model: String,
}

/// Top level of a `batchAnalyze` response, one entry per analyze spec.
#[derive(Debug, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub results: Vec<AnalyzeResult>,
}

/// Per-spec results, one entry per requested feature.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub results: Vec<FeatureResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeatureResult {
    #[serde(rename = "textDetection")]
    pub text_detection: Option<TextDetection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextDetection {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub text: String,
}

/// Flatten a recognition response into one string, each word followed by a
/// single space, in result → page → block → line → word order. Only the
/// first feature result of each spec is read. An empty string means the
/// service recognized nothing, which is a valid outcome.
pub fn flatten_response(response: &OcrResponse) -> String {
    let mut text = String::new();
    for result in &response.results {
        let Some(detection) = result
            .results
            .first()
            .and_then(|feature| feature.text_detection.as_ref())
        else {
            continue;
        };
        for page in &detection.pages {
            for block in &page.blocks {
                for line in &block.lines {
                    for word in &line.words {
                        text.push_str(&word.text);
                        text.push(' ');
                    }
                }
            }
        }
    }
    text
}

/// Run text detection over raw image bytes. Transport failures and
/// non-success statuses come back as [`BotError::OcrUnavailable`].
pub async fn recognize_text(
    http: &reqwest::Client,
    config: &Config,
    image: &[u8],
) -> Result<String, BotError> {
    let request = AnalyzeRequest {
        analyze_specs: vec![AnalyzeSpec {
            content: STANDARD.encode(image),
            features: vec![Feature {
                r#type: "TEXT_DETECTION".to_string(),
                text_detection_config: TextDetectionConfig {
                    language_codes: vec![OCR_LANGUAGE.to_string()],
                    model: OCR_MODEL.to_string(),
                },
            }],
        }],
        folder_id: config.folder_id.clone(),
    };

    let response = http
        .post(&config.ocr_url)
        .header("Authorization", format!("Api-Key {}", config.user_key))
        .header("x-folder-id", &config.folder_id)
        .json(&request)
        .send()
        .await
        .map_err(|e| BotError::OcrUnavailable(format!("OCR request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, response = %body, "OCR returned a non-success status");
        return Err(BotError::OcrUnavailable(format!(
            "OCR returned status {status}"
        )));
    }

    let parsed: OcrResponse = response
        .json()
        .await
        .map_err(|e| BotError::OcrUnavailable(format!("OCR response unreadable: {e}")))?;

    let text = flatten_response(&parsed);
    info!(chars = text.len(), "OCR recognition completed");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_field_names() {
        let request = AnalyzeRequest {
            analyze_specs: vec![AnalyzeSpec {
                content: "aGk=".into(),
                features: vec![Feature {
                    r#type: "TEXT_DETECTION".into(),
                    text_detection_config: TextDetectionConfig {
                        language_codes: vec![OCR_LANGUAGE.into()],
                        model: OCR_MODEL.into(),
                    },
                }],
            }],
            folder_id: "folder".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["analyzeSpecs"][0]["content"], "aGk=");
        assert_eq!(value["analyzeSpecs"][0]["features"][0]["type"], "TEXT_DETECTION");
        assert_eq!(
            value["analyzeSpecs"][0]["features"][0]["textDetectionConfig"]["languageCodes"][0],
            "ru"
        );
        assert_eq!(
            value["analyzeSpecs"][0]["features"][0]["textDetectionConfig"]["model"],
            "page"
        );
        assert_eq!(value["folderId"], "folder");
    }
}
