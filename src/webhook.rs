//! # Webhook Dispatcher Module
//!
//! Entry point of the pipeline: parses the inbound update, classifies its
//! content and orchestrates the text and photo flows. Once a message is
//! present the HTTP status is always 200 — every downstream failure maps to
//! a fixed reply for the user and a log line for the operator.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::errors::BotError;
use crate::update::{Command, MessageKind, PhotoSize, Update};
use crate::{completion, ocr, storage, telegram};

/// Canned reply for `/start`.
pub const REPLY_START: &str = "Я помогу подготовить ответ на экзаменационный вопрос по дисциплине \"Операционные системы\".\nПришлите мне фотографию с вопросом или наберите его текстом.";
/// Canned reply for `/help`.
pub const REPLY_HELP: &str =
    "Пришлите текст или фото с экзаменационным вопросом, и я постараюсь вам помочь!";
/// Reply for messages that carry neither text nor a photo.
pub const REPLY_UNSUPPORTED: &str =
    "Я могу обработать только текстовые сообщения или фотографии.";
/// Reply when the photo could not be resolved or downloaded.
pub const REPLY_PHOTO_FAILED: &str = "Не удалось загрузить фотографию.";
/// Reply when OCR failed or recognized nothing.
pub const REPLY_NO_TEXT_FOUND: &str = "Я не смог распознать текст с этой фотографии.";
/// Reply when the instruction document could not be loaded.
pub const REPLY_NO_INSTRUCTION: &str = "Не удалось загрузить инструкцию для YandexGPT.";
/// Reply when the completion call failed.
pub const REPLY_NO_ANSWER: &str = "Я не смог подготовить ответ на ваш вопрос.";

/// Shared per-process state: the immutable configuration and one HTTP client.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Handle one raw webhook body. Returns 400 only when the body is not valid
/// JSON; every other outcome is 200. Exactly one reply is sent per update,
/// except when the update has no message at all.
pub async fn handle_request(ctx: &AppContext, body: &str) -> (StatusCode, String) {
    let update: Update = match serde_json::from_str(body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "failed to parse inbound update");
            return (StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}"));
        }
    };

    let Some(message) = update.message else {
        info!("update carries no message, nothing to do");
        return (StatusCode::OK, "No message in update".to_string());
    };

    let chat_id = message.chat.id;
    let reply = match message.kind() {
        MessageKind::Command(Command::Start) => {
            info!(chat_id, "handling /start");
            REPLY_START.to_string()
        }
        MessageKind::Command(Command::Help) => {
            info!(chat_id, "handling /help");
            REPLY_HELP.to_string()
        }
        MessageKind::Text(text) => {
            info!(chat_id, "handling text question");
            answer_question(ctx, text).await
        }
        MessageKind::Photo(photos) => {
            info!(chat_id, variants = photos.len(), "handling photo question");
            answer_photo(ctx, photos).await
        }
        MessageKind::Unsupported => {
            info!(chat_id, "unsupported message content");
            REPLY_UNSUPPORTED.to_string()
        }
    };

    telegram::send_message(&ctx.http, &ctx.config, chat_id, &reply).await;
    (StatusCode::OK, "OK".to_string())
}

/// Text-question flow: load the instruction, then ask the model. Each
/// failure short-circuits into its fixed reply.
async fn answer_question(ctx: &AppContext, question: &str) -> String {
    let instruction = match storage::load_instruction(&ctx.http, &ctx.config).await {
        Ok(instruction) => instruction,
        Err(e) => {
            error!(error = %e, "instruction load failed");
            return REPLY_NO_INSTRUCTION.to_string();
        }
    };

    match completion::ask(&ctx.http, &ctx.config, &instruction, question).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(error = %e, "completion failed");
            REPLY_NO_ANSWER.to_string()
        }
    }
}

/// Photo flow: resolve and download the largest variant, recognize its text,
/// then run the text-question flow over the recognized words.
async fn answer_photo(ctx: &AppContext, photos: &[PhotoSize]) -> String {
    // Variants are ordered by size, largest last.
    let Some(largest) = photos.last() else {
        warn!("photo message with an empty variant list");
        return REPLY_PHOTO_FAILED.to_string();
    };

    let image = match fetch_photo(ctx, &largest.file_id).await {
        Ok(image) => image,
        Err(e) => {
            error!(error = %e, "photo fetch failed");
            return REPLY_PHOTO_FAILED.to_string();
        }
    };

    let recognized = match ocr::recognize_text(&ctx.http, &ctx.config, &image).await {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => {
            info!("OCR recognized no text in the photo");
            return REPLY_NO_TEXT_FOUND.to_string();
        }
        Err(e) => {
            error!(error = %e, "OCR failed");
            return REPLY_NO_TEXT_FOUND.to_string();
        }
    };

    answer_question(ctx, &recognized).await
}

async fn fetch_photo(ctx: &AppContext, file_id: &str) -> Result<Vec<u8>, BotError> {
    let url = telegram::get_file_url(&ctx.http, &ctx.config, file_id).await?;
    telegram::download_file(&ctx.http, &url).await
}

/// Build the HTTP router exposing the webhook endpoint.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .with_state(ctx)
}

async fn webhook_handler(State(ctx): State<AppContext>, body: String) -> (StatusCode, String) {
    handle_request(&ctx, &body).await
}
