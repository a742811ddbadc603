//! # Examly Telegram Bot
//!
//! A webhook-driven Telegram bot that answers exam questions: it accepts a
//! question as plain text or as a photo, recognizes photo text through the
//! Yandex Vision OCR service, and generates an answer with YandexGPT, primed
//! by an instruction document stored in Yandex Object Storage.

pub mod completion;
pub mod config;
pub mod errors;
pub mod ocr;
pub mod storage;
pub mod telegram;
pub mod update;
pub mod webhook;
