//! # Error Types Module
//!
//! Failure taxonomy for the webhook pipeline. Every external-call failure is
//! a distinct variant so the dispatcher can map it to its fixed user-facing
//! reply; none of these ever escape the handler as an HTTP-level error.

/// Failure kinds of the update-handling pipeline.
#[derive(Debug, Clone)]
pub enum BotError {
    /// Inbound body could not be parsed as JSON.
    MalformedInput(String),
    /// Photo file id could not be resolved or downloaded.
    FileResolution(String),
    /// Vision OCR call failed (transport error or non-success status).
    OcrUnavailable(String),
    /// Instruction document could not be loaded from object storage.
    InstructionUnavailable(String),
    /// Completion call failed (transport error or non-success status).
    CompletionUnavailable(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
            BotError::FileResolution(msg) => write!(f, "File resolution error: {msg}"),
            BotError::OcrUnavailable(msg) => write!(f, "OCR unavailable: {msg}"),
            BotError::InstructionUnavailable(msg) => {
                write!(f, "Instruction unavailable: {msg}")
            }
            BotError::CompletionUnavailable(msg) => {
                write!(f, "Completion unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for BotError {}
