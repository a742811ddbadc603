//! # Inbound Update Model
//!
//! Serde model of a Telegram webhook update, reduced to the fields this bot
//! acts on, plus the content classification used by the dispatcher.

use serde::Deserialize;

/// One inbound update from the Telegram Bot API.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub message: Option<TgMessage>,
}

/// The message part of an update.
#[derive(Debug, Deserialize)]
pub struct TgMessage {
    pub chat: Chat,
    pub text: Option<String>,
    /// Image variants ordered by size, largest last.
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// One photo variant; only the file id is needed to fetch it.
#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

/// Recognized bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

/// Content classification of a message. Exactly one kind is acted upon.
#[derive(Debug)]
pub enum MessageKind<'a> {
    Command(Command),
    Text(&'a str),
    Photo(&'a [PhotoSize]),
    Unsupported,
}

impl TgMessage {
    /// Classify the message by its content. Text is checked before photo;
    /// a message carrying neither is unsupported.
    pub fn kind(&self) -> MessageKind<'_> {
        if let Some(text) = self.text.as_deref() {
            return match text {
                "/start" => MessageKind::Command(Command::Start),
                "/help" => MessageKind::Command(Command::Help),
                _ => MessageKind::Text(text),
            };
        }
        if let Some(photo) = self.photo.as_deref() {
            return MessageKind::Photo(photo);
        }
        MessageKind::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: serde_json::Value) -> TgMessage {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn classifies_commands() {
        let msg = message(serde_json::json!({"chat": {"id": 1}, "text": "/start"}));
        assert!(matches!(msg.kind(), MessageKind::Command(Command::Start)));

        let msg = message(serde_json::json!({"chat": {"id": 1}, "text": "/help"}));
        assert!(matches!(msg.kind(), MessageKind::Command(Command::Help)));
    }

    #[test]
    fn classifies_plain_text() {
        let msg = message(serde_json::json!({"chat": {"id": 1}, "text": "что такое семафор"}));
        assert!(matches!(msg.kind(), MessageKind::Text("что такое семафор")));
    }

    #[test]
    fn classifies_photo() {
        let msg = message(serde_json::json!({
            "chat": {"id": 1},
            "photo": [{"file_id": "small"}, {"file_id": "large"}]
        }));
        match msg.kind() {
            MessageKind::Photo(photos) => {
                assert_eq!(photos.len(), 2);
                assert_eq!(photos.last().unwrap().file_id, "large");
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[test]
    fn stickers_and_voice_are_unsupported() {
        let msg = message(serde_json::json!({"chat": {"id": 1}}));
        assert!(matches!(msg.kind(), MessageKind::Unsupported));
    }

    #[test]
    fn unknown_slash_text_is_a_question_not_a_command() {
        let msg = message(serde_json::json!({"chat": {"id": 1}, "text": "/startx"}));
        assert!(matches!(msg.kind(), MessageKind::Text("/startx")));
    }
}
