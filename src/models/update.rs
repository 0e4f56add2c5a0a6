//! Telegram `getUpdates` payload.

use serde::Deserialize;

/// Envelope returned by `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Vec<Update>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One inbound update. Non-message updates (edits, callbacks) carry no `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Message text, if this update carries one.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }

    /// Sender username for logging.
    pub fn sender(&self) -> &str {
        self.message
            .as_ref()
            .and_then(|m| m.from.as_ref())
            .and_then(|f| f.username.as_deref())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_updates() {
        let json = r#"{
            "ok": true,
            "result": [
                {"update_id": 10, "message": {"message_id": 1, "from": {"id": 7, "username": "alice"}, "text": "status?", "chat": {"id": 42}}},
                {"update_id": 11, "edited_message": {"message_id": 1}}
            ]
        }"#;

        let response: UpdateResponse = serde_json::from_str(json).unwrap();
        assert!(response.ok);
        assert_eq!(response.result.len(), 2);
        assert_eq!(response.result[0].text(), Some("status?"));
        assert_eq!(response.result[0].sender(), "alice");
        assert_eq!(response.result[1].text(), None);
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: UpdateResponse = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert!(response.result.is_empty());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }
}
