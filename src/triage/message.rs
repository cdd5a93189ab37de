//! Conversation messages and boundary validation.
//!
//! UI adapters hand the engine plain JSON history.  [`parse_history`] turns
//! it into typed [`Message`]s, rejecting unknown roles and missing text
//! instead of guessing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// MessageError
// ---------------------------------------------------------------------------

/// Errors raised when validating raw history.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The history is not a JSON array of objects.
    #[error("history is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A message has no `role` field.
    #[error("message {index} has no role")]
    MissingRole { index: usize },

    /// A message has a role other than `user`, `assistant` or `system`.
    #[error("message {index} has unknown role {role:?}")]
    UnknownRole { index: usize, role: String },

    /// A message has no `text` field.
    #[error("message {index} has no text")]
    MissingText { index: usize },
}

// ---------------------------------------------------------------------------
// Role / Message
// ---------------------------------------------------------------------------

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "assistant" | "bot" => Some(Role::Assistant),
            "system" => Some(Role::System),
            _ => None,
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Unix time in milliseconds, when the caller tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
}

impl Message {
    /// A user message without a timestamp.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp_ms: None,
        }
    }

    /// An assistant message without a timestamp.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp_ms: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

// ---------------------------------------------------------------------------
// Boundary parsing
// ---------------------------------------------------------------------------

/// Loose message shape as produced by UI code.
#[derive(Debug, Deserialize)]
struct RawMessage {
    role: Option<String>,
    text: Option<String>,
    #[serde(alias = "timestamp")]
    timestamp_ms: Option<u64>,
}

/// Parse a JSON array of `{role, text, timestamp?}` objects.
pub fn parse_history(json: &str) -> Result<Vec<Message>, MessageError> {
    let raw: Vec<RawMessage> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, m)| {
            let role_str = m.role.ok_or(MessageError::MissingRole { index })?;
            let role = Role::parse(&role_str).ok_or_else(|| MessageError::UnknownRole {
                index,
                role: role_str.clone(),
            })?;
            let text = m.text.ok_or(MessageError::MissingText { index })?;
            Ok(Message {
                role,
                text,
                timestamp_ms: m.timestamp_ms,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_history() {
        let json = r#"[
            {"role": "assistant", "text": "Hi, I'm MindBot."},
            {"role": "user", "text": "I can't sleep", "timestamp": 1700000000000}
        ]"#;
        let history = parse_history(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Assistant);
        assert!(history[1].is_user());
        assert_eq!(history[1].timestamp_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn roles_are_case_insensitive() {
        let history = parse_history(r#"[{"role": " USER ", "text": "x"}]"#).unwrap();
        assert_eq!(history[0].role, Role::User);
    }

    #[test]
    fn missing_role_is_rejected() {
        let err = parse_history(r#"[{"text": "x"}]"#).unwrap_err();
        assert!(matches!(err, MessageError::MissingRole { index: 0 }));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = parse_history(r#"[{"role":"user","text":"a"},{"role":"robot","text":"b"}]"#)
            .unwrap_err();
        match err {
            MessageError::UnknownRole { index, role } => {
                assert_eq!(index, 1);
                assert_eq!(role, "robot");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_text_is_rejected() {
        let err = parse_history(r#"[{"role": "user"}]"#).unwrap_err();
        assert!(matches!(err, MessageError::MissingText { index: 0 }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(parse_history("{"), Err(MessageError::Json(_))));
    }

    #[test]
    fn serialises_role_lowercase_without_empty_timestamp() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","text":"hi"}"#);
    }
}
