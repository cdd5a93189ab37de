//! `ChatBackend` trait and the `HttpBackend` implementation.
//!
//! `HttpBackend` speaks the chat server's `/api/voice` text mode: it posts
//! `{text, history, selectedMode}` and reads back
//! `{success, replyText, replyTextUserLanguage, audioBase64, error}`.
//! All connection details come from [`BackendConfig`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BackendConfig, Tone};
use crate::triage::Message;

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

/// Errors that can occur while asking the remote backend for a reply.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("backend request timed out")]
    Timeout,

    /// The response body was not the expected JSON.
    #[error("failed to parse backend response: {0}")]
    Parse(String),

    /// The backend answered without any reply text.
    #[error("backend returned an empty reply")]
    EmptyResponse,

    /// The backend reported a failure (non-2xx status or `success: false`).
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Request / reply
// ---------------------------------------------------------------------------

/// One message to answer, with the trailing conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub text: String,
    pub history: Vec<Message>,
    pub tone: Tone,
}

/// A reply from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub reply: String,
    /// Synthesised speech for the reply, when the backend produced any.
    pub audio_base64: Option<String>,
}

/// Outgoing wire shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceRequest<'a> {
    text: &'a str,
    history: &'a [Message],
    selected_mode: Tone,
}

/// Incoming wire shape.  Every field is optional on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoiceResponse {
    success: Option<bool>,
    reply_text: Option<String>,
    reply_text_user_language: Option<String>,
    audio_base64: Option<String>,
    error: Option<String>,
}

impl VoiceResponse {
    /// Turn a decoded body into a reply, preferring the user-language text.
    fn into_reply(self) -> Result<BackendReply, BackendError> {
        if self.success == Some(false) {
            return Err(BackendError::Rejected(
                self.error.unwrap_or_else(|| "success: false".into()),
            ));
        }

        let reply = [self.reply_text_user_language, self.reply_text]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
            .ok_or(BackendError::EmptyResponse)?;

        Ok(BackendReply {
            reply,
            audio_base64: self.audio_base64.filter(|a| !a.is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// ChatBackend trait
// ---------------------------------------------------------------------------

/// Async source of conversational replies.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn ChatBackend>`.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, request: &BackendRequest) -> Result<BackendReply, BackendError>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// Posts messages to `{base_url}/api/voice`.
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Build an `HttpBackend` from application config.
    ///
    /// The client carries the per-request timeout from `config.timeout_secs`.
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/voice", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string.
    async fn reply(&self, request: &BackendRequest) -> Result<BackendReply, BackendError> {
        let body = VoiceRequest {
            text: &request.text,
            history: &request.history,
            selected_mode: request.tone,
        };

        let mut req = self.client.post(self.endpoint()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();

        let parsed: Result<VoiceResponse, _> = response.json().await;
        match parsed {
            Ok(body) if status.is_success() => body.into_reply(),
            Ok(body) => Err(BackendError::Rejected(
                body.error.unwrap_or_else(|| format!("HTTP {status}")),
            )),
            Err(_) if !status.is_success() => Err(BackendError::Rejected(format!("HTTP {status}"))),
            Err(e) => Err(BackendError::Parse(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>) -> BackendConfig {
        BackendConfig {
            enabled: true,
            base_url: "http://localhost:4000/".into(),
            api_key: api_key.map(|s| s.to_string()),
            ..BackendConfig::default()
        }
    }

    fn decode(json: &str) -> Result<BackendReply, BackendError> {
        serde_json::from_str::<VoiceResponse>(json)
            .expect("valid json")
            .into_reply()
    }

    #[test]
    fn from_config_accepts_any_api_key() {
        for key in [None, Some(""), Some("sk-test-1234")] {
            let _backend = HttpBackend::from_config(&make_config(key));
        }
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let backend = HttpBackend::from_config(&make_config(None));
        assert_eq!(backend.endpoint(), "http://localhost:4000/api/voice");
    }

    #[test]
    fn request_uses_wire_field_names() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let body = VoiceRequest {
            text: "I can't sleep",
            history: &history,
            selected_mode: Tone::Motivate,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "I can't sleep");
        assert_eq!(json["selectedMode"], "motivate");
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][1]["text"], "hello");
        assert!(json["history"][0].get("timestamp_ms").is_none());
    }

    #[test]
    fn prefers_user_language_reply() {
        let reply = decode(
            r#"{"success":true,"replyText":"english","replyTextUserLanguage":"  hindi  ","audioBase64":"AAA"}"#,
        )
        .unwrap();
        assert_eq!(reply.reply, "hindi");
        assert_eq!(reply.audio_base64.as_deref(), Some("AAA"));
    }

    #[test]
    fn falls_back_to_reply_text() {
        let reply = decode(r#"{"replyText":"plain","replyTextUserLanguage":"","audioBase64":""}"#).unwrap();
        assert_eq!(reply.reply, "plain");
        assert_eq!(reply.audio_base64, None);
    }

    #[test]
    fn success_false_is_rejected_with_error_text() {
        let err = decode(r#"{"success":false,"error":"quota exceeded"}"#).unwrap_err();
        assert!(matches!(err, BackendError::Rejected(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn missing_reply_is_empty_response() {
        assert!(matches!(decode(r#"{"success":true}"#), Err(BackendError::EmptyResponse)));
        assert!(matches!(decode(r#"{"replyText":"   "}"#), Err(BackendError::EmptyResponse)));
    }

    #[test]
    fn backend_is_object_safe() {
        let backend: Box<dyn ChatBackend> = Box::new(HttpBackend::from_config(&make_config(None)));
        drop(backend);
    }
}
