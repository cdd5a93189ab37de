//! `Responder`: remote replies with local triage as the safety net.
//!
//! Empty input and crisis language are always answered locally, before any
//! network call.  Everything else goes to the configured [`ChatBackend`]
//! when there is one; any backend error falls back to
//! [`TriageEngine::triage`], so a reply is always produced.

use std::sync::Arc;

use crate::backend::remote::{BackendRequest, ChatBackend, HttpBackend};
use crate::config::{BackendConfig, Tone};
use crate::triage::{Message, TriageContext, TriageEngine, TriageKind, TriageResult, TriageState};

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A reply plus optional synthesised audio from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub result: TriageResult,
    pub audio_base64: Option<String>,
}

impl From<TriageResult> for Response {
    fn from(result: TriageResult) -> Self {
        Self {
            result,
            audio_base64: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

/// Answers messages with an optional remote backend in front of the local
/// engine.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use mindbot_triage::backend::Responder;
/// use mindbot_triage::triage::{TriageContext, TriageEngine};
///
/// let responder = Responder::local(Arc::new(TriageEngine::builtin()));
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let response = rt.block_on(responder.respond("hello", &[], &TriageContext::default()));
/// assert_eq!(response.result.kind.as_str(), "default");
/// ```
pub struct Responder {
    engine: Arc<TriageEngine>,
    backend: Option<Arc<dyn ChatBackend>>,
    tone: Tone,
    history_messages: usize,
}

impl Responder {
    /// Local triage only.
    pub fn local(engine: Arc<TriageEngine>) -> Self {
        let defaults = BackendConfig::default();
        Self {
            engine,
            backend: None,
            tone: defaults.tone,
            history_messages: defaults.history_messages,
        }
    }

    /// Put `backend` in front of `engine`.
    pub fn with_backend(
        engine: Arc<TriageEngine>,
        backend: Arc<dyn ChatBackend>,
        config: &BackendConfig,
    ) -> Self {
        Self {
            engine,
            backend: Some(backend),
            tone: config.tone,
            history_messages: config.history_messages,
        }
    }

    /// Use an [`HttpBackend`] when `config.enabled`, otherwise local only.
    pub fn from_config(engine: Arc<TriageEngine>, config: &BackendConfig) -> Self {
        if config.enabled {
            log::info!("remote backend enabled: {}", config.base_url);
            Self::with_backend(engine, Arc::new(HttpBackend::from_config(config)), config)
        } else {
            Self::local(engine)
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    /// Answer `text`.  Never fails.
    pub async fn respond(&self, text: &str, history: &[Message], ctx: &TriageContext) -> Response {
        if let Some(result) = self.engine.safety_check(text) {
            return result.into();
        }

        if let Some(backend) = &self.backend {
            let skip = history.len().saturating_sub(self.history_messages);
            let request = BackendRequest {
                text: text.to_string(),
                history: history[skip..].to_vec(),
                tone: self.tone,
            };

            match backend.reply(&request).await {
                Ok(reply) => {
                    log::debug!("backend: reply received (len={})", reply.reply.len());
                    return Response {
                        result: TriageResult {
                            kind: TriageKind::Remote,
                            reply: reply.reply,
                            tool: self.engine.suggest_tool(text),
                            state: TriageState::Done,
                        },
                        audio_base64: reply.audio_base64,
                    };
                }
                Err(e) => {
                    log::warn!("backend failed, answering locally: {e}");
                }
            }
        }

        self.engine.triage(text, history, ctx).into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
