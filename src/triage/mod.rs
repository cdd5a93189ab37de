//! Conversation-facing layer: messages, the per-call state machine, the
//! orchestrator and a rolling history window.

pub mod message;
pub mod orchestrator;
pub mod state;
pub mod window;

pub use message::{parse_history, Message, MessageError, Role};
pub use orchestrator::{TriageContext, TriageEngine, TriageKind, TriageResult};
pub use state::TriageState;
pub use window::ConversationWindow;
