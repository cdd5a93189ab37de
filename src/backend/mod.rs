//! Optional remote chat backend.
//!
//! This module provides:
//! * [`ChatBackend`]: async trait implemented by all reply backends.
//! * [`HttpBackend`]: posts to the chat server's `/api/voice` text mode.
//! * [`Responder`]: local safety checks, then the backend, then local triage
//!   when the backend fails.
//! * [`BackendError`]: error variants for backend calls.

pub mod fallback;
pub mod remote;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use fallback::{Responder, Response};
pub use remote::{BackendError, BackendReply, BackendRequest, ChatBackend, HttpBackend};
