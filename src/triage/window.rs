//! Rolling per-conversation message window.
//!
//! The engine itself is stateless: every call receives the trailing history
//! as a slice.  [`ConversationWindow`] is the caller-side helper that keeps
//! that slice for one conversation.  It holds the last *N* messages and is
//! cleared automatically after `idle_reset` without activity, which treats
//! a long pause as a new conversation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::ConversationConfig;
use crate::triage::message::Message;

// ---------------------------------------------------------------------------
// ConversationWindow
// ---------------------------------------------------------------------------

/// Bounded message history for one conversation.
///
/// # Example
/// ```rust
/// use mindbot_triage::triage::{ConversationWindow, Message};
///
/// let mut window = ConversationWindow::with_capacity(2, 600);
/// window.push(Message::user("hello"));
/// window.push(Message::assistant("hi"));
/// window.push(Message::user("I can't sleep"));
/// assert_eq!(window.len(), 2);
/// assert_eq!(window.messages()[1].text, "I can't sleep");
/// ```
pub struct ConversationWindow {
    messages: VecDeque<Message>,
    max_messages: usize,
    last_activity: Instant,
    idle_reset: Duration,
}

impl ConversationWindow {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Window sized from configuration.
    pub fn new(config: &ConversationConfig) -> Self {
        Self::with_capacity(config.window_size, config.idle_reset_secs)
    }

    /// Window with explicit limits (useful for testing).
    pub fn with_capacity(max_messages: usize, idle_reset_secs: u64) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages + 1),
            max_messages,
            last_activity: Instant::now(),
            idle_reset: Duration::from_secs(idle_reset_secs),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a message, dropping the oldest once the window is full.
    ///
    /// An idle gap longer than `idle_reset` clears the window first.
    pub fn push(&mut self, message: Message) {
        self.expire_if_idle();

        self.messages.push_back(message);

        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }

        self.last_activity = Instant::now();
    }

    /// Clear the window when nothing happened for longer than `idle_reset`.
    ///
    /// Call before reading history for a new message.  Returns `true` when
    /// the window was cleared.
    pub fn expire_if_idle(&mut self) -> bool {
        let idle = self.last_activity.elapsed();
        if idle <= self.idle_reset || self.messages.is_empty() {
            return false;
        }
        log::debug!("conversation: idle reset after {idle:?}");
        self.messages.clear();
        true
    }

    /// Forget everything immediately.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Messages oldest first, as a contiguous copy for the engine.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new(&ConversationConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
