//! Local conversational triage for a wellbeing chat assistant.
//!
//! Each user message runs through normalisation, a crisis check that
//! overrides everything else, an FAQ lookup, intent scoring with recent
//! history, and randomised reply assembly.  All data lives in a
//! [`catalog::Catalog`]; all tuning lives in [`config::AppConfig`].
//!
//! ```rust
//! use mindbot_triage::triage::{Message, TriageContext, TriageEngine};
//!
//! let engine = TriageEngine::builtin();
//! let history = vec![Message::user("I keep waking up at 3am")];
//! let result = engine.triage("How do I sleep better?", &history, &TriageContext::default());
//! assert_eq!(result.kind.as_str(), "faq");
//! ```

pub mod backend;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod triage;
