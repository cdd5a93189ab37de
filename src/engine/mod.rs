//! Text-processing stages used by the triage orchestrator.
//!
//! Each stage is a plain struct built once from the catalog and then used
//! read-only, so a single engine can be shared between conversations.

pub mod assembler;
pub mod crisis;
pub mod faq;
pub mod intent;
pub mod normalize;
pub mod paraphrase;
pub mod triggers;

pub use assembler::{AssemblyContext, ResponseAssembler};
pub use crisis::CrisisDetector;
pub use faq::{FaqMatch, FaqMatcher};
pub use intent::{Classification, IntentScorer, ScoreBoard};
pub use normalize::{normalize, token_overlap_score, token_set, tokenize};
pub use paraphrase::Paraphraser;
pub use triggers::{Tool, ToolTriggerDetector};
