//! The triage entry point.
//!
//! [`TriageEngine::triage`] runs one message through the fixed order
//!
//! ```text
//! normalise → crisis check → FAQ check → intent scoring → assembly
//! ```
//!
//! and always returns a [`TriageResult`].  Crisis language short-circuits
//! everything after it with the catalog's fixed safety reply.  The engine
//! holds only read-only tables, so one instance can serve any number of
//! conversations concurrently.

use std::fmt;

use rand::Rng;

use crate::catalog::{Catalog, Replies, DEFAULT_INTENT};
use crate::config::{AppConfig, AssemblyConfig, ScoringConfig};
use crate::engine::{
    normalize, AssemblyContext, Classification, CrisisDetector, FaqMatcher, IntentScorer,
    ResponseAssembler, ScoreBoard, Tool, ToolTriggerDetector,
};
use crate::triage::message::Message;
use crate::triage::state::TriageState;

// ---------------------------------------------------------------------------
// TriageKind / TriageResult / TriageContext
// ---------------------------------------------------------------------------

/// What produced the reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriageKind {
    /// The input had no words.
    Empty,
    /// Crisis language; the reply is the fixed safety message.
    Crisis,
    /// An FAQ answer.
    Faq,
    /// Low-confidence classification; the reply asks for more detail.
    Clarify,
    /// A confident intent match.
    Intent(String),
    /// Answered by the remote backend.
    Remote,
}

impl TriageKind {
    /// Wire form: `"empty"`, `"crisis"`, `"faq"`, `"clarify"`, `"remote"` or
    /// the intent key.
    pub fn as_str(&self) -> &str {
        match self {
            TriageKind::Empty => "empty",
            TriageKind::Crisis => "crisis",
            TriageKind::Faq => "faq",
            TriageKind::Clarify => "clarify",
            TriageKind::Intent(key) => key,
            TriageKind::Remote => "remote",
        }
    }
}

impl fmt::Display for TriageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one triage call.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageResult {
    pub kind: TriageKind,
    pub reply: String,
    /// Exercise the adapter may offer next to the reply.
    pub tool: Option<Tool>,
    /// Terminal state the call finished in.
    pub state: TriageState,
}

/// Optional numeric hints supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriageContext {
    /// Self-reported hours of sleep.
    pub sleep_hours: Option<f64>,
}

// ---------------------------------------------------------------------------
// TriageEngine
// ---------------------------------------------------------------------------

/// Local conversational triage engine.
///
/// # Example
/// ```rust
/// use mindbot_triage::triage::{Message, TriageContext, TriageEngine};
///
/// let engine = TriageEngine::builtin();
/// let history = vec![Message::user("work has been intense")];
/// let result = engine.triage("I want to kill myself", &history, &TriageContext::default());
/// assert_eq!(result.kind.as_str(), "crisis");
/// ```
pub struct TriageEngine {
    crisis: CrisisDetector,
    faq: FaqMatcher,
    scorer: IntentScorer,
    assembler: ResponseAssembler,
    triggers: ToolTriggerDetector,
    replies: Replies,
    excerpt_min_chars: usize,
}

impl TriageEngine {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Build an engine over `catalog` with explicit tuning.
    pub fn new(catalog: &Catalog, scoring: ScoringConfig, assembly: AssemblyConfig) -> Self {
        Self {
            crisis: CrisisDetector::new(&catalog.crisis_fragments),
            faq: FaqMatcher::new(&catalog.faqs, scoring.faq_threshold),
            scorer: IntentScorer::new(&catalog.intents, scoring),
            excerpt_min_chars: assembly.excerpt_min_chars,
            assembler: ResponseAssembler::new(catalog, assembly),
            triggers: ToolTriggerDetector::new(&catalog.tool_triggers),
            replies: catalog.replies.clone(),
        }
    }

    /// Build an engine with the tuning from `config`.
    pub fn from_config(catalog: &Catalog, config: &AppConfig) -> Self {
        Self::new(catalog, config.scoring.clone(), config.assembly.clone())
    }

    /// Built-in catalog with default tuning.
    pub fn builtin() -> Self {
        Self::new(
            &Catalog::builtin(),
            ScoringConfig::default(),
            AssemblyConfig::default(),
        )
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Triage `text` using the thread-local RNG for reply variation.
    pub fn triage(&self, text: &str, history: &[Message], ctx: &TriageContext) -> TriageResult {
        self.triage_with_rng(text, history, ctx, &mut rand::thread_rng())
    }

    /// Triage `text` drawing reply variation from `rng`.
    ///
    /// Classification never depends on `rng`; only the wording does.
    pub fn triage_with_rng<R: Rng>(
        &self,
        text: &str,
        history: &[Message],
        ctx: &TriageContext,
        rng: &mut R,
    ) -> TriageResult {
        let mut state = TriageState::default();

        state.advance(TriageState::Normalizing);
        let normalized = normalize(text);
        if normalized.is_empty() {
            state.advance(TriageState::Done);
            log::debug!("triage: empty input (len={})", text.len());
            return self.fixed(TriageKind::Empty, &self.replies.empty, state);
        }

        state.advance(TriageState::CrisisCheck);
        if self.crisis.detect_normalized(&normalized) {
            state.advance(TriageState::Crisis);
            log::warn!("triage: crisis language detected (len={})", text.len());
            return self.fixed(TriageKind::Crisis, &self.replies.crisis, state);
        }

        let tool = self.triggers.detect(&normalized);

        state.advance(TriageState::FaqCheck);
        if let Some(hit) = self.faq.find(text) {
            state.advance(TriageState::FaqHit);
            log::debug!("triage: faq #{} (score={:.2})", hit.index, hit.score);
            return TriageResult {
                kind: TriageKind::Faq,
                reply: hit.entry.answer.clone(),
                tool,
                state,
            };
        }

        state.advance(TriageState::IntentScoring);
        let board = self.scorer.score(text, history);
        let classification = self.scorer.classify(&board);

        state.advance(TriageState::Assembling);
        let assembly_ctx = AssemblyContext {
            sleep_hours: ctx.sleep_hours,
            recent_excerpt: self.recent_excerpt(history),
        };

        let (kind, reply) = match classification {
            Classification::Intent { key, score } => {
                log::debug!("triage: intent {key} (score={score:.2})");
                let reply = self.assembler.assemble(&key, &assembly_ctx, rng);
                (TriageKind::Intent(key), reply)
            }
            Classification::Clarify { score } => {
                log::debug!("triage: clarify (best score={score:.2})");
                let base = self.assembler.assemble(DEFAULT_INTENT, &assembly_ctx, rng);
                (TriageKind::Clarify, format!("{} {}", base, self.replies.clarify))
            }
        };

        state.advance(TriageState::Done);
        TriageResult {
            kind,
            reply,
            tool,
            state,
        }
    }

    /// Run only the checks that must never be delegated: empty input and
    /// crisis language.  `None` means the message may be answered elsewhere.
    pub fn safety_check(&self, text: &str) -> Option<TriageResult> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Some(self.fixed(TriageKind::Empty, &self.replies.empty, TriageState::Done));
        }
        if self.crisis.detect_normalized(&normalized) {
            log::warn!("triage: crisis language detected (len={})", text.len());
            return Some(self.fixed(
                TriageKind::Crisis,
                &self.replies.crisis,
                TriageState::Crisis,
            ));
        }
        None
    }

    /// Intent scores for `text`, for diagnostics and adapters.
    pub fn scores(&self, text: &str, history: &[Message]) -> ScoreBoard {
        self.scorer.score(text, history)
    }

    /// Exercise suggestion for `text`.
    pub fn suggest_tool(&self, text: &str) -> Option<Tool> {
        self.triggers.detect(&normalize(text))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn fixed(&self, kind: TriageKind, reply: &str, state: TriageState) -> TriageResult {
        TriageResult {
            kind,
            reply: reply.to_string(),
            tool: None,
            state,
        }
    }

    /// Most recent user message longer than `excerpt_min_chars`.
    fn recent_excerpt(&self, history: &[Message]) -> Option<String> {
        history
            .iter()
            .rev()
            .filter(|m| m.is_user())
            .map(|m| m.text.trim())
            .find(|t| t.chars().count() > self.excerpt_min_chars)
            .map(str::to_string)
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> TriageEngine {
        TriageEngine::builtin()
    }

    fn run(text: &str, history: &[Message]) -> TriageResult {
        engine().triage_with_rng(
            text,
            history,
            &TriageContext::default(),
            &mut StdRng::seed_from_u64(1),
        )
    }

    fn crisis_reply() -> String {
        Catalog::builtin().replies.crisis
    }

    // ---- crisis override ---

    #[test]
    fn crisis_scenario() {
        let result = run("I want to kill myself", &[]);
        assert_eq!(result.kind, TriageKind::Crisis);
        assert_eq!(result.reply, crisis_reply());
        assert!(result.reply.contains("emergency"));
        assert!(result.reply.contains("crisis hotline"));
        assert_eq!(result.state, TriageState::Crisis);
        assert!(result.tool.is_none());
    }

    #[test]
    fn crisis_ignores_history_and_other_content() {
        let history = vec![
            Message::user("How do I sleep better?"),
            Message::user("insomnia insomnia insomnia"),
        ];
        let inputs = [
            "How do I sleep better? I keep thinking about SUICIDE",
            "what is box breathing... i want to end my life",
            "panic attack and self-harm",
            "xxkill myselfxx",
        ];
        for input in inputs {
            let result = run(input, &history);
            assert_eq!(result.kind, TriageKind::Crisis, "{input}");
            assert_eq!(result.reply, crisis_reply());
        }
    }

    #[test]
    fn crisis_reply_is_not_randomised() {
        let e = engine();
        let replies: std::collections::HashSet<_> = (0..20)
            .map(|seed| {
                e.triage_with_rng(
                    "I might hurt myself",
                    &[],
                    &TriageContext::default(),
                    &mut StdRng::seed_from_u64(seed),
                )
                .reply
            })
            .collect();
        assert_eq!(replies.len(), 1);
    }

    // ---- empty input ---

    #[test]
    fn empty_and_whitespace_inputs_prompt_for_text() {
        for input in ["", "   ", "\n\t", "?!...", "—"] {
            let result = run(input, &[]);
            assert_eq!(result.kind, TriageKind::Empty, "{input:?}");
            assert_eq!(result.reply, "Say a little about what's on your mind.");
            assert_eq!(result.state, TriageState::Done);
        }
    }

    // ---- FAQ ---

    #[test]
    fn faq_scenario() {
        let result = run("How do I sleep better?", &[]);
        assert_eq!(result.kind, TriageKind::Faq);
        assert_eq!(result.reply, Catalog::builtin().faqs[0].answer);
        assert_eq!(result.state, TriageState::FaqHit);
    }

    #[test]
    fn faq_threshold_is_configurable() {
        let scoring = ScoringConfig {
            faq_threshold: 0.9,
            ..ScoringConfig::default()
        };
        let e = TriageEngine::new(&Catalog::builtin(), scoring, AssemblyConfig::default());
        let result = e.triage("How do I sleep better?", &[], &TriageContext::default());
        assert_eq!(result.kind, TriageKind::Intent("sleep".into()));
    }

    // ---- intents ---

    #[test]
    fn sleep_and_anxiety_tie_resolves_to_catalog_first() {
        // Catalog order: sleep, anxiety, stress, low_mood, focus, default.
        let e = engine();
        let text = "I can't sleep, I'm so anxious";
        let board = e.scores(text, &[]);
        let sleep = board.get("sleep").unwrap();
        let anxiety = board.get("anxiety").unwrap();

        assert!((sleep - anxiety).abs() < 1e-9, "sleep={sleep} anxiety={anxiety}");

        let result = run(text, &[]);
        assert_eq!(result.kind, TriageKind::Intent("sleep".into()));
    }

    #[test]
    fn strictly_higher_intent_wins() {
        let result = run("I'm anxious and nervous, panic keeps coming back", &[]);
        assert_eq!(result.kind, TriageKind::Intent("anxiety".into()));
        assert_eq!(result.tool, Some(Tool::Breathing));
    }

    #[test]
    fn nonsense_is_clarify() {
        let result = run("zzqx vrrp", &[]);
        assert_eq!(result.kind, TriageKind::Clarify);
        assert!(result
            .reply
            .ends_with("Could you tell me a bit more about what's going on?"));
        assert_eq!(result.state, TriageState::Done);
    }

    #[test]
    fn default_intent_is_distinct_from_clarify() {
        let result = run("hello", &[]);
        assert_eq!(result.kind, TriageKind::Intent("default".into()));
    }

    #[test]
    fn history_keeps_topic_for_short_replies() {
        let history = vec![
            Message::user("I can't sleep at all"),
            Message::assistant("That sounds hard."),
            Message::user("insomnia every night, so tired"),
        ];
        let result = run("yeah", &history);
        assert_eq!(result.kind, TriageKind::Intent("sleep".into()));
    }

    #[test]
    fn sleep_hours_shape_the_reply() {
        let e = engine();
        let low = e.triage_with_rng(
            "I'm exhausted and tired all day",
            &[],
            &TriageContext { sleep_hours: Some(4.0) },
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(low.kind, TriageKind::Intent("sleep".into()));
        assert!(low.reply.contains("on the low side"), "{}", low.reply);

        let healthy = e.triage_with_rng(
            "I'm exhausted and tired all day",
            &[],
            &TriageContext { sleep_hours: Some(8.0) },
            &mut StdRng::seed_from_u64(3),
        );
        assert!(healthy.reply.contains("solid amount"), "{}", healthy.reply);
    }

    #[test]
    fn excerpt_comes_from_latest_substantive_user_message() {
        let e = engine();
        let history = vec![
            Message::user("my boss doubled my workload this month"),
            Message::assistant("That is a lot to take on, and it is understandable."),
            Message::user("yes"),
        ];
        assert_eq!(
            e.recent_excerpt(&history).as_deref(),
            Some("my boss doubled my workload this month")
        );
        assert_eq!(e.recent_excerpt(&[Message::user("short one")]), None);
    }

    #[test]
    fn classification_does_not_depend_on_rng() {
        let e = engine();
        let inputs = ["work deadline pressure", "zzqx", "I feel lonely", "hello"];
        for input in inputs {
            let kinds: std::collections::HashSet<_> = (0..10)
                .map(|seed| {
                    e.triage_with_rng(
                        input,
                        &[],
                        &TriageContext::default(),
                        &mut StdRng::seed_from_u64(seed),
                    )
                    .kind
                })
                .collect();
            assert_eq!(kinds.len(), 1, "{input}");
        }
    }

    #[test]
    fn always_replies_to_adversarial_input() {
        let e = engine();
        let long = "a".repeat(200_000);
        let inputs = [
            long.as_str(),
            "🙂🙂🙂",
            "\u{0}\u{1}\u{2}",
            "ÀÉÎÕÜ ßøæ",
            "\u{202e}reversed",
            "'\"\\",
        ];
        for input in inputs {
            let result = e.triage(input, &[], &TriageContext::default());
            assert!(!result.reply.trim().is_empty());
            assert!(result.state.is_terminal());
        }
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(TriageKind::Empty.as_str(), "empty");
        assert_eq!(TriageKind::Crisis.as_str(), "crisis");
        assert_eq!(TriageKind::Faq.as_str(), "faq");
        assert_eq!(TriageKind::Clarify.as_str(), "clarify");
        assert_eq!(TriageKind::Remote.as_str(), "remote");
        assert_eq!(TriageKind::Intent("focus".into()).to_string(), "focus");
    }

    // ---- safety_check ---

    #[test]
    fn safety_check_only_handles_empty_and_crisis() {
        let e = engine();
        assert_eq!(e.safety_check("").map(|r| r.kind), Some(TriageKind::Empty));
        assert_eq!(
            e.safety_check("thinking about suicide").map(|r| r.kind),
            Some(TriageKind::Crisis)
        );
        assert!(e.safety_check("I can't sleep").is_none());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TriageEngine>();
    }
}
