//! Reply assembly from clause banks.
//!
//! A reply is built from the winning intent's banks in a fixed order:
//!
//! ```text
//! opener? → 1–2 core lines → sleep remark? → "You mentioned …"? → follow-up? → closer?
//! ```
//!
//! Each optional step is a coin flip with a configurable probability, drawn
//! from the caller's RNG so tests can pin outputs with a seeded generator.
//! The joined text goes through the [`Paraphraser`]; an empty result falls
//! back to the catalog's fixed minimal reply.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Catalog, Intent, Replies, DEFAULT_INTENT};
use crate::config::AssemblyConfig;
use crate::engine::paraphrase::Paraphraser;

/// Intent key that receives the sleep-hours remark.
pub const SLEEP_INTENT: &str = "sleep";

// ---------------------------------------------------------------------------
// AssemblyContext
// ---------------------------------------------------------------------------

/// Optional hints that shape a reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyContext {
    /// Self-reported hours of sleep.
    pub sleep_hours: Option<f64>,
    /// Most recent substantive user message, quoted back to the user.
    pub recent_excerpt: Option<String>,
}

// ---------------------------------------------------------------------------
// ResponseAssembler
// ---------------------------------------------------------------------------

/// Builds varied replies from the catalog's clause banks.
pub struct ResponseAssembler {
    intents: Vec<Intent>,
    replies: Replies,
    paraphraser: Paraphraser,
    config: AssemblyConfig,
}

impl ResponseAssembler {
    pub fn new(catalog: &Catalog, config: AssemblyConfig) -> Self {
        Self {
            intents: catalog.intents.clone(),
            replies: catalog.replies.clone(),
            paraphraser: Paraphraser::new(&catalog.synonyms),
            config,
        }
    }

    /// Assemble a reply for `intent_key`.
    ///
    /// Unknown keys use the `default` intent's banks.
    pub fn assemble<R: Rng>(&self, intent_key: &str, ctx: &AssemblyContext, rng: &mut R) -> String {
        let Some(intent) = self.intent(intent_key) else {
            return self.replies.fallback.clone();
        };
        let cfg = &self.config;
        let mut parts: Vec<String> = Vec::with_capacity(7);

        if chance(rng, cfg.opener_probability) {
            if let Some(opener) = intent.openers.choose(rng) {
                parts.push(self.paraphraser.apply(opener, rng));
            }
        }

        if !intent.cores.is_empty() {
            let count = if chance(rng, cfg.single_core_probability) { 1 } else { 2 };
            let cores: Vec<&String> = intent.cores.choose_multiple(rng, count).collect();
            for core in cores {
                parts.push(self.paraphraser.apply(core, rng));
            }
        }

        if intent.key == SLEEP_INTENT {
            if let Some(remark) = ctx.sleep_hours.and_then(|h| self.sleep_remark(h)) {
                parts.push(self.paraphraser.apply(&remark, rng));
            }
        }

        // The user's own words are quoted verbatim.
        if chance(rng, cfg.context_ack_probability) {
            if let Some(excerpt) = ctx.recent_excerpt.as_deref() {
                let quoted = truncate_excerpt(excerpt, cfg.excerpt_max_chars);
                if !quoted.is_empty() {
                    let (before, after) = self
                        .replies
                        .context_ack
                        .split_once("{excerpt}")
                        .unwrap_or((self.replies.context_ack.as_str(), ""));
                    parts.push(format!(
                        "{}{}{}",
                        self.paraphraser.apply(before, rng),
                        quoted,
                        self.paraphraser.apply(after, rng)
                    ));
                }
            }
        }

        if chance(rng, cfg.followup_probability) {
            if let Some(followup) = intent.followups.choose(rng) {
                parts.push(self.paraphraser.apply(followup, rng));
            }
        }

        if chance(rng, cfg.closer_probability) {
            if let Some(closer) = intent.closers.choose(rng) {
                parts.push(self.paraphraser.apply(closer, rng));
            }
        }

        let reply = collapse_whitespace(&parts.join(" "));
        if reply.is_empty() {
            self.replies.fallback.clone()
        } else {
            reply
        }
    }

    /// Low / borderline / healthy remark for `hours`, or `None` for
    /// negative or non-finite values.
    pub fn sleep_remark(&self, hours: f64) -> Option<String> {
        if !hours.is_finite() || hours < 0.0 {
            return None;
        }
        let template = if hours < self.config.sleep_low_hours {
            &self.replies.sleep_low
        } else if hours < self.config.sleep_healthy_hours {
            &self.replies.sleep_borderline
        } else {
            &self.replies.sleep_healthy
        };
        Some(template.replace("{hours}", &format_hours(hours)))
    }

    fn intent(&self, key: &str) -> Option<&Intent> {
        self.intents
            .iter()
            .find(|i| i.key == key)
            .or_else(|| self.intents.iter().find(|i| i.key == DEFAULT_INTENT))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bernoulli draw that tolerates out-of-range and NaN probabilities.
fn chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.gen_bool(p)
    }
}

/// Collapse whitespace runs and trim; then cut to `max_chars` characters,
/// ending in `…` when shortened.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max_chars {
        return text;
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `4.0` → `"4"`, `6.54` → `"6.5"`.
fn format_hours(hours: f64) -> String {
    format!("{}", (hours * 10.0).round() / 10.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
