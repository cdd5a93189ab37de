//! Suggests a short interactive exercise based on what the user describes.
//!
//! [`ToolTriggerDetector`] scans normalised text for trigger phrases and
//! returns the first matching [`Tool`] in catalog order.  Adapters use the
//! suggestion to surface a breathing timer, a grounding prompt or a
//! journaling prompt next to the reply.

use serde::{Deserialize, Serialize};

use crate::catalog::ToolTrigger;
use crate::engine::normalize::normalize;

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// Interactive exercise an adapter may offer alongside a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// 4-4-4 paced breathing.
    Breathing,
    /// 5-4-3-2-1 sensory grounding.
    Grounding,
    /// Two-line journaling prompt.
    Journaling,
}

impl Tool {
    /// Short label suitable for display.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Breathing => "breathing",
            Tool::Grounding => "grounding",
            Tool::Journaling => "journaling",
        }
    }
}

// ---------------------------------------------------------------------------
// ToolTriggerDetector
// ---------------------------------------------------------------------------

/// Phrase-based exercise suggestion.
pub struct ToolTriggerDetector {
    /// `(tool, normalised phrases)` in catalog order.
    triggers: Vec<(Tool, Vec<String>)>,
}

impl ToolTriggerDetector {
    /// Build a detector from catalog trigger definitions.
    ///
    /// Phrases are normalised once so `"can't focus"` matches the normalised
    /// form `"can t focus"`.  Phrases that normalise to nothing are dropped.
    pub fn new(triggers: &[ToolTrigger]) -> Self {
        let triggers = triggers
            .iter()
            .map(|t| {
                let phrases = t
                    .phrases
                    .iter()
                    .map(|p| normalize(p))
                    .filter(|p| !p.is_empty())
                    .collect();
                (t.tool, phrases)
            })
            .collect();
        Self { triggers }
    }

    /// First tool whose phrase occurs as a substring of `normalized`.
    pub fn detect(&self, normalized: &str) -> Option<Tool> {
        if normalized.is_empty() {
            return None;
        }
        self.triggers
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| normalized.contains(p.as_str())))
            .map(|(tool, _)| *tool)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
