//! Per-call triage state machine.
//!
//! ```text
//! Idle ──▶ Normalizing ──empty──▶ Done
//!               │
//!               ▼
//!          CrisisCheck ──hit──▶ Crisis
//!               │
//!               ▼
//!           FaqCheck ──hit──▶ FaqHit
//!               │
//!               ▼
//!         IntentScoring ──▶ Assembling ──▶ Done
//! ```
//!
//! Transitions are strictly ordered.  A fresh machine is used for every
//! call; nothing carries over between messages.

// ---------------------------------------------------------------------------
// TriageState
// ---------------------------------------------------------------------------

/// States of a single triage call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriageState {
    /// Nothing processed yet.
    #[default]
    Idle,
    /// Lowercasing and tokenising the input.
    Normalizing,
    /// Scanning for crisis language.
    CrisisCheck,
    /// Crisis language found; the fixed safety reply is returned.
    Crisis,
    /// Looking for a confident FAQ match.
    FaqCheck,
    /// An FAQ answer is returned.
    FaqHit,
    /// Scoring intents against the message and recent history.
    IntentScoring,
    /// Building the reply from clause banks.
    Assembling,
    /// A reply is ready.
    Done,
}

impl TriageState {
    /// `true` for states that end a call.
    ///
    /// ```
    /// use mindbot_triage::triage::TriageState;
    ///
    /// assert!(TriageState::Crisis.is_terminal());
    /// assert!(TriageState::FaqHit.is_terminal());
    /// assert!(TriageState::Done.is_terminal());
    /// assert!(!TriageState::IntentScoring.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TriageState::Crisis | TriageState::FaqHit | TriageState::Done
        )
    }

    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(&self, next: TriageState) -> bool {
        use TriageState::*;
        matches!(
            (self, next),
            (Idle, Normalizing)
                | (Normalizing, CrisisCheck)
                | (Normalizing, Done)
                | (CrisisCheck, Crisis)
                | (CrisisCheck, FaqCheck)
                | (FaqCheck, FaqHit)
                | (FaqCheck, IntentScoring)
                | (IntentScoring, Assembling)
                | (Assembling, Done)
        )
    }

    /// Move to `next`, logging the step.
    ///
    /// Illegal transitions are a programming error: they trip a debug
    /// assertion and are otherwise logged and applied.
    pub fn advance(&mut self, next: TriageState) {
        let legal = self.can_advance_to(next);
        debug_assert!(legal, "illegal triage transition {self:?} -> {next:?}");
        if !legal {
            log::error!("triage: illegal transition {} -> {}", self.label(), next.label());
        }
        log::debug!("triage: {} -> {}", self.label(), next.label());
        *self = next;
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TriageState::Idle => "Idle",
            TriageState::Normalizing => "Normalizing",
            TriageState::CrisisCheck => "CrisisCheck",
            TriageState::Crisis => "Crisis",
            TriageState::FaqCheck => "FaqCheck",
            TriageState::FaqHit => "FaqHit",
            TriageState::IntentScoring => "IntentScoring",
            TriageState::Assembling => "Assembling",
            TriageState::Done => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use TriageState::*;

    const ALL: [TriageState; 9] = [
        Idle,
        Normalizing,
        CrisisCheck,
        Crisis,
        FaqCheck,
        FaqHit,
        IntentScoring,
        Assembling,
        Done,
    ];

    #[test]
    fn default_is_idle() {
        assert_eq!(TriageState::default(), Idle);
    }

    #[test]
    fn full_path_is_legal() {
        let path = [Idle, Normalizing, CrisisCheck, FaqCheck, IntentScoring, Assembling, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn crisis_check_precedes_faq_check() {
        assert!(!Normalizing.can_advance_to(FaqCheck));
        assert!(!Normalizing.can_advance_to(IntentScoring));
        assert!(!CrisisCheck.can_advance_to(IntentScoring));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for from in ALL.iter().filter(|s| s.is_terminal()) {
            for to in ALL {
                assert!(!from.can_advance_to(to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn only_three_terminal_states() {
        let terminal: Vec<_> = ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![&Crisis, &FaqHit, &Done]);
    }

    #[test]
    fn advance_moves_along_legal_edges() {
        let mut state = TriageState::default();
        state.advance(Normalizing);
        state.advance(CrisisCheck);
        state.advance(Crisis);
        assert_eq!(state, Crisis);
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> = ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), ALL.len());
    }
}
