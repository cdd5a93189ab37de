//! Built-in English catalog.

use crate::engine::Tool;

use super::{Catalog, FaqEntry, Intent, Replies, Synonym, ToolTrigger};

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

struct FaqDef {
    question: &'static str,
    answer: &'static str,
    tags: &'static [&'static str],
}

struct IntentDef {
    key: &'static str,
    tags: &'static [&'static str],
    openers: &'static [&'static str],
    cores: &'static [&'static str],
    followups: &'static [&'static str],
    closers: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Static definitions
// ---------------------------------------------------------------------------

static CRISIS_FRAGMENTS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "take my own life",
    "hurt myself",
    "self-harm",
    "want to die",
];

static FAQS: &[FaqDef] = &[
    FaqDef {
        question: "What are good tips to sleep better?",
        answer: "A steady wind-down routine helps: keep a regular bedtime, avoid screens \
                 30 minutes before bed, dim the lights, and try progressive muscle \
                 relaxation or a 10-minute guided breathing session.",
        tags: &["sleep", "insomnia", "bedtime"],
    },
    FaqDef {
        question: "What is box breathing?",
        answer: "Box breathing is a paced breath: inhale for 4 seconds, hold for 4, \
                 exhale for 4, hold for 4. Repeat four rounds and let your shoulders drop.",
        tags: &["breathing", "breathe", "box"],
    },
    FaqDef {
        question: "What helps during a panic attack?",
        answer: "Sit down if you can, slow your breathing so the exhale is longer than the \
                 inhale, and focus on 3 things you can see around you. Panic peaks and \
                 passes, usually within minutes.",
        tags: &["panic", "attack"],
    },
    FaqDef {
        question: "What is the 5-4-3-2-1 grounding technique?",
        answer: "Name 5 things you see, 4 you can touch, 3 you can hear, 2 you can smell \
                 and 1 you can taste. It pulls attention back to the present moment.",
        tags: &["grounding", "senses"],
    },
    FaqDef {
        question: "Is this a replacement for therapy?",
        answer: "No. MindBot offers general supportive tips only and is not a replacement \
                 for a professional. A licensed therapist or doctor can give you proper care.",
        tags: &["therapy", "therapist", "professional", "counselor"],
    },
    FaqDef {
        question: "How does journaling help?",
        answer: "Writing things down slows racing thoughts and makes patterns easier to \
                 spot. Start with two lines: what went well today, and one next step.",
        tags: &["journal", "journaling", "writing"],
    },
];

static INTENTS: &[IntentDef] = &[
    IntentDef {
        key: "sleep",
        tags: &["sleep", "insomnia", "tired", "exhausted", "bedtime", "awake", "nap"],
        openers: &[
            "Sleep troubles can wear you down.",
            "I'm sorry sleep has been hard lately.",
            "Rest matters a lot, and it makes sense this is on your mind.",
        ],
        cores: &[
            "Try a wind-down routine: no screens 30 minutes before bed, dim lights, and a calm activity.",
            "Keeping the same wake-up time every day, even on weekends, helps reset your body clock.",
            "If your mind races at night, try writing your worries down before bed so they feel parked.",
            "Progressive muscle relaxation or a 10-minute guided breathing session can make falling asleep easier.",
        ],
        followups: &[
            "What does your evening usually look like before bed?",
            "Is it harder to fall asleep, or to stay asleep?",
        ],
        closers: &[
            "Small changes add up over a few nights.",
            "Be gentle with yourself while your sleep settles.",
        ],
    },
    IntentDef {
        key: "anxiety",
        tags: &["anxious", "anxiety", "panic", "worried", "nervous", "overwhelmed", "racing"],
        openers: &[
            "That sounds really uncomfortable.",
            "Anxiety can feel overwhelming, and you're not alone in this.",
            "Thank you for telling me how anxious you feel.",
        ],
        cores: &[
            "Try box breathing: inhale for 4 seconds, hold for 4, exhale for 4, and repeat four times.",
            "Grounding can help: name 5 things you can see, 4 you can touch, and 3 you can hear.",
            "If panic rises, sit down, plant your feet, and slow your exhale so it is longer than your inhale.",
            "Notice the anxious thought, name it, and remind yourself that a feeling is not a fact.",
        ],
        followups: &[
            "What tends to set off these anxious moments?",
            "Where do you feel the anxiety in your body right now?",
        ],
        closers: &[
            "These waves do pass, even when it doesn't feel like it.",
            "You're handling a lot, and reaching out is a good step.",
        ],
    },
    IntentDef {
        key: "stress",
        tags: &["stress", "stressed", "work", "pressure", "deadline", "burnout", "busy"],
        openers: &[
            "It sounds like a lot is on your plate.",
            "Stress like that builds up quickly.",
            "That's a heavy load to carry.",
        ],
        cores: &[
            "Break the work into small steps and pick just the top one or two tasks for today.",
            "A 5-minute break every hour can keep pressure from piling up.",
            "Writing a quick list of what is in your control and what isn't can make the load feel lighter.",
            "Try setting a clear stopping time for work so your evening has room to recover.",
        ],
        followups: &[
            "What's the biggest source of pressure right now?",
            "Which task feels the most urgent to you?",
        ],
        closers: &[
            "One step at a time is still progress.",
            "You don't have to solve everything today.",
        ],
    },
    IntentDef {
        key: "low_mood",
        tags: &["sad", "down", "depressed", "lonely", "hopeless", "empty", "crying"],
        openers: &[
            "I'm sorry you're feeling down.",
            "That sounds really heavy.",
            "Thank you for sharing something so personal.",
        ],
        cores: &[
            "Try writing two lines: one thing that went okay today, and one small next step.",
            "Reaching out to someone you trust, even with a short message, can ease the loneliness.",
            "A short walk outside or a few minutes of daylight can gently lift your mood.",
            "Low days often feel permanent, but feelings shift over time.",
        ],
        followups: &[
            "Has anything helped, even a little, on days like this?",
            "Is there someone you feel comfortable talking to?",
        ],
        closers: &[
            "I'm glad you reached out.",
            "Be gentle with yourself today.",
        ],
    },
    IntentDef {
        key: "focus",
        tags: &["focus", "concentrate", "distracted", "procrastinate", "study", "attention"],
        openers: &[
            "Losing focus is frustrating.",
            "It's hard to concentrate when your mind keeps wandering.",
            "Distraction happens to everyone, especially under strain.",
        ],
        cores: &[
            "Try a 25-minute focus block followed by a 5-minute break.",
            "Put your phone in another room and keep only one tab open for the task.",
            "Start with a two-minute version of the task to get moving.",
            "Writing down stray thoughts as they come up clears space to concentrate.",
        ],
        followups: &[
            "What usually pulls your attention away?",
            "What's the task you're trying to focus on?",
        ],
        closers: &[
            "Small wins build momentum.",
            "Progress beats perfection.",
        ],
    },
    IntentDef {
        key: "default",
        tags: &["hello", "help", "talk", "chat", "advice"],
        openers: &[
            "I'm here and listening.",
            "Thanks for sharing that with me.",
            "I hear you.",
        ],
        cores: &[
            "Regular small habits help: a steady routine, short walks, and 10 minutes of focused breathing.",
            "When things feel like too much, a slow 4-4-4 breath can help: inhale 4 seconds, hold 4, exhale 4.",
            "Naming how you feel, even in one word, is a helpful first step.",
        ],
        followups: &[
            "How have you been feeling lately?",
            "What's been on your mind today?",
        ],
        closers: &[
            "I'm not a replacement for a professional, but I'm happy to keep talking.",
            "Take your time.",
        ],
    },
];

static SYNONYMS: &[(&str, &[&str])] = &[
    ("try", &["try", "consider", "you might try"]),
    ("helpful", &["helpful", "useful", "worthwhile"]),
    ("small", &["small", "tiny", "little"]),
    ("gentle", &["gentle", "kind", "patient"]),
    ("notice", &["notice", "observe", "pay attention to"]),
    ("often", &["often", "frequently", "usually"]),
    ("really", &["really", "truly", "genuinely"]),
];

static TOOL_TRIGGERS: &[(Tool, &[&str])] = &[
    (Tool::Breathing, &["overwhelm", "anxious", "panic"]),
    (
        Tool::Grounding,
        &["can't focus", "cannot focus", "can't concentrate", "distract"],
    ),
    (Tool::Journaling, &["sad", "low", "down", "depress"]),
];

const CRISIS_REPLY: &str = "I'm really sorry you're going through this. I can't provide \
emergency help, but you deserve support right now. Please contact your local emergency \
services or a crisis hotline immediately. If you're in India, helplines such as Kiran or \
Snehi can help.";

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn catalog() -> Catalog {
    let faqs = FAQS
        .iter()
        .map(|f| FaqEntry {
            question: f.question.to_string(),
            answer: f.answer.to_string(),
            tags: strings(f.tags),
        })
        .collect();

    let intents = INTENTS
        .iter()
        .map(|i| Intent {
            key: i.key.to_string(),
            tags: strings(i.tags),
            openers: strings(i.openers),
            cores: strings(i.cores),
            followups: strings(i.followups),
            closers: strings(i.closers),
        })
        .collect();

    let synonyms = SYNONYMS
        .iter()
        .map(|(word, alts)| Synonym {
            word: word.to_string(),
            alternatives: strings(alts),
        })
        .collect();

    let tool_triggers = TOOL_TRIGGERS
        .iter()
        .map(|(tool, phrases)| ToolTrigger {
            tool: *tool,
            phrases: strings(phrases),
        })
        .collect();

    Catalog {
        faqs,
        intents,
        synonyms,
        crisis_fragments: strings(CRISIS_FRAGMENTS),
        tool_triggers,
        replies: Replies {
            crisis: CRISIS_REPLY.to_string(),
            empty: "Say a little about what's on your mind.".to_string(),
            fallback: "I'm here to help — tell me more.".to_string(),
            clarify: "Could you tell me a bit more about what's going on?".to_string(),
            sleep_low: "You mentioned about {hours} hours of sleep, which is on the low side; \
                        running short on rest makes everything feel heavier."
                .to_string(),
            sleep_borderline: "Around {hours} hours of sleep is close, but most adults feel \
                               better with seven or more."
                .to_string(),
            sleep_healthy: "{hours} hours of sleep sounds like a solid amount, so let's look \
                            at what else might be going on."
                .to_string(),
            context_ack: "You mentioned \"{excerpt}\".".to_string(),
        },
    }
}
