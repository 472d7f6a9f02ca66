//! Rule-based replies.
//!
//! A fixed, ordered list of keyword rules; the first rule whose predicate
//! matches wins, and the fallback rule always matches. The alignment value
//! only decides whether a short suffix is appended.

/// Alignment below which the reply suggests slowing down.
pub const LOW_ALIGNMENT: f64 = -0.3;

/// Alignment above which the reply acknowledges focus.
pub const HIGH_ALIGNMENT: f64 = 0.3;

const LOW_SUFFIX: &str = " You can pause, breathe, and take it one small step at a time.";
const HIGH_SUFFIX: &str = " This looks reasonably focused; you can build on it steadily.";

/// Produces the console's reply for a turn.
pub trait ReplyGenerator: Send + Sync {
    /// `user_text` is already sanitized; `alignment` is the unrounded lane value.
    fn reply(&self, user_text: &str, alignment: Option<f64>) -> String;
}

/// One entry in the rule list.
pub struct ReplyRule {
    pub name: &'static str,
    /// Receives the trimmed text and its lowercase form.
    pub matches: fn(trimmed: &str, lower: &str) -> bool,
    pub template: &'static str,
}

fn contains_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lower.contains(word))
}

/// Rules in priority order. The last one always matches.
pub static RULES: &[ReplyRule] = &[
    ReplyRule {
        name: "empty",
        matches: |trimmed, _| trimmed.is_empty(),
        template: "I did not receive any content. Try typing a question, idea, or plan.",
    },
    ReplyRule {
        name: "plan",
        matches: |_, lower| contains_any(lower, &["plan", "schedule"]),
        template: "I hear you are thinking in terms of plans or schedules. \
                   Try breaking it into 3 small steps you can start soon. \
                   If you like, describe Step 1 and I will help you refine it.",
    },
    ReplyRule {
        name: "stress",
        matches: |_, lower| contains_any(lower, &["stress", "tired", "overwhelmed"]),
        template: "It sounds like you may be under some stress. \
                   One option is to list just one small thing you can do next, \
                   not everything at once. I can help you think through that next step.",
    },
    ReplyRule {
        name: "idea",
        matches: |_, lower| contains_any(lower, &["idea", "project"]),
        template: "Nice, you are in idea or project mode. \
                   Try stating the core goal in one sentence. \
                   From there, we can outline support, risks, and next moves.",
    },
    ReplyRule {
        name: "symbolic",
        matches: |_, lower| contains_any(lower, &["math", "symbolic", "equation", "formula"]),
        template: "You are thinking in a symbolic or mathematical way. \
                   It can help to name your key variables, write a simple equation, \
                   and separate assumptions from results. I can mirror that structure \
                   with you in plain text.",
    },
    ReplyRule {
        name: "alignment",
        matches: |_, lower| contains_any(lower, &["alignment", "lane", "score"]),
        template: "You mentioned alignment or a lane. In this mini console, each message \
                   gets a tiny lane value a in (-1,+1) as a posture hint, not a judgment. \
                   You can type :lane to see a brief tutorial on how it is computed.",
    },
    ReplyRule {
        name: "journal",
        matches: |_, lower| contains_any(lower, &["journal", "diary", "note"]),
        template: "Treat this like a tiny journal if you wish. \
                   You can write short notes about what happened, what you feel, \
                   and one small thing you might try next. I will reflect it back \
                   and keep a compact local memory for you.",
    },
    ReplyRule {
        name: "question",
        matches: |trimmed, _| trimmed.ends_with('?'),
        template: "You asked a question. I cannot see the full world, but I can help you \
                   think through it step by step. Try telling me what you already know, \
                   and what is uncertain. We can separate facts, options, and next actions.",
    },
    ReplyRule {
        name: "mirror",
        matches: |_, _| true,
        template: "Thank you for sharing. I have recorded this in the mini memory. \
                   If you want, you can now ask a question about it, or say :history \
                   to see recent interactions.",
    },
];

/// Finds the first matching rule.
pub fn select_rule(user_text: &str) -> &'static ReplyRule {
    let trimmed = user_text.trim();
    let lower = trimmed.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(trimmed, &lower))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Appends the alignment suffix, if any.
pub fn with_alignment_suffix(base: &str, alignment: Option<f64>) -> String {
    match alignment {
        Some(a) if a < LOW_ALIGNMENT => format!("{}{}", base, LOW_SUFFIX),
        Some(a) if a > HIGH_ALIGNMENT => format!("{}{}", base, HIGH_SUFFIX),
        _ => base.to_string(),
    }
}

/// The keyword rule list as a [`ReplyGenerator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordReplies;

impl ReplyGenerator for KeywordReplies {
    fn reply(&self, user_text: &str, alignment: Option<f64>) -> String {
        let rule = select_rule(user_text);
        tracing::trace!(rule = rule.name, "selected reply rule");
        with_alignment_suffix(rule.template, alignment)
    }
}
