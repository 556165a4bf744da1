//! Semantic action IDs for Scam Detective click targets.

pub const ANSWER_YES: u16 = 10;
pub const ANSWER_NO: u16 = 11;

// ── Single-choice answers (base + option index) ─────────────────
pub const CHOOSE_OPTION_BASE: u16 = 20;

pub const RESTART_QUIZ: u16 = 40;
