//! Semantic action IDs for Budget Challenge click targets.

// ── Category selection (base + Category::index()) ───────────────
pub const SELECT_CATEGORY_BASE: u16 = 10;

pub const ADD_PERCENT: u16 = 20;
pub const REMOVE_PERCENT: u16 = 21;
pub const INCOME_UP: u16 = 30;
pub const INCOME_DOWN: u16 = 31;
pub const CHECK_PLAN: u16 = 40;
pub const RESET_PLAN: u16 = 41;
