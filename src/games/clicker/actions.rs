//! Semantic action IDs for Coin Clicker click targets.

pub const TAP_COIN: u16 = 0;
pub const CLAIM_BONUS: u16 = 1;

// ── Upgrade purchase (base + index into UpgradeKind::all()) ─────
pub const BUY_UPGRADE_BASE: u16 = 100;
