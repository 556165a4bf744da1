//! Coin Clicker economy: state transitions over [`ClickerState`].
//!
//! Every operation that moves coins talks to the account service first and
//! only touches local stats once the service has accepted the delta. A failed
//! remote call therefore never leaves local totals ahead of the real balance.
//! Operations take `&mut` state and finish their remote call before
//! returning, so deltas for one player are issued strictly one at a time.

use chrono::NaiveDate;
use thiserror::Error;

use crate::bank::{BalanceService, OpId, RemoteError};

use super::state::{ClickerState, GameStats, UpgradeKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EconomyError {
    #[error("out of energy")]
    NoEnergy,
    #[error("not enough coins: need {cost}, have {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("balance not loaded yet")]
    BalanceUnavailable,
    #[error("daily bonus already claimed today")]
    BonusAlreadyClaimed,
    #[error("sync failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Advance the game by `delta_ticks` ticks (10 ticks/sec).
///
/// Energy regenerates one step per full `regen_interval_ticks`. Nothing
/// accrues while the game is not being ticked.
pub fn tick(state: &mut ClickerState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    state.anim_frame = state.anim_frame.wrapping_add(delta_ticks);
    state.click_flash = state.click_flash.saturating_sub(delta_ticks);
    state.purchase_flash = state.purchase_flash.saturating_sub(delta_ticks);
    state.earn_popup = state.earn_popup.saturating_sub(delta_ticks);

    let interval = state.config.regen_interval_ticks.max(1);
    state.regen_ticks = state.regen_ticks.saturating_add(delta_ticks);
    let steps = state.regen_ticks / interval;
    state.regen_ticks %= interval;

    let amount = state.config.regen_amount;
    let mut changed = false;
    for _ in 0..steps {
        if !regenerate(&mut state.stats, amount) {
            break;
        }
        changed = true;
    }
    if changed {
        state.dirty = true;
    }
}

/// One regeneration step, capped at `max_energy`. Returns whether energy
/// changed.
pub fn regenerate(stats: &mut GameStats, amount: u32) -> bool {
    let next = stats.energy.saturating_add(amount).min(stats.max_energy);
    let changed = next != stats.energy;
    stats.energy = next;
    changed
}

fn next_op(state: &mut ClickerState) -> OpId {
    state.op_seq += 1;
    OpId {
        session: state.session,
        seq: state.op_seq,
    }
}

fn fail<T>(state: &mut ClickerState, err: EconomyError) -> Result<T, EconomyError> {
    let msg = match &err {
        EconomyError::NoEnergy => "Out of energy! Wait a moment for it to recharge.".to_string(),
        EconomyError::InsufficientFunds { cost, .. } => {
            format!("Not enough coins! You need {} coins.", format_number(*cost))
        }
        EconomyError::BalanceUnavailable => "Your balance is still loading.".to_string(),
        EconomyError::BonusAlreadyClaimed => "Come back tomorrow for another bonus!".to_string(),
        EconomyError::Remote(e) => {
            crate::console::warn(&format!("remote balance update failed for {}: {e}", state.user));
            format!("Bank error: {e}")
        }
    };
    state.add_log(&msg, false);
    Err(err)
}

/// Read the authoritative balance. Called once when the session starts.
pub fn sync_balance(
    state: &mut ClickerState,
    bank: &mut dyn BalanceService,
) -> Result<u64, EconomyError> {
    match bank.read_balance(&state.user) {
        Ok(balance) => {
            state.balance = Some(balance);
            Ok(balance)
        }
        Err(e) => fail(state, e.into()),
    }
}

/// Tap the coin: spend one energy, earn `multiplier` coins.
pub fn click(state: &mut ClickerState, bank: &mut dyn BalanceService) -> Result<u64, EconomyError> {
    if state.stats.energy == 0 {
        return fail(state, EconomyError::NoEnergy);
    }

    let earned = state.stats.multiplier as u64;
    let op = next_op(state);
    let balance = match bank.credit(&state.user, op, earned) {
        Ok(b) => b,
        Err(e) => return fail(state, e.into()),
    };

    state.stats.total_clicks += 1;
    state.stats.total_earned += earned;
    state.stats.energy -= 1;
    state.balance = Some(balance);
    state.dirty = true;
    state.click_flash = 3;
    state.earn_popup = 8;
    Ok(earned)
}

/// Claim the once-per-calendar-day bonus.
pub fn claim_daily_bonus(
    state: &mut ClickerState,
    bank: &mut dyn BalanceService,
    today: NaiveDate,
) -> Result<u64, EconomyError> {
    if !state.bonus_available(today) {
        return fail(state, EconomyError::BonusAlreadyClaimed);
    }

    let amount = state.config.daily_bonus;
    let op = next_op(state);
    let balance = match bank.credit(&state.user, op, amount) {
        Ok(b) => b,
        Err(e) => return fail(state, e.into()),
    };

    state.balance = Some(balance);
    state.last_bonus = Some(today);
    state.dirty = true;
    state.purchase_flash = 8;
    state.add_log(
        &format!("Daily bonus claimed! +{} coins", format_number(amount)),
        true,
    );
    crate::console::log(&format!("daily bonus claimed by {} on {}", state.user, today));
    Ok(amount)
}

/// Buy the next level of `kind`, paid from the account balance.
pub fn buy_upgrade(
    state: &mut ClickerState,
    bank: &mut dyn BalanceService,
    kind: UpgradeKind,
) -> Result<u64, EconomyError> {
    let cost = state.upgrade_cost(kind);
    let balance = match state.balance {
        Some(b) => b,
        None => return fail(state, EconomyError::BalanceUnavailable),
    };
    if balance < cost {
        return fail(state, EconomyError::InsufficientFunds { cost, balance });
    }

    let op = next_op(state);
    let balance = match bank.debit(&state.user, op, cost) {
        Ok(b) => b,
        Err(RemoteError::InsufficientFunds { balance, .. }) => {
            // Our cached balance was stale; adopt the service's figure.
            state.balance = Some(balance);
            return fail(state, EconomyError::InsufficientFunds { cost, balance });
        }
        Err(e) => return fail(state, e.into()),
    };

    apply_upgrade(state, kind);
    state.balance = Some(balance);
    state.dirty = true;
    state.purchase_flash = 8;
    let msg = match kind {
        UpgradeKind::Multiplier => format!("Multiplier upgraded! Now x{} per click", state.stats.multiplier),
        UpgradeKind::EnergyCapacity => format!("Battery upgraded! Energy {}/{}", state.stats.energy, state.stats.max_energy),
    };
    state.add_log(&msg, true);
    Ok(cost)
}

fn apply_upgrade(state: &mut ClickerState, kind: UpgradeKind) {
    let stats = &mut state.stats;
    match kind {
        UpgradeKind::Multiplier => {
            stats.multiplier = stats.multiplier.saturating_add(1);
        }
        UpgradeKind::EnergyCapacity => {
            stats.max_energy = stats
                .max_energy
                .saturating_add(state.config.energy_upgrade_step);
            // Capacity purchases come with a full refill.
            stats.energy = stats.max_energy;
        }
    }
}

/// Format a number with comma separators (e.g. 1234567 -> "1,234,567").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
