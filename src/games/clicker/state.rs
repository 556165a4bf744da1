//! Coin Clicker state definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EconomyConfig;
use crate::storage::UserId;

/// Per-user game statistics, persisted across sessions.
///
/// Field names are camelCase on disk so blobs written by earlier web
/// versions of the game still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    /// Lifetime click count.
    pub total_clicks: u64,
    /// Lifetime coins earned by clicking (bonuses and upgrades excluded).
    pub total_earned: u64,
    /// Coins per click, always >= 1.
    pub multiplier: u32,
    /// Remaining energy, within `0..=max_energy`.
    pub energy: u32,
    pub max_energy: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            total_clicks: 0,
            total_earned: 0,
            multiplier: 1,
            energy: 100,
            max_energy: 100,
        }
    }
}

impl GameStats {
    /// Fresh stats for the given economy.
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            energy: config.base_max_energy,
            max_energy: config.base_max_energy,
            ..Self::default()
        }
    }

    /// Force the invariants back on data read from storage.
    pub fn sanitized(mut self, config: &EconomyConfig) -> Self {
        self.multiplier = self.multiplier.max(1);
        self.max_energy = self.max_energy.max(config.base_max_energy);
        self.energy = self.energy.min(self.max_energy);
        self
    }

    /// Energy as a fraction of capacity, for the gauge.
    pub fn energy_ratio(&self) -> f64 {
        if self.max_energy == 0 {
            0.0
        } else {
            self.energy as f64 / self.max_energy as f64
        }
    }
}

/// Purchasable upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    Multiplier,
    EnergyCapacity,
}

impl UpgradeKind {
    pub fn all() -> &'static [UpgradeKind] {
        &[UpgradeKind::Multiplier, UpgradeKind::EnergyCapacity]
    }

    pub fn name(&self) -> &str {
        match self {
            UpgradeKind::Multiplier => "Click multiplier",
            UpgradeKind::EnergyCapacity => "Bigger battery",
        }
    }

    pub fn key(&self) -> char {
        match self {
            UpgradeKind::Multiplier => '1',
            UpgradeKind::EnergyCapacity => '2',
        }
    }

    /// Price of the next level given the current stats.
    pub fn cost(&self, stats: &GameStats, config: &EconomyConfig) -> u64 {
        match self {
            UpgradeKind::Multiplier => stats.multiplier as u64 * config.multiplier_cost_step,
            UpgradeKind::EnergyCapacity => {
                let extra = stats.max_energy.saturating_sub(config.base_max_energy) as u64;
                extra * config.energy_cost_step + config.energy_cost_base
            }
        }
    }

    /// Short description of what the next level does.
    pub fn effect_label(&self, stats: &GameStats, config: &EconomyConfig) -> String {
        match self {
            UpgradeKind::Multiplier => {
                format!("x{} -> x{} per click", stats.multiplier, stats.multiplier + 1)
            }
            UpgradeKind::EnergyCapacity => format!(
                "{} -> {} energy, full refill",
                stats.max_energy,
                stats.max_energy + config.energy_upgrade_step
            ),
        }
    }
}

/// Log entry shown in the activity panel.
#[derive(Clone, Debug)]
pub struct ClickerLogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a Coin Clicker session.
pub struct ClickerState {
    pub user: UserId,
    pub config: EconomyConfig,
    pub stats: GameStats,
    /// Last balance reported by the account service. `None` until the
    /// session's first successful read.
    pub balance: Option<u64>,
    /// Calendar day of the last successful daily bonus claim.
    pub last_bonus: Option<NaiveDate>,
    /// Nonce stamped on this session's remote deltas.
    pub session: u32,
    /// Sequence number of the last remote delta issued this session.
    pub op_seq: u64,
    /// Ticks accumulated towards the next energy regeneration step.
    pub regen_ticks: u32,
    /// Set when `stats` or `last_bonus` changed and should be written out.
    pub dirty: bool,
    pub log: Vec<ClickerLogEntry>,
    /// Ticks remaining for the coin press highlight.
    pub click_flash: u32,
    /// Ticks remaining for the purchase highlight.
    pub purchase_flash: u32,
    /// Ticks remaining for the "+N" popup over the coin.
    pub earn_popup: u32,
    pub anim_frame: u32,
}

impl ClickerState {
    pub fn new(user: UserId, config: EconomyConfig) -> Self {
        let stats = GameStats::new(&config);
        Self {
            user,
            config,
            stats,
            balance: None,
            last_bonus: None,
            session: 0,
            op_seq: 0,
            regen_ticks: 0,
            dirty: false,
            log: vec![ClickerLogEntry {
                text: "Welcome to Coin Clicker! Tap the coin to earn.".into(),
                is_important: true,
            }],
            click_flash: 0,
            purchase_flash: 0,
            earn_popup: 0,
            anim_frame: 0,
        }
    }

    pub fn with_session(mut self, session: u32) -> Self {
        self.session = session;
        self
    }

    /// Whether the daily bonus can be claimed on `today`.
    pub fn bonus_available(&self, today: NaiveDate) -> bool {
        self.last_bonus != Some(today)
    }

    pub fn upgrade_cost(&self, kind: UpgradeKind) -> u64 {
        kind.cost(&self.stats, &self.config)
    }

    /// Whether the last known balance covers `kind`.
    pub fn can_afford(&self, kind: UpgradeKind) -> bool {
        self.balance
            .map(|b| b >= self.upgrade_cost(kind))
            .unwrap_or(false)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(ClickerLogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}
