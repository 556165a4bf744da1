//! Startup configuration.
//!
//! Resolution order for the player id: `?user=` query parameter, then the
//! `kids_bank_user` storage key, then `guest`. Economy tuning can be
//! overridden by a JSON blob under `kids_bank_economy`; unknown or missing
//! fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, UserId};

pub const USER_KEY: &str = "kids_bank_user";
pub const ECONOMY_KEY: &str = "kids_bank_economy";

/// Tunables of the coin clicker economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Ticks between energy regeneration steps (10 ticks = 1 second).
    pub regen_interval_ticks: u32,
    /// Energy restored per step.
    pub regen_amount: u32,
    /// Coins granted by the daily bonus.
    pub daily_bonus: u64,
    /// Starting (and minimum) energy capacity.
    pub base_max_energy: u32,
    /// Capacity gained per energy upgrade.
    pub energy_upgrade_step: u32,
    /// Multiplier upgrade cost = multiplier × this.
    pub multiplier_cost_step: u64,
    /// Energy upgrade cost = (max_energy − base) × step + base cost.
    pub energy_cost_base: u64,
    pub energy_cost_step: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            regen_interval_ticks: 50,
            regen_amount: 2,
            daily_bonus: 50,
            base_max_energy: 100,
            energy_upgrade_step: 20,
            multiplier_cost_step: 100,
            energy_cost_base: 200,
            energy_cost_step: 10,
        }
    }
}

impl EconomyConfig {
    /// Zero intervals or a zero base capacity would stall the game.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.regen_interval_ticks == 0 {
            self.regen_interval_ticks = defaults.regen_interval_ticks;
        }
        if self.base_max_energy == 0 {
            self.base_max_energy = defaults.base_max_energy;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user: UserId,
    /// Balance given to a freshly opened stand-in account.
    pub opening_balance: u64,
    pub economy: EconomyConfig,
}

impl AppConfig {
    /// Build the config from an optional query-string user and the store.
    pub fn resolve(query_user: Option<&str>, store: &dyn KeyValueStore) -> Self {
        let user = query_user
            .and_then(UserId::new)
            .or_else(|| store.get(USER_KEY).as_deref().and_then(UserId::new))
            .unwrap_or_else(UserId::guest);

        let economy = match store.get(ECONOMY_KEY) {
            Some(json) => match serde_json::from_str::<EconomyConfig>(&json) {
                Ok(cfg) => {
                    crate::console::log("economy override loaded");
                    cfg.sanitized()
                }
                Err(e) => {
                    crate::console::warn(&format!("ignoring invalid economy override: {e}"));
                    EconomyConfig::default()
                }
            },
            None => EconomyConfig::default(),
        };

        Self {
            user,
            opening_balance: 0,
            economy,
        }
    }
}

/// `?user=` from the page URL.
#[cfg(target_arch = "wasm32")]
pub fn query_user() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("user")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query_user() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn query_user_wins() {
        let mut store = MemoryStore::new();
        store.set(USER_KEY, "stored").unwrap();
        let cfg = AppConfig::resolve(Some("from-url"), &store);
        assert_eq!(cfg.user.as_str(), "from-url");
    }

    #[test]
    fn falls_back_to_stored_then_guest() {
        let mut store = MemoryStore::new();
        assert_eq!(AppConfig::resolve(None, &store).user.as_str(), "guest");
        store.set(USER_KEY, "stored").unwrap();
        assert_eq!(AppConfig::resolve(Some("  "), &store).user.as_str(), "stored");
    }

    #[test]
    fn economy_override_is_partial() {
        let mut store = MemoryStore::new();
        store.set(ECONOMY_KEY, r#"{"daily_bonus": 75}"#).unwrap();
        let cfg = AppConfig::resolve(None, &store);
        assert_eq!(cfg.economy.daily_bonus, 75);
        assert_eq!(cfg.economy.regen_amount, 2);
    }

    #[test]
    fn invalid_economy_override_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(ECONOMY_KEY, "nope").unwrap();
        let cfg = AppConfig::resolve(None, &store);
        assert_eq!(cfg.economy, EconomyConfig::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut store = MemoryStore::new();
        store
            .set(ECONOMY_KEY, r#"{"regen_interval_ticks": 0, "base_max_energy": 0}"#)
            .unwrap();
        let cfg = AppConfig::resolve(None, &store);
        assert_eq!(cfg.economy.regen_interval_ticks, 50);
        assert_eq!(cfg.economy.base_max_energy, 100);
    }
}
