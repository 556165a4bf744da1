//! Budget Challenge persistence.
//!
//! The plan is stored as a bare JSON object and the best score as a plain
//! number, the same layout the web version of the challenge used, so no
//! version envelope is needed here.

use crate::storage::{KeyValueStore, StorageError};

use super::logic::is_valid;
use super::state::Allocations;

const PROGRESS_KEY: &str = "budget-challenge-progress";
const BEST_KEY: &str = "budget-challenge-progress-best";

/// Saved plan, if present and usable.
pub fn load_plan(store: &dyn KeyValueStore) -> Option<Allocations> {
    let json = store.get(PROGRESS_KEY)?;
    match serde_json::from_str::<Allocations>(&json) {
        Ok(alloc) if is_valid(&alloc) => Some(alloc),
        Ok(_) => {
            crate::console::warn("saved budget plan exceeds 100%, using default");
            None
        }
        Err(e) => {
            crate::console::warn(&format!("saved budget plan unreadable: {e}"));
            None
        }
    }
}

pub fn save_plan(store: &mut dyn KeyValueStore, alloc: &Allocations) -> Result<(), StorageError> {
    let json = serde_json::to_string(alloc).map_err(|e| StorageError::Encode {
        key: PROGRESS_KEY.to_string(),
        reason: e.to_string(),
    })?;
    store.set(PROGRESS_KEY, &json)
}

/// Best score so far, 0 when missing or unreadable. Values above 100 are
/// clamped.
pub fn load_best(store: &dyn KeyValueStore) -> u32 {
    store
        .get(BEST_KEY)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.min(100.0).round() as u32)
        .unwrap_or(0)
}

pub fn save_best(store: &mut dyn KeyValueStore, best: u32) -> Result<(), StorageError> {
    store.set(BEST_KEY, &best.to_string())
}
