//! Scam Detective best-score persistence.

use crate::storage::{KeyValueStore, StorageError};

const BEST_KEY: &str = "scam-detective-best";

pub fn load_best(store: &dyn KeyValueStore) -> u32 {
    store
        .get(BEST_KEY)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn save_best(store: &mut dyn KeyValueStore, best: u32) -> Result<(), StorageError> {
    store.set(BEST_KEY, &best.to_string())
}
