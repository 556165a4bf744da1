//! Key-value persistence shared by all games.
//!
//! The browser build writes to `localStorage`; tests and native builds use
//! [`MemoryStore`]. Everything above this layer only sees [`KeyValueStore`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    WriteFailed { key: String, reason: String },
    #[error("failed to encode `{key}`: {reason}")]
    Encode { key: String, reason: String },
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Identifier of the player whose data is being read or written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for blank ids.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Player used when nobody is identified.
    pub fn guest() -> Self {
        Self("guest".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user key, e.g. `gameStats_alice`.
pub fn scoped_key(prefix: &str, user: &UserId) -> String {
    format!("{}_{}", prefix, user.as_str())
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Shared handle so several games (and the stand-in bank) can write to the
/// same underlying store from the single UI thread.
pub type SharedStore = std::rc::Rc<std::cell::RefCell<dyn KeyValueStore>>;

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<std::cell::RefCell<T>> {
    fn get(&self, key: &str) -> Option<String> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.borrow_mut().set(key, value)
    }
}

/// Open the platform's default store.
#[cfg(target_arch = "wasm32")]
pub fn open_default() -> SharedStore {
    match BrowserStorage::open() {
        Ok(s) => std::rc::Rc::new(std::cell::RefCell::new(s)),
        Err(e) => {
            crate::console::warn(&format!("localStorage unavailable, using memory: {e}"));
            std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_default() -> SharedStore {
    std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("").is_none());
        assert!(UserId::new("   ").is_none());
        assert_eq!(UserId::new(" kid ").unwrap().as_str(), "kid");
    }

    #[test]
    fn scoped_key_format() {
        let user = UserId::new("abc-123").unwrap();
        assert_eq!(scoped_key("gameStats", &user), "gameStats_abc-123");
        assert_eq!(scoped_key("lastBonus", &user), "lastBonus_abc-123");
    }

    #[test]
    fn memory_store_set_then_overwrite() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("w"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn shared_store_writes_through() {
        let shared = std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()));
        let mut handle = shared.clone();
        handle.set("a", "1").unwrap();
        assert_eq!(shared.borrow().get("a").as_deref(), Some("1"));
    }
}
