//! Remote account balance boundary.
//!
//! The balance lives on the account service and is authoritative there.
//! Games only talk to it through [`BalanceService`]: read once per session,
//! then apply additive credits and debits. Every delta carries an [`OpId`]
//! so a transport can drop duplicate deliveries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{scoped_key, KeyValueStore, UserId};

/// Identifier of a single balance delta: a per-session nonce plus a
/// sequence number that increases within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpId {
    pub session: u32,
    pub seq: u64,
}

/// Fresh nonce for a run of balance operations. Must differ between two
/// launches of a game so their sequence numbers cannot collide.
#[cfg(target_arch = "wasm32")]
pub fn session_nonce() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

#[cfg(not(target_arch = "wasm32"))]
pub fn session_nonce() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0)
}

/// How many applied op ids an account remembers for duplicate detection.
const RECENT_OPS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RemoteError {
    #[error("account service unavailable: {0}")]
    Unavailable(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
}

pub trait BalanceService {
    /// Current authoritative balance.
    fn read_balance(&mut self, user: &UserId) -> Result<u64, RemoteError>;

    /// Add `amount`. Returns the new balance.
    fn credit(&mut self, user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError>;

    /// Subtract `amount`. Returns the new balance.
    fn debit(&mut self, user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError>;
}

/// Account record as stored by [`StorageBank`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
struct AccountRecord {
    balance: u64,
    recent_ops: Vec<OpId>,
}

const ACCOUNT_PREFIX: &str = "account";

/// Account ledger kept in a [`KeyValueStore`].
///
/// Stands in for the hosted account service in the browser build. A missing
/// account is opened with `opening_balance` on first access.
pub struct StorageBank<S: KeyValueStore> {
    store: S,
    opening_balance: u64,
}

impl<S: KeyValueStore> StorageBank<S> {
    pub fn new(store: S, opening_balance: u64) -> Self {
        Self {
            store,
            opening_balance,
        }
    }

    fn load(&self, user: &UserId) -> AccountRecord {
        let key = scoped_key(ACCOUNT_PREFIX, user);
        match self.store.get(&key) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                crate::console::warn(&format!("account record for {user} unreadable ({e}), reopening"));
                AccountRecord {
                    balance: self.opening_balance,
                    recent_ops: Vec::new(),
                }
            }),
            None => AccountRecord {
                balance: self.opening_balance,
                recent_ops: Vec::new(),
            },
        }
    }

    fn store_record(&mut self, user: &UserId, record: &AccountRecord) -> Result<(), RemoteError> {
        let key = scoped_key(ACCOUNT_PREFIX, user);
        let json = serde_json::to_string(record).map_err(|e| RemoteError::Rejected(e.to_string()))?;
        self.store
            .set(&key, &json)
            .map_err(|e| RemoteError::Unavailable(e.to_string()))
    }

    fn apply(
        &mut self,
        user: &UserId,
        op: OpId,
        f: impl FnOnce(u64) -> Result<u64, RemoteError>,
    ) -> Result<u64, RemoteError> {
        let mut record = self.load(user);
        if record.recent_ops.contains(&op) {
            // Already applied.
            return Ok(record.balance);
        }
        record.balance = f(record.balance)?;
        record.recent_ops.push(op);
        if record.recent_ops.len() > RECENT_OPS {
            record.recent_ops.remove(0);
        }
        self.store_record(user, &record)?;
        Ok(record.balance)
    }
}

impl<S: KeyValueStore> BalanceService for StorageBank<S> {
    fn read_balance(&mut self, user: &UserId) -> Result<u64, RemoteError> {
        let key = scoped_key(ACCOUNT_PREFIX, user);
        let record = self.load(user);
        if self.store.get(&key).is_none() {
            self.store_record(user, &record)?;
        }
        Ok(record.balance)
    }

    fn credit(&mut self, user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError> {
        self.apply(user, op, |balance| {
            balance
                .checked_add(amount)
                .ok_or_else(|| RemoteError::Rejected("balance overflow".into()))
        })
    }

    fn debit(&mut self, user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError> {
        self.apply(user, op, |balance| {
            balance
                .checked_sub(amount)
                .ok_or(RemoteError::InsufficientFunds {
                    balance,
                    requested: amount,
                })
        })
    }
}

/// Test double: in-memory balance with failure injection and a call log.
#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Read,
        Credit(u64),
        Debit(u64),
    }

    #[derive(Default)]
    pub struct FakeBank {
        pub balance: u64,
        pub calls: Vec<Call>,
        pub ops: Vec<OpId>,
        /// When set, every credit/debit fails with `Unavailable`.
        pub offline: bool,
    }

    impl FakeBank {
        pub fn with_balance(balance: u64) -> Self {
            Self {
                balance,
                ..Self::default()
            }
        }

        pub fn remote_calls(&self) -> usize {
            self.calls.iter().filter(|c| **c != Call::Read).count()
        }
    }

    impl BalanceService for FakeBank {
        fn read_balance(&mut self, _user: &UserId) -> Result<u64, RemoteError> {
            self.calls.push(Call::Read);
            if self.offline {
                return Err(RemoteError::Unavailable("offline".into()));
            }
            Ok(self.balance)
        }

        fn credit(&mut self, _user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError> {
            self.calls.push(Call::Credit(amount));
            self.ops.push(op);
            if self.offline {
                return Err(RemoteError::Unavailable("offline".into()));
            }
            self.balance += amount;
            Ok(self.balance)
        }

        fn debit(&mut self, _user: &UserId, op: OpId, amount: u64) -> Result<u64, RemoteError> {
            self.calls.push(Call::Debit(amount));
            self.ops.push(op);
            if self.offline {
                return Err(RemoteError::Unavailable("offline".into()));
            }
            if amount > self.balance {
                return Err(RemoteError::InsufficientFunds {
                    balance: self.balance,
                    requested: amount,
                });
            }
            self.balance -= amount;
            Ok(self.balance)
        }
    }
}
