//! In-memory test set store
//!
//! Mirrors the Redis semantics the importer relies on: set members are
//! unique and string writes replace the previous value.

use crate::error::{ConnectionError, StoreResult};
use crate::store::TestSetStore;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    strings: BTreeMap<String, String>,
    sets: BTreeMap<String, BTreeSet<String>>,
    unhealthy: Option<String>,
    pings: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose liveness check always fails with `reason`
    pub fn unhealthy(reason: &str) -> Self {
        Self {
            unhealthy: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// String value at `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Members of the set at `key`, sorted
    pub fn members(&self, key: &str) -> Vec<String> {
        self.sets
            .get(key)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of keys of any type
    pub fn key_count(&self) -> usize {
        self.strings.len() + self.sets.len()
    }

    /// Number of liveness checks performed
    pub fn ping_count(&self) -> usize {
        self.pings
    }
}

impl TestSetStore for MemoryStore {
    fn ping(&mut self) -> Result<(), ConnectionError> {
        self.pings += 1;
        match &self.unhealthy {
            Some(reason) => Err(ConnectionError::LivenessFailed {
                url: "memory://".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn add_to_index(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        Ok(self
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string()))
    }

    fn put_payload(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        self.strings.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_membership_is_idempotent() {
        let mut store = MemoryStore::new();
        assert!(store.add_to_index("sz:test_sets", "GSM8k").unwrap());
        assert!(!store.add_to_index("sz:test_sets", "GSM8k").unwrap());
        assert!(store.add_to_index("sz:test_sets", "MATH").unwrap());
        assert_eq!(store.members("sz:test_sets"), vec!["GSM8k", "MATH"]);
    }

    #[test]
    fn test_put_replaces() {
        let mut store = MemoryStore::new();
        store.put_payload("k", "old").unwrap();
        store.put_payload("k", "new").unwrap();
        assert_eq!(store.get("k"), Some("new"));
        assert_eq!(store.key_count(), 1);
    }

    #[test]
    fn test_unhealthy_ping() {
        let mut store = MemoryStore::unhealthy("connection reset");
        let err = store.ping().unwrap_err();
        assert!(matches!(err, ConnectionError::LivenessFailed { .. }));
        assert_eq!(store.ping_count(), 1);
    }
}
