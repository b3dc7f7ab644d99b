//! Key-value store module
//!
//! Persists an assembled [`TestSet`] into the evaluation harness keyspace:
//!
//! ```text
//! <prefix>:test_sets        SET     test-set identifiers
//! <prefix>:test_set:<id>    STRING  JSON-serialized test set
//! ```
//!
//! # Module Structure
//!
//! - `redis_store`: Synchronous Redis-backed store
//! - `memory`: In-process store with the same semantics (tests, dry runs)

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

use crate::error::{ConnectionError, Result, StoreResult};
use crate::testset::TestSet;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;
use tracing::{debug, info};

/// Suffix of the index set key
pub const INDEX_KEY_SUFFIX: &str = "test_sets";

/// Segment of the payload key before the identifier
pub const PAYLOAD_KEY_SEGMENT: &str = "test_set";

/// Store connection settings and keyspace namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Redis host
    pub host: String,
    /// Redis port
    pub port: u16,
    /// Namespace prefix for all keys
    pub key_prefix: String,
    /// Timeout for connect, read and write
    pub connect_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: crate::config::DEFAULT_REDIS_HOST.to_string(),
            port: crate::config::DEFAULT_REDIS_PORT,
            key_prefix: crate::config::DEFAULT_KEY_PREFIX.to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Address handed to the Redis client
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo::default(),
        }
    }

    /// Server URL for status lines and error messages
    pub fn url(&self) -> String {
        if self.host.contains(':') {
            format!("redis://[{}]:{}/", self.host, self.port)
        } else {
            format!("redis://{}:{}/", self.host, self.port)
        }
    }

    /// Keyspace derived from the configured prefix
    pub fn keyspace(&self) -> Keyspace {
        Keyspace::new(&self.key_prefix)
    }
}

/// Key naming for test sets under one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Set holding every test-set identifier
    pub fn index_key(&self) -> String {
        format!("{}:{}", self.prefix, INDEX_KEY_SUFFIX)
    }

    /// String key holding one test set's JSON
    pub fn payload_key(&self, test_set_id: &str) -> String {
        format!("{}:{}:{}", self.prefix, PAYLOAD_KEY_SEGMENT, test_set_id)
    }
}

/// Operations the importer needs from a key-value store
pub trait TestSetStore {
    /// Synchronous round-trip proving the connection is usable
    fn ping(&mut self) -> std::result::Result<(), ConnectionError>;

    /// Add `member` to the set at `key`.
    ///
    /// Returns `true` if the member was not already present. Re-adding an
    /// existing member is a no-op.
    fn add_to_index(&mut self, key: &str, member: &str) -> StoreResult<bool>;

    /// Write `payload` at `key`, replacing any previous value
    fn put_payload(&mut self, key: &str, payload: &str) -> StoreResult<()>;
}

impl<T: TestSetStore + ?Sized> TestSetStore for &mut T {
    fn ping(&mut self) -> std::result::Result<(), ConnectionError> {
        (**self).ping()
    }

    fn add_to_index(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        (**self).add_to_index(key, member)
    }

    fn put_payload(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        (**self).put_payload(key, payload)
    }
}

/// Result of writing one test set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Index set key
    pub index_key: String,
    /// Payload key
    pub payload_key: String,
    /// Identifier was not in the index before this write
    pub newly_indexed: bool,
    /// Size of the JSON payload
    pub payload_bytes: usize,
}

/// Register the test set in the index and overwrite its payload.
///
/// Serialization happens before the first write, so a serialization failure
/// leaves the store untouched.
pub fn persist_test_set<S>(
    store: &mut S,
    keyspace: &Keyspace,
    test_set: &TestSet,
) -> Result<PersistOutcome>
where
    S: TestSetStore + ?Sized,
{
    let payload = test_set.to_json()?;
    Ok(persist_payload(store, keyspace, &test_set.id, &payload)?)
}

/// Add `test_set_id` to the index, then write its already serialized payload
pub fn persist_payload<S>(
    store: &mut S,
    keyspace: &Keyspace,
    test_set_id: &str,
    payload: &str,
) -> StoreResult<PersistOutcome>
where
    S: TestSetStore + ?Sized,
{
    let index_key = keyspace.index_key();
    let payload_key = keyspace.payload_key(test_set_id);

    let newly_indexed = store.add_to_index(&index_key, test_set_id)?;
    debug!(key = %index_key, member = %test_set_id, newly_indexed, "Indexed test set");

    store.put_payload(&payload_key, payload)?;
    info!(key = %payload_key, bytes = payload.len(), "Wrote test set payload");

    Ok(PersistOutcome {
        index_key,
        payload_key,
        newly_indexed,
        payload_bytes: payload.len(),
    })
}
