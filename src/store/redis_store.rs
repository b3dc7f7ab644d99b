//! Redis-backed test set store
//!
//! Uses a single synchronous connection. The import is one liveness check
//! followed by two writes, so there is nothing to multiplex and the
//! connection is closed when the store is dropped.

use crate::error::{ConnectionError, StoreError, StoreResult};
use crate::store::{StoreConfig, TestSetStore};

use redis::{Client, Commands, Connection};
use tracing::debug;

/// Redis store holding one open connection
pub struct RedisStore {
    connection: Connection,
    url: String,
}

impl RedisStore {
    /// Open a connection to the configured Redis server.
    ///
    /// This only establishes the socket; call [`TestSetStore::ping`] to
    /// verify the server answers.
    pub fn connect(config: &StoreConfig) -> Result<Self, ConnectionError> {
        let url = config.url();

        let client =
            Client::open(config.connection_info()).map_err(|e| ConnectionError::InvalidAddress {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let connection = client
            .get_connection_with_timeout(config.connect_timeout)
            .map_err(|e| ConnectionError::Unreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        connection
            .set_read_timeout(Some(config.connect_timeout))
            .and_then(|_| connection.set_write_timeout(Some(config.connect_timeout)))
            .map_err(|e| ConnectionError::Unreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        debug!(url = %url, "Opened Redis connection");

        Ok(Self { connection, url })
    }
}

impl TestSetStore for RedisStore {
    fn ping(&mut self) -> Result<(), ConnectionError> {
        let reply: String = redis::cmd("PING")
            .query(&mut self.connection)
            .map_err(|e| ConnectionError::LivenessFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        if reply != "PONG" {
            return Err(ConnectionError::LivenessFailed {
                url: self.url.clone(),
                reason: format!("unexpected PING reply '{}'", reply),
            });
        }
        Ok(())
    }

    fn add_to_index(&mut self, key: &str, member: &str) -> StoreResult<bool> {
        let added: i64 = self
            .connection
            .sadd(key, member)
            .map_err(|e| StoreError::IndexFailed {
                key: key.to_string(),
                member: member.to_string(),
                reason: e.to_string(),
            })?;
        Ok(added > 0)
    }

    fn put_payload(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        self.connection
            .set::<_, _, ()>(key, payload)
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}
