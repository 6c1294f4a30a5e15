//! Shared-cache operations and key patterns.
//!
//! The cache memoises per-board state under TTL'd keys. Every entry is
//! recomputable from the durable seed, so expiry and eviction are
//! harmless and the repository treats every cache failure as a miss.
//!
//! # Key Patterns
//!
//! | Pattern | Payload | TTL |
//! |---------|---------|-----|
//! | `board:{id}:current` | JSON `{ state: [[row,col],...], dimensions }` | CURRENT |
//! | `board:{id}:generation:{G}` | JSON dense matrix | GENERATION |
//! | `board:{id}:final` | reserved for a future final-state cache | FINAL |

use fred::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lifeway_types::{BoardId, BoardRecord, Dimensions};

use crate::error::DbError;

/// Connection handle to the shared Redis-compatible cache.
///
/// Wraps a [`fred::prelude::Client`] and provides typed JSON operations
/// for the per-board key patterns.
#[derive(Clone)]
pub struct CachePool {
    client: Client,
}

impl CachePool {
    /// Connect to the cache at the given URL.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Cache`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let config =
            Config::from_url(url).map_err(|e| DbError::Config(format!("Invalid cache URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to shared cache");
        Ok(Self { client })
    }

    /// Serialize `value` as JSON and store it at `key` with a TTL in
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Cache`] if the write fails.
    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: i64,
    ) -> Result<(), DbError> {
        let json = serde_json::to_string(value)?;
        let _: () = self
            .client
            .set(key, json.as_str(), Some(Expiration::EX(ttl_secs)), None, false)
            .await?;
        Ok(())
    }

    /// Read the value at `key` and deserialize from JSON.
    ///
    /// Returns `None` on a miss; an expired or absent key is a normal
    /// outcome for an advisory cache.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if deserialization fails.
    /// Returns [`DbError::Cache`] if the read fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        let value: Option<String> = self.client.get(key).await?;
        value.map(|s| serde_json::from_str(&s)).transpose().map_err(DbError::from)
    }

    /// Delete a key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Cache`] if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), DbError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }

    /// Flush all keys from the cache instance.
    ///
    /// **WARNING:** This deletes all data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Cache`] if the flush fails.
    pub async fn flush_all(&self) -> Result<(), DbError> {
        let _: () = self.client.flushall(false).await?;
        Ok(())
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

// =========================================================================
// Key builders
// =========================================================================

/// Cache key for a board's current (seed) state.
pub fn current_key(board_id: BoardId) -> String {
    format!("board:{board_id}:current")
}

/// Cache key for a board's computed state at generation `g`.
pub fn generation_key(board_id: BoardId, g: u64) -> String {
    format!("board:{board_id}:generation:{g}")
}

/// Cache key reserved for a board's final (settled) state.
pub fn final_key(board_id: BoardId) -> String {
    format!("board:{board_id}:final")
}

// =========================================================================
// Cached payloads
// =========================================================================

/// The `board:{id}:current` payload: sparse cells plus dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedBoard {
    /// Sparse live-cell list as `(row, col)` pairs.
    pub state: Vec<(i64, i64)>,
    /// The bounding rectangle.
    pub dimensions: Dimensions,
}

impl CachedBoard {
    /// Project a full record down to the cached form.
    pub fn from_record(record: &BoardRecord) -> Self {
        Self {
            state: record.cells.clone(),
            dimensions: record.dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn key_patterns() {
        let id = BoardId::from(Uuid::nil());
        assert_eq!(
            current_key(id),
            "board:00000000-0000-0000-0000-000000000000:current"
        );
        assert_eq!(
            generation_key(id, 7),
            "board:00000000-0000-0000-0000-000000000000:generation:7"
        );
        assert_eq!(
            final_key(id),
            "board:00000000-0000-0000-0000-000000000000:final"
        );
    }

    #[test]
    fn cached_board_round_trip() {
        let dims = Dimensions::new(3, 3).expect("valid dims");
        let cached = CachedBoard {
            state: vec![(0, 0), (2, 2)],
            dimensions: dims,
        };
        let json = serde_json::to_string(&cached).expect("serialize");
        let restored: CachedBoard = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, cached);
    }
}
