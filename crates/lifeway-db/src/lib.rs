//! Data layer for the Lifeway service (`PostgreSQL` + shared cache).
//!
//! `PostgreSQL` is the durable store of record for uploaded seeds. The
//! shared cache (any Redis-compatible instance) memoises current state
//! and computed generations under TTL'd keys; it is strictly advisory
//! and its absence never changes an answer, only its latency.
//!
//! ```text
//! Repository
//!     |
//!     +-- read-through / write-through --> CachePool  (board:{id}:* keys)
//!     |
//!     +-- source of truth -------------> BoardStore  (write-once board records)
//! ```
//!
//! # Modules
//!
//! - [`board_store`] -- `PostgreSQL` pool plus board record insertion and lookup
//! - [`cache`] -- shared-cache operations and key patterns
//! - [`error`] -- shared error types

pub mod board_store;
pub mod cache;
pub mod error;

// Re-export primary types for convenience.
pub use board_store::{BoardRow, BoardStore};
pub use cache::{CachePool, CachedBoard, current_key, final_key, generation_key};
pub use error::DbError;
