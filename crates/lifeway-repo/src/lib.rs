//! Three-tier board repository.
//!
//! Reads flow through an in-process memory tier, then the shared cache,
//! then `PostgreSQL`; writes go through to `PostgreSQL` and repopulate
//! the caches on the way back. The cache tiers are strictly advisory: a
//! cold or failing cache changes latency, never answers.
//!
//! ```text
//! caller
//!   |
//!   +-- MemoryCache  (per-process, bounded, read-only contract)
//!   +-- CachePool    (shared, TTL'd, failures swallowed)
//!   +-- BoardStore   (durable source of truth)
//! ```
//!
//! # Modules
//!
//! - [`repository`] -- the read-through/write-through board API
//! - [`memory`] -- the bounded in-process tier
//! - [`error`] -- repository error type

pub mod error;
pub mod memory;
pub mod repository;

// Re-export primary types for convenience.
pub use error::RepoError;
pub use memory::MemoryCache;
pub use repository::{BoardRepository, CacheTtls};
