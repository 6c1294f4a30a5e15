//! Bounded in-process board tier.
//!
//! Board records are write-once, so this tier has a read-only contract:
//! an entry is either absent or identical to the durable truth. Eviction
//! is least-recently-used with a fixed capacity; lookups promote.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use lifeway_types::{BoardId, BoardSnapshot};

/// Default number of boards kept in process.
const DEFAULT_CAPACITY: usize = 256;

/// A concurrency-safe, bounded map of board snapshots.
pub struct MemoryCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<BoardId, BoardSnapshot>,
    // Recency order, least recent at the front.
    order: VecDeque<BoardId>,
}

impl MemoryCache {
    /// Create a tier with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a tier bounded to `capacity` entries. A capacity of zero
    /// disables the tier (every lookup misses).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Look up a board, promoting it to most recently used.
    pub fn get(&self, board_id: BoardId) -> Option<BoardSnapshot> {
        let mut inner = self.inner.lock().ok()?;
        let snapshot = inner.entries.get(&board_id)?.clone();
        inner.promote(board_id);
        Some(snapshot)
    }

    /// Insert a board, evicting the least recently used entry when full.
    pub fn insert(&self, snapshot: BoardSnapshot) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let board_id = snapshot.board_id;
        if inner.entries.insert(board_id, snapshot).is_none()
            && inner.entries.len() > self.capacity
            && let Some(evicted) = inner.order.pop_front()
        {
            inner.entries.remove(&evicted);
        }
        inner.promote(board_id);
    }

    /// Number of boards currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.entries.len())
    }

    /// Whether the tier is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Move `board_id` to the most-recent end of the order queue.
    fn promote(&mut self, board_id: BoardId) {
        self.order.retain(|id| *id != board_id);
        self.order.push_back(board_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeway_types::Dimensions;

    fn snapshot(id: BoardId) -> BoardSnapshot {
        BoardSnapshot {
            board_id: id,
            cells: vec![(0, 0)],
            dimensions: Dimensions::new(2, 2).expect("valid dims"),
        }
    }

    #[test]
    fn insert_then_get() {
        let cache = MemoryCache::new();
        let id = BoardId::new();
        cache.insert(snapshot(id));
        assert_eq!(cache.get(id).map(|s| s.board_id), Some(id));
        assert!(cache.get(BoardId::new()).is_none());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = MemoryCache::with_capacity(2);
        let (a, b, c) = (BoardId::new(), BoardId::new(), BoardId::new());
        cache.insert(snapshot(a));
        cache.insert(snapshot(b));
        // Touch `a` so `b` becomes the eviction candidate.
        let _ = cache.get(a);
        cache.insert(snapshot(c));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(a).is_some());
        assert!(cache.get(b).is_none());
        assert!(cache.get(c).is_some());
    }

    #[test]
    fn zero_capacity_disables_the_tier() {
        let cache = MemoryCache::with_capacity(0);
        let id = BoardId::new();
        cache.insert(snapshot(id));
        assert!(cache.is_empty());
        assert!(cache.get(id).is_none());
    }

    #[test]
    fn reinsert_does_not_grow_the_tier() {
        let cache = MemoryCache::with_capacity(4);
        let id = BoardId::new();
        cache.insert(snapshot(id));
        cache.insert(snapshot(id));
        assert_eq!(cache.len(), 1);
    }
}
