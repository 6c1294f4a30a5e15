//! Type-safe identifier wrapper around [`Uuid`].
//!
//! A board is addressed by an opaque [`BoardId`] minted when the seed is
//! uploaded and never reused. IDs are UUID v4 so they match the boundary
//! regex `^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$`
//! in their canonical lowercase rendering.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a persisted board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardId(pub Uuid);

impl BoardId {
    /// Mint a fresh identifier using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse an identifier from its canonical hyphenated string form.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`uuid::Error`] if the string is not a
    /// valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for BoardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BoardId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<BoardId> for Uuid {
    fn from(id: BoardId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(BoardId::new(), BoardId::new());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = BoardId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn parse_round_trip() {
        let id = BoardId::new();
        let parsed = BoardId::parse(&id.to_string());
        assert_eq!(parsed.ok(), Some(id));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(BoardId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = BoardId::new();
        let json = serde_json::to_string(&id).ok();
        assert!(json.is_some());
        let restored: Result<BoardId, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(id));
    }
}
