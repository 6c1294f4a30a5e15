//! Sparse Game of Life evolution engine.
//!
//! The engine is pure and thread-safe by construction: boards are
//! immutable values, [`SparseBoard::next_generation`] produces a new
//! board, and nothing here blocks or performs I/O. Runtime is linear in
//! the live-cell count, independent of the board area.
//!
//! # Modules
//!
//! - [`rules`] -- the Conway transition function
//! - [`board`] -- the sparse board representation and stepping
//! - [`detector`] -- drives a board to a fixed point, an oscillation, or
//!   an attempt ceiling, publishing per-generation progress
//! - [`error`] -- shared error type

pub mod board;
pub mod detector;
pub mod error;
pub mod rules;

// Re-export primary types for convenience.
pub use board::SparseBoard;
pub use detector::{HISTORY_WINDOW, Outcome, run_detection};
pub use error::EngineError;
