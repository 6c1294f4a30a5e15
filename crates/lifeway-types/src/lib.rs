//! Shared data model for the Lifeway board-evolution service.
//!
//! This crate holds the types every other layer speaks: the opaque
//! [`BoardId`], the [`Coordinate`]/[`Dimensions`] geometry primitives,
//! the dense wire-format [`Grid`] with its validation, and the persisted
//! [`BoardRecord`].
//!
//! # Modules
//!
//! - [`ids`] -- type-safe identifier wrapper around [`uuid::Uuid`]
//! - [`geometry`] -- cell coordinates and board bounds
//! - [`grid`] -- dense 0/1 matrix form and rectangularity validation
//! - [`board`] -- the write-once persisted board record

pub mod board;
pub mod geometry;
pub mod grid;
pub mod ids;

// Re-export primary types for convenience.
pub use board::{BoardRecord, BoardSnapshot};
pub use geometry::{Coordinate, Dimensions};
pub use grid::{Grid, GridError, validate_grid};
pub use ids::BoardId;
