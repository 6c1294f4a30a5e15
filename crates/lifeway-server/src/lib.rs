//! HTTP and `WebSocket` surface for the Lifeway service.
//!
//! Exposes the board API (upload a seed, read computed generations,
//! kick off a final-state search) and the `/ws` streaming session that
//! drives the cycle detector with live per-generation progress.
//!
//! # Modules
//!
//! - [`config`] -- environment-driven service configuration
//! - [`state`] -- shared application state
//! - [`router`] -- route assembly with CORS and trace layers
//! - [`handlers`] -- REST endpoint handlers
//! - [`ws`] -- the streaming session
//! - [`protocol`] -- wire frames and boundary validation
//! - [`error`] -- API error type and response envelope
//! - [`server`] -- bind/serve lifecycle

pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;
