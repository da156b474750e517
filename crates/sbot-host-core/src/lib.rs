//! sbot-host core: transport-agnostic discovery primitives and error types.
//!
//! This crate defines the discovery wire contract, origin classification and
//! the error surface shared by the daemon and its tests. It carries no
//! transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `HostError`/`Result` so a hostile discovery client cannot crash
//! the daemon.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{HostError, Result};
