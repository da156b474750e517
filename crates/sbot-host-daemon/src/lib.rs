//! sbot host daemon library entry.
//!
//! Wires identity, plugin composition, the discovery access gate, the
//! operator surface and the HTTP/WS transport into one process. Consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod access;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod identity;
pub mod notify;
pub mod obs;
pub mod operator;
pub mod ops;
pub mod plugins;
pub mod router;
pub mod shutdown;
pub mod transport;
