//! Discovery access gate.
//!
//! The broker answers inbound discovery requests from the single grant flag
//! and tells the operator about every answer. The grant store is the only
//! shared mutable state; the operator surface writes it, the broker reads it.

pub mod broker;
pub mod grant;

pub use broker::{AccessBroker, BrokerHandle, PendingRequest};
pub use grant::GrantStateStore;
