//! Discovery protocol modules.
//!
//! - `discovery`: JSON request/response frames exchanged with local
//!   applications and browser extensions.
//! - `origin`: classification of requester origins for operator display.
//!
//! Parsers are panic-free: malformed input is reported as `HostError`.

pub mod discovery;
pub mod origin;

pub use discovery::{decode_request, AccessDecision, AccessRequest, DiscoveryFrame};
pub use origin::{describe_decision, OriginKind, EXTENSION_SCHEME};
