//! Top-level facade crate for sbot-host.
//!
//! Re-exports core types and the daemon library so users can depend on a single crate.

pub mod core {
    pub use sbot_host_core::*;
}

pub mod daemon {
    pub use sbot_host_daemon::*;
}
