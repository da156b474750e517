//! Server plugin composition.
//!
//! Protocol plugins are external collaborators; the host only knows their
//! names and the RPC capabilities they declare. The registry composes them
//! in order and merges their declarations into the manifest.

pub mod builtin;
pub mod registry;

pub use builtin::{builtin_plugins, compose, DISCOVERY_PLUGIN};
pub use registry::{write_manifest, Plugin, PluginRegistry, MANIFEST_FILE};
