use std::sync::Arc;

use serde_json::{Map, Value};

use sbot_host_core::error::{Result, HostError};

use crate::config::PluginSection;
use crate::plugins::registry::{Plugin, PluginRegistry};

/// Plugin that carries the discovery access gate; never left out.
pub const DISCOVERY_PLUGIN: &str = "serverDiscovery";
const CORE_PLUGIN: &str = "core";

/// A plugin known only by its declared RPC surface.
struct Declared {
    name: &'static str,
    methods: &'static [(&'static str, &'static str)],
}

impl Plugin for Declared {
    fn name(&self) -> &'static str {
        self.name
    }

    fn manifest(&self) -> Map<String, Value> {
        self.methods
            .iter()
            .map(|(m, ty)| (m.to_string(), Value::String(ty.to_string())))
            .collect()
    }
}

const fn declared(
    name: &'static str,
    methods: &'static [(&'static str, &'static str)],
) -> Declared {
    Declared { name, methods }
}

static BUILTINS: [Declared; 13] = [
    declared(CORE_PLUGIN, &[
        ("whoami", "sync"),
        ("status", "sync"),
        ("version", "sync"),
        ("get", "async"),
        ("add", "async"),
        ("publish", "async"),
        ("getLatest", "async"),
        ("latestSequence", "async"),
        ("createHistoryStream", "source"),
        ("createLogStream", "source"),
        ("createFeedStream", "source"),
        ("latest", "source"),
    ]),
    declared("master", &[]),
    declared("gossip", &[
        ("peers", "sync"),
        ("add", "sync"),
        ("remove", "sync"),
        ("connect", "async"),
        ("changes", "source"),
        ("reconnect", "sync"),
        ("enable", "sync"),
        ("disable", "sync"),
        ("ping", "duplex"),
    ]),
    declared("replicate", &[
        ("changes", "source"),
        ("upto", "source"),
        ("request", "sync"),
    ]),
    declared("friends", &[
        ("get", "async"),
        ("hops", "async"),
        ("isFollowing", "async"),
        ("isBlocking", "async"),
        ("createFriendStream", "source"),
        ("stream", "source"),
    ]),
    declared("blobs", &[
        ("get", "source"),
        ("getSlice", "source"),
        ("add", "sink"),
        ("rm", "async"),
        ("ls", "source"),
        ("has", "async"),
        ("size", "async"),
        ("meta", "async"),
        ("want", "async"),
        ("push", "async"),
        ("changes", "source"),
        ("createWants", "source"),
    ]),
    declared("invite", &[
        ("create", "async"),
        ("accept", "async"),
        ("use", "async"),
    ]),
    declared("local", &[]),
    declared("ooo", &[("stream", "duplex"), ("get", "async")]),
    declared("ebt", &[
        ("replicate", "duplex"),
        ("request", "sync"),
        ("peerStatus", "sync"),
    ]),
    declared("ws", &[("getAddress", "sync")]),
    declared(DISCOVERY_PLUGIN, &[]),
    declared("names", &[
        ("get", "async"),
        ("getImageFor", "async"),
        ("getSignifier", "async"),
        ("getSignified", "async"),
        ("dump", "async"),
    ]),
];

/// Names of every plugin the host can compose, in composition order.
pub fn builtin_plugins() -> Vec<&'static str> {
    BUILTINS.iter().map(|p| p.name).collect()
}

/// Build the plugin stack. `core` and the discovery plugin are always present.
pub fn compose(cfg: &PluginSection) -> Result<PluginRegistry> {
    if let Some(enabled) = &cfg.enabled {
        for name in enabled {
            if !BUILTINS.iter().any(|p| p.name == name.as_str()) {
                tracing::warn!(plugin = %name, "plugins.enabled refers to unknown plugin");
                if cfg.fail_fast {
                    return Err(HostError::BadRequest(format!("unknown plugin: {name}")));
                }
            }
        }
    }

    let mut registry = PluginRegistry::new();
    for p in &BUILTINS {
        let wanted = match &cfg.enabled {
            None => true,
            Some(list) => {
                p.name == CORE_PLUGIN
                    || p.name == DISCOVERY_PLUGIN
                    || list.iter().any(|n| n == p.name)
            }
        };
        if wanted {
            registry.register(Arc::new(declared(p.name, p.methods)))?;
        }
    }
    tracing::info!(plugins = ?registry.names(), "server plugins composed");
    Ok(registry)
}
