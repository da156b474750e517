use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use sbot_host_core::error::{Result, HostError};

pub const MANIFEST_FILE: &str = "manifest.json";

/// A composed server plugin, described by its RPC surface.
pub trait Plugin: Send + Sync {
    /// Name under which the plugin's methods are published.
    fn name(&self) -> &'static str;

    /// Method name -> call type (`async`, `source`, `sink`, `sync`, `duplex`),
    /// or a nested object for method groups.
    fn manifest(&self) -> Map<String, Value>;
}

/// Ordered plugin stack.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.plugins.iter().map(|p| p.name())).finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let name = plugin.name();
        if self.contains(name) {
            return Err(HostError::BadRequest(format!("plugin registered twice: {name}")));
        }
        tracing::debug!(plugin = name, "plugin composed");
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// `{ plugin_name: { method: type, ... }, ... }` in composition order.
    pub fn manifest(&self) -> Value {
        let mut out = Map::new();
        for p in &self.plugins {
            out.insert(p.name().to_string(), Value::Object(p.manifest()));
        }
        Value::Object(out)
    }
}

/// Write the manifest as 2-space indented JSON. Returns the file path.
pub fn write_manifest(dir: &Path, manifest: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(MANIFEST_FILE);
    let body = serde_json::to_string_pretty(manifest)
        .map_err(|e| HostError::Internal(format!("manifest encode failed: {e}")))?;
    fs::write(&path, body)?;
    tracing::info!(path = %path.display(), "wrote rpc manifest");
    Ok(path)
}
