//! Host config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use sbot_host_core::error::{Result, HostError};

pub use schema::{
    DiscoverySection, HostConfig, HostSection, NotificationSection, NotifyBackend, PluginSection,
    ShutdownSection,
};

/// Env var that overrides `host.appname`.
pub const APPNAME_ENV: &str = "ssb_appname";

pub fn load_from_file(path: &Path) -> Result<HostConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HostError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HostConfig> {
    let cfg: HostConfig = serde_yaml::from_str(s)
        .map_err(|e| HostError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config file if present, else start from defaults.
pub fn load_or_default(path: &Path) -> Result<HostConfig> {
    if path.exists() {
        load_from_file(path)
    } else {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        Ok(HostConfig::default())
    }
}

/// Apply the appname env var. Call before CLI overrides so flags win.
pub fn apply_env(cfg: &mut HostConfig, appname: Option<String>) -> Result<()> {
    if let Some(name) = appname.filter(|n| !n.trim().is_empty()) {
        cfg.host.appname = name;
    }
    cfg.validate()
}
