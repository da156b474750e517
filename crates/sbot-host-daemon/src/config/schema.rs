use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use sbot_host_core::error::{Result, HostError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    pub version: u32,

    #[serde(default)]
    pub host: HostSection,

    #[serde(default)]
    pub discovery: DiscoverySection,

    #[serde(default)]
    pub notifications: NotificationSection,

    #[serde(default)]
    pub shutdown: ShutdownSection,

    #[serde(default)]
    pub plugins: PluginSection,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version: 1,
            host: HostSection::default(),
            discovery: DiscoverySection::default(),
            notifications: NotificationSection::default(),
            shutdown: ShutdownSection::default(),
            plugins: PluginSection::default(),
        }
    }
}

impl HostConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HostError::UnsupportedVersion);
        }

        self.host.validate()?;
        self.discovery.validate()?;
        self.notifications.validate()?;
        self.shutdown.validate()?;

        Ok(())
    }

    /// Directory holding `secret` and `manifest.json`.
    /// Falls back to `$HOME/.<appname>` when `host.path` is unset.
    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.host.path {
            return Ok(p.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| HostError::Config("cannot resolve home directory; set host.path".into()))?;
        Ok(home.join(format!(".{}", self.host.appname)))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSection {
    #[serde(default = "default_appname")]
    pub appname: String,

    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            appname: default_appname(),
            path: None,
        }
    }
}

impl HostSection {
    pub fn validate(&self) -> Result<()> {
        if self.appname.trim().is_empty() {
            return Err(HostError::BadRequest("host.appname must not be empty".into()));
        }
        Ok(())
    }
}

fn default_appname() -> String {
    "ssb".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_frame_bytes: default_max_frame_bytes(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl DiscoverySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(64..=65536).contains(&self.max_frame_bytes) {
            return Err(HostError::BadRequest(
                "discovery.max_frame_bytes must be between 64 and 65536".into(),
            ));
        }
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(HostError::BadRequest(
                "discovery.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(HostError::BadRequest(
                "discovery.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(HostError::BadRequest(
                "discovery.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            HostError::BadRequest(format!(
                "discovery.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "127.0.0.1:8989".into()
}
fn default_max_frame_bytes() -> usize {
    4096
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyBackend {
    #[default]
    Log,
    Command,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSection {
    #[serde(default)]
    pub backend: NotifyBackend,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub icon: Option<PathBuf>,

    #[serde(default = "default_command")]
    pub command: String,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            backend: NotifyBackend::default(),
            title: default_title(),
            icon: None,
            command: default_command(),
        }
    }
}

impl NotificationSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == NotifyBackend::Command && self.command.trim().is_empty() {
            return Err(HostError::BadRequest(
                "notifications.command must not be empty when backend is command".into(),
            ));
        }
        Ok(())
    }
}

fn default_title() -> String {
    "Secure Scuttlebutt".into()
}
fn default_command() -> String {
    "notify-send".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownSection {
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
}

impl Default for ShutdownSection {
    fn default() -> Self {
        Self { grace_ms: default_grace_ms() }
    }
}

impl ShutdownSection {
    pub fn validate(&self) -> Result<()> {
        if self.grace_ms > 60000 {
            return Err(HostError::BadRequest(
                "shutdown.grace_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_grace_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginSection {
    /// `None` composes every built-in plugin.
    #[serde(default)]
    pub enabled: Option<Vec<String>>,

    #[serde(default)]
    pub fail_fast: bool,
}
