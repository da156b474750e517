//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use crate::config::HostConfig;

#[derive(Debug, Parser)]
#[command(name = "sbot-host", about = "Scuttlebutt server host with discovery access gate")]
pub struct Cli {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = "sbot-host.yaml")]
    pub config: PathBuf,

    /// Data directory (secret, manifest.json). Overrides host.path.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Application name. Overrides the ssb_appname env var and host.appname.
    #[arg(long)]
    pub appname: Option<String>,
}

impl Cli {
    pub fn apply(&self, cfg: &mut HostConfig) {
        if let Some(p) = &self.path {
            cfg.host.path = Some(p.clone());
        }
        if let Some(name) = &self.appname {
            cfg.host.appname = name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["sbot-host", "--path", "/tmp/ssb-x", "--appname", "testnet"]);
        let mut cfg = HostConfig::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.host.path.as_deref(), Some(std::path::Path::new("/tmp/ssb-x")));
        assert_eq!(cfg.host.appname, "testnet");
        assert_eq!(cli.config, PathBuf::from("sbot-host.yaml"));
    }
}
