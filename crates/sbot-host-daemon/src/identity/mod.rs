//! Host identity (`<data_path>/secret`).
//!
//! The secret file holds one JSON object `{curve, public, private, id}`,
//! surrounded by `#` comment lines that warn the user not to share it. Keys
//! are only loaded or minted here; signing and feed validation belong to the
//! server plugins.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};

use sbot_host_core::error::{Result, HostError};

pub const CURVE_ED25519: &str = "ed25519";
const CURVE_K256: &str = "k256";

const SECRET_HEADER: &str = "\
# this is your SECRET name.
# this name gives you magical powers.
# with it you can mark your messages so that your friends can verify
# that they really did come from you.
#
# if any one learns this name, they can use it to destroy your identity
# NEVER show this to anyone!!!
";

const SECRET_FOOTER: &str = "\
# WARNING! It's vital that you DO NOT edit OR share your secret name
# instead, share your public name
# your public name: ";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keys {
    pub curve: String,
    pub public: String,
    pub private: String,
    pub id: String,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("curve", &self.curve)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Keys {
    /// Mint a fresh ed25519 identity.
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut rand::rngs::OsRng);
        let public = format!("{}.{CURVE_ED25519}", STANDARD.encode(signing.verifying_key().as_bytes()));
        let private = format!("{}.{CURVE_ED25519}", STANDARD.encode(signing.to_keypair_bytes()));
        Self {
            curve: CURVE_ED25519.to_string(),
            id: format!("@{public}"),
            public,
            private,
        }
    }

    fn check(&self, path: &Path) -> Result<()> {
        if self.curve == CURVE_K256 {
            return Err(HostError::Identity(format!(
                "k256 curves are no longer supported, please delete {}",
                path.display()
            )));
        }
        if self.curve != CURVE_ED25519 {
            return Err(HostError::Identity(format!("unsupported curve: {}", self.curve)));
        }
        if self.id != format!("@{}", self.public) {
            return Err(HostError::Identity("id does not match public key".into()));
        }
        Ok(())
    }
}

pub fn load(path: &Path) -> Result<Keys> {
    let raw = fs::read_to_string(path)?;
    let json: String = raw
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    let keys: Keys = serde_json::from_str(&json)
        .map_err(|e| HostError::Identity(format!("malformed secret {}: {e}", path.display())))?;
    keys.check(path)?;
    Ok(keys)
}

/// Write a new identity. Refuses to overwrite an existing file.
pub fn create(path: &Path) -> Result<Keys> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let keys = Keys::generate();
    let body = serde_json::to_string_pretty(&keys)
        .map_err(|e| HostError::Internal(format!("secret encode failed: {e}")))?;

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o400);
    }
    let mut file = opts.open(path)?;
    write!(file, "{SECRET_HEADER}\n{body}\n\n{SECRET_FOOTER}{}\n", keys.id)?;
    file.sync_all()?;

    tracing::info!(id = %keys.id, path = %path.display(), "created new identity");
    Ok(keys)
}

pub fn load_or_create(path: &Path) -> Result<Keys> {
    if path.exists() {
        let keys = load(path)?;
        tracing::info!(id = %keys.id, "loaded identity");
        Ok(keys)
    } else {
        create(path)
    }
}
