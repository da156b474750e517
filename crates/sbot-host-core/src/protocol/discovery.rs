//! Discovery frames (JSON text).
//!
//! A requester sends `{"type":"discovery-request","origin":"..."}` and gets
//! exactly one `discovery-response` back, keyed by the same origin.

use serde::{Deserialize, Serialize};

use crate::error::{Result, HostError};

/// Inbound access request. The origin is opaque and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub origin: String,
}

impl AccessRequest {
    pub fn new(origin: impl Into<String>) -> Self {
        Self { origin: origin.into() }
    }
}

/// Allow/deny outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub origin: String,
    pub granted: bool,
}

/// Every frame that travels over the discovery transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DiscoveryFrame {
    DiscoveryRequest { origin: String },
    DiscoveryResponse { origin: String, granted: bool },
    Error { code: String, msg: String },
}

impl DiscoveryFrame {
    pub fn response(decision: &AccessDecision) -> Self {
        DiscoveryFrame::DiscoveryResponse {
            origin: decision.origin.clone(),
            granted: decision.granted,
        }
    }

    pub fn error(err: &HostError) -> Self {
        DiscoveryFrame::Error {
            code: err.client_code().as_str().to_string(),
            msg: err.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| HostError::Internal(format!("discovery frame encode failed: {e}")))
    }
}

/// Decode a text frame that must carry a discovery request.
pub fn decode_request(s: &str) -> Result<AccessRequest> {
    let frame: DiscoveryFrame = serde_json::from_str(s)
        .map_err(|e| HostError::BadRequest(format!("invalid discovery frame: {e}")))?;
    match frame {
        DiscoveryFrame::DiscoveryRequest { origin } => Ok(AccessRequest { origin }),
        _ => Err(HostError::BadRequest("expected discovery-request".into())),
    }
}
