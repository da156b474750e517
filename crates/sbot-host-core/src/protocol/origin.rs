//! Origin classification for operator-facing messages.

/// URI scheme prefix used by Firefox WebExtensions.
pub const EXTENSION_SCHEME: &str = "moz-extension://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    FirefoxAddon,
    WebApplication,
}

impl OriginKind {
    /// Anything that does not start exactly with the extension scheme is a
    /// web application, including the empty string.
    pub fn classify(origin: &str) -> Self {
        if origin.starts_with(EXTENSION_SCHEME) {
            OriginKind::FirefoxAddon
        } else {
            OriginKind::WebApplication
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OriginKind::FirefoxAddon => "Firefox Add-on",
            OriginKind::WebApplication => "Web Application",
        }
    }
}

/// Past-tense verb shown to the operator.
pub fn action_word(granted: bool) -> &'static str {
    if granted { "granted" } else { "denied" }
}

/// Operator notification text for one decision.
pub fn describe_decision(origin: &str, granted: bool) -> String {
    format!(
        "{} {} {} access to sbot.",
        OriginKind::classify(origin).label(),
        origin,
        action_word(granted)
    )
}
