//! The session token handed to the widget.

use std::fmt;

/// Opaque, short-lived bridge token issued by the token service.
///
/// Never empty: an empty `bridge_token` is treated as no token at all.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BridgeToken(String);

impl BridgeToken {
    /// Wrap a token string. Returns `None` for an empty string.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens end up in logs through Debug; keep them short there.
impl fmt::Debug for BridgeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "BridgeToken({}…)", prefix)
    }
}

impl fmt::Display for BridgeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
