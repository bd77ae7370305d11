//! Authorization header strategy.
//!
//! The form carries an auth-type next to the token but only bearer tokens
//! are implemented; every auth-type currently resolves to `Bearer`.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
}

impl AuthScheme {
    pub fn for_auth_type(auth_type: &str) -> Self {
        let normalized = auth_type.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "bearer" | "jwt" | "token" => {}
            other => debug!(auth_type = other, "no scheme for auth type, using bearer"),
        }
        AuthScheme::Bearer
    }

    /// Header to attach for `token`, if any. An empty token sends nothing.
    pub fn authorization(&self, token: &str) -> Option<(String, String)> {
        if token.is_empty() {
            return None;
        }
        match self {
            AuthScheme::Bearer => Some(("Authorization".to_string(), format!("Bearer {token}"))),
        }
    }
}
