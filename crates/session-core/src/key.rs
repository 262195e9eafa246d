//! Session key derivation

/// Namespace prepended to every session identifier
pub const SESSION_KEY_PREFIX: &str = "nablarch.session.";

/// Build the backing-store key for a session.
///
/// Shared by the session store and the expiration policy so both address
/// the same key.
#[must_use]
pub fn session_key(session_id: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{session_id}")
}
