//! Session context trait for browser-session scoped auth state.
//!
//! The verification flow reads the pending username from here and writes
//! the issued credentials back. It is passed explicitly into the services
//! that need it instead of living in global storage.

use crate::domain::entities::credentials::Credentials;

/// Session-scoped storage that survives navigation within one session
pub trait SessionContext: Send + Sync {
    /// Username awaiting two-factor verification
    fn pending_username(&self) -> Option<String>;

    /// Record the username of a login that now awaits verification
    fn set_pending_username(&self, username: &str);

    /// Persist credentials issued after verification
    fn store_credentials(&self, credentials: &Credentials);

    /// Credentials of the authenticated user, if any
    fn credentials(&self) -> Option<Credentials>;

    /// Token for authenticated calls
    fn auth_token(&self) -> Option<String> {
        self.credentials().map(|c| c.token)
    }

    /// Forget everything (logout)
    fn clear(&self);
}
