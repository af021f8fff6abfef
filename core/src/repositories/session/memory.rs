//! In-memory session context

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::credentials::Credentials;

use super::trait_::SessionContext;

#[derive(Debug, Default)]
struct SessionData {
    pending_username: Option<String>,
    credentials: Option<Credentials>,
}

/// Session context held in process memory; lives as long as the client session
#[derive(Debug, Default)]
pub struct InMemorySessionContext {
    data: RwLock<SessionData>,
}

impl InMemorySessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with a login already awaiting verification
    pub fn with_pending_username(username: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(SessionData {
                pending_username: Some(username.into()),
                credentials: None,
            }),
        }
    }

    // A panic while holding the lock cannot leave the data half-written
    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionContext for InMemorySessionContext {
    fn pending_username(&self) -> Option<String> {
        self.read().pending_username.clone()
    }

    fn set_pending_username(&self, username: &str) {
        self.write().pending_username = Some(username.to_string());
    }

    fn store_credentials(&self, credentials: &Credentials) {
        self.write().credentials = Some(credentials.clone());
    }

    fn credentials(&self) -> Option<Credentials> {
        self.read().credentials.clone()
    }

    fn clear(&self) {
        *self.write() = SessionData::default();
    }
}
