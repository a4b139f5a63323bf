//! Atomic credential rotation.

use crate::credentials::{ApiCredentials, Credentials};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Holds the current credential snapshot.
///
/// Callers take an `Arc` snapshot once per operation and sign everything in
/// that operation with it. Rotation swaps the snapshot; in-flight operations
/// keep the one they read.
#[derive(Clone)]
pub struct CredentialStore {
    current: Arc<RwLock<Arc<Credentials>>>,
}

impl CredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(credentials))),
        }
    }

    /// Current snapshot.
    pub async fn snapshot(&self) -> Arc<Credentials> {
        self.current.read().await.clone()
    }

    /// Replace the whole snapshot, returning the previous one.
    pub async fn rotate(&self, credentials: Credentials) -> Arc<Credentials> {
        let next = Arc::new(credentials);
        let mut current = self.current.write().await;
        let previous = std::mem::replace(&mut *current, next);
        info!(address = %previous.address(), "Credentials rotated");
        previous
    }

    /// Install new L2 credentials on top of the current snapshot.
    pub async fn install_api_credentials(&self, api: ApiCredentials) -> Arc<Credentials> {
        let mut current = self.current.write().await;
        let next = Arc::new((**current).clone().with_api_credentials(api));
        *current = next.clone();
        info!(address = %next.address(), "API credentials installed");
        next
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
