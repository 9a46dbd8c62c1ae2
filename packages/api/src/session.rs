//! Explicit session context.
//!
//! Every network-calling function takes a [`Session`] instead of reaching
//! into ambient storage. Logging in establishes it, logging out or a 401/403
//! from the server invalidates it.

use store::{Credential, KeyValueStore, SessionStorage};

#[derive(Clone, Debug)]
pub struct Session<S> {
    storage: SessionStorage<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: SessionStorage::new(store),
        }
    }

    /// Current credential, read through to storage on every call.
    pub async fn credential(&self) -> Option<Credential> {
        self.storage.load().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.credential().await.is_some()
    }

    /// Persist a freshly issued credential.
    pub async fn establish(&self, credential: &Credential) {
        self.storage.save(credential).await;
    }

    /// Forget the credential. Safe to call when none is stored.
    pub async fn invalidate(&self) {
        tracing::info!("session invalidated");
        self.storage.clear().await;
    }

    pub fn store(&self) -> &S {
        self.storage.store()
    }
}
