//! # Client-local key-value storage
//!
//! [`KeyValueStore`] is the async seam over whatever the platform offers for
//! persisted strings: `localStorage` in the browser, a directory of small
//! files on desktop, a map in tests. [`SessionStorage`] sits on top and owns
//! the credential layout.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `accessToken` | bearer access token |
//! | `refreshToken` | refresh token |
//! | `userRole` | role wire tag (`donor`, `doctor`, `bloodbank`) |
//!
//! A credential counts as present only when a non-empty access token is
//! stored. A missing refresh token or role does not invalidate it.

use std::future::Future;

use crate::models::{Credential, Role};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "userRole";

/// Async trait for persisted string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = ()>;
    fn remove(&self, key: &str) -> impl Future<Output = ()>;
}

/// Credential persistence over a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct SessionStorage<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored credential, if any.
    pub async fn load(&self) -> Option<Credential> {
        let access = self.store.get(ACCESS_TOKEN_KEY).await?;
        if access.trim().is_empty() {
            return None;
        }
        let refresh = self.store.get(REFRESH_TOKEN_KEY).await.unwrap_or_default();
        let role = self
            .store
            .get(ROLE_KEY)
            .await
            .and_then(|tag| Role::from_label(&tag));
        Some(Credential {
            access,
            refresh,
            role,
        })
    }

    /// Persist a credential, replacing whatever was stored.
    pub async fn save(&self, credential: &Credential) {
        self.store.set(ACCESS_TOKEN_KEY, &credential.access).await;
        self.store.set(REFRESH_TOKEN_KEY, &credential.refresh).await;
        match credential.role {
            Some(role) => self.store.set(ROLE_KEY, role.as_tag()).await,
            None => self.store.remove(ROLE_KEY).await,
        }
    }

    /// Remove every session key.
    pub async fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY).await;
        self.store.remove(REFRESH_TOKEN_KEY).await;
        self.store.remove(ROLE_KEY).await;
    }
}
