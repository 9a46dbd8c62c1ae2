//! Application context: API client, session and timings shared by every view.
//!
//! The session is backed by the platform's key-value store:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorage`]
//! - **Desktop** (native): files under `<data_dir>/bloodlink/` via [`store::FileStore`]
//! - anything else: an in-memory [`store::MemoryStore`]

use api::{ApiClient, HttpTransport, Lifecycle, Session, Timing, ViewState};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::cell::SignalCell;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;

fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("bloodlink");
        store::FileStore::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Load `bloodlink.toml` from the user's config directory on native targets.
/// A missing or unreadable file yields the defaults.
pub fn load_config() -> ClientConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(path) = dirs::config_dir()
            .map(|dir| dir.join("bloodlink").join(ClientConfig::filename()))
        else {
            return ClientConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => ClientConfig::from_toml(&text).unwrap_or_else(|e| {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                ClientConfig::default()
            }),
            Err(_) => ClientConfig::default(),
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        ClientConfig::default()
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub client: ApiClient<HttpTransport>,
    pub session: Session<PlatformStore>,
    pub timing: Timing,
}

impl AppContext {
    pub fn from_config(config: &ClientConfig) -> Self {
        tracing::info!("using backend {}", config.api.base_url);
        Self {
            client: ApiClient::http(config.api.base_url.clone()),
            session: Session::new(platform_store()),
            timing: Timing::from_config(config),
        }
    }

    /// Lifecycle for one view, writing into `state`.
    pub fn lifecycle<M: Clone + 'static>(
        &self,
        state: Signal<ViewState<M>>,
    ) -> Lifecycle<PlatformStore, SignalCell<M>> {
        Lifecycle::new(self.session.clone(), SignalCell(state), self.timing.clone())
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Wrap the router with this to make [`use_app`] available.
#[component]
pub fn AppProvider(config: ClientConfig, children: Element) -> Element {
    use_context_provider(|| AppContext::from_config(&config));

    rsx! {
        {children}
    }
}
