//! # Client configuration: `bloodlink.toml`
//!
//! Where the backend lives and how long the client waits before acting on
//! transient UI state. Every field has a default, so a missing or empty file
//! is equivalent to [`ClientConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://bloodlink-of0v.onrender.com"
//!
//! [session]
//! login_path = "/auth"
//! redirect_delay_ms = 1500
//!
//! [notices]
//! info_ms = 3000
//! success_ms = 4000
//! failure_ms = 5000
//! auth_ms = 7000
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`ApiConfig`] | Backend base URL. |
//! | [`SessionConfig`] | Login route and the delay before redirecting to it. |
//! | [`NoticeConfig`] | How long each kind of notification stays on screen. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://bloodlink-of0v.onrender.com";

/// Top-level configuration stored in `bloodlink.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Route of the login/registration view.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Delay before navigating after login or credential rejection.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_login_path() -> String {
    "/auth".to_string()
}

fn default_redirect_delay() -> u64 {
    1500
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

/// Auto-expiry windows for transient notifications, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_info")]
    pub info_ms: u64,
    #[serde(default = "default_success")]
    pub success_ms: u64,
    #[serde(default = "default_failure")]
    pub failure_ms: u64,
    /// Login and registration messages stay longer so server errors can be read.
    #[serde(default = "default_auth")]
    pub auth_ms: u64,
}

fn default_info() -> u64 {
    3000
}

fn default_success() -> u64 {
    4000
}

fn default_failure() -> u64 {
    5000
}

fn default_auth() -> u64 {
    7000
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            info_ms: default_info(),
            success_ms: default_success(),
            failure_ms: default_failure(),
            auth_ms: default_auth(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    /// Builder method to set the redirect delay.
    pub fn with_redirect_delay(mut self, millis: u64) -> Self {
        self.session.redirect_delay_ms = millis;
        self
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.session.redirect_delay_ms)
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "bloodlink.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
