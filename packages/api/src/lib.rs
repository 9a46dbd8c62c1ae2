//! # API crate: typed client and view lifecycle for BloodLink
//!
//! Everything the frontends need to talk to the BloodLink backend and to drive
//! the role dashboards, without any rendering. The UI crate binds these types
//! to Dioxus components; tests drive them with a scripted transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: blood groups, urgency, requests, alerts, donor profile, stats, auth payloads |
//! | [`transport`] | [`Transport`] seam and the reqwest-backed [`HttpTransport`] |
//! | [`session`] | [`Session`], the explicit credential context passed to every authenticated call |
//! | [`client`] | [`ApiClient`], one method per endpoint, with uniform 401/403 handling |
//! | [`error`] | [`ApiError`] taxonomy and server message extraction |
//! | [`lifecycle`] | [`Lifecycle`]: load / ready / mutate phases, notices, redirects, optimistic and pessimistic reconciliation |
//! | [`dashboard`] | Donor, doctor, blood-bank, login and profile views built on [`Lifecycle`] |
//!
//! ## Credential flow
//!
//! Login returns a [`store::Credential`]; the login view establishes it in the
//! [`Session`]. Every authenticated call reads it back from the session's
//! store, so a 401/403 seen by any call (which clears the store) is observed
//! by every view on its next call.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod session;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use error::ApiError;
pub use lifecycle::{
    Lifecycle, MutationError, Notice, NoticeLevel, Phase, Reconcile, Redirect, Timing, ViewCell,
    ViewState,
};
pub use session::Session;
pub use transport::{HttpTransport, Transport};
