//! This crate contains all shared UI for the workspace.
//!
//! Views hold their [`api::ViewState`] in a Dioxus signal and hand it to the
//! matching `api::dashboard` type through [`SignalCell`]; the dashboard does
//! the talking to the backend, the view only renders and forwards events.

mod cell;
pub use cell::SignalCell;

mod context;
pub use context::{load_config, use_app, AppContext, AppProvider, PlatformStore};

mod notice;
pub use notice::{use_view_effects, NoticeBanner};

mod timer;

pub mod views;
