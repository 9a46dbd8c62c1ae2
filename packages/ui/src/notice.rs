//! Transient notices and scheduled redirects.

use api::{Notice, NoticeLevel, ViewState};
use dioxus::prelude::*;

use crate::timer::sleep;

/// Expire notices and perform redirects for one view's state.
///
/// Each notice is cleared by sequence number, so a newer notice with the same
/// text outlives the timer of the older one.
pub fn use_view_effects<M: Clone + 'static>(state: Signal<ViewState<M>>) {
    let nav = use_navigator();
    let notice = use_memo(move || state.read().notice.clone());
    let redirect = use_memo(move || state.read().redirect.clone());

    use_effect(move || {
        let Some(notice) = notice() else {
            return;
        };
        spawn(async move {
            sleep(notice.expires_after).await;
            let mut state = state;
            state.write().expire_notice(notice.seq);
        });
    });

    use_effect(move || {
        let Some(redirect) = redirect() else {
            return;
        };
        spawn(async move {
            sleep(redirect.after).await;
            tracing::debug!("redirecting to {}", redirect.to);
            nav.replace(redirect.to);
        });
    });
}

#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };
    let (class, background, color) = match notice.level {
        NoticeLevel::Info => ("notice notice--info", "#eff6ff", "#1d4ed8"),
        NoticeLevel::Success => ("notice notice--success", "#f0fdf4", "#15803d"),
        NoticeLevel::Error => ("notice notice--error", "#fef2f2", "#b91c1c"),
    };

    rsx! {
        div {
            class: "{class}",
            role: "status",
            style: "padding: 0.75rem 1rem; margin-bottom: 1rem; border-radius: 6px; background: {background}; color: {color}; font-weight: 500;",
            "{notice.message}"
        }
    }
}
