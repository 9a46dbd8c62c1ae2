use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaDroplet;
use dioxus_free_icons::Icon;

use super::VIEW_CSS;
use crate::context::use_app;

/// Landing page. Signed-in users get a shortcut to their dashboard.
#[component]
pub fn Home() -> Element {
    let app = use_app();
    let role = use_resource(move || {
        let session = app.session.clone();
        async move { session.credential().await.and_then(|c| c.role) }
    });

    rsx! {
        style { {VIEW_CSS} }
        div {
            class: "page",
            style: "text-align: center; padding-top: 6rem;",
            div {
                style: "color: #b91c1c; margin-bottom: 1rem;",
                Icon { icon: FaDroplet, width: 48, height: 48 }
            }
            h1 { style: "font-size: 2.25rem; font-weight: 800;", "BloodLink" }
            p {
                style: "color: #6b7280; margin: 1rem 0 2rem;",
                "Connecting doctors, blood banks and donors when every minute counts."
            }
            match role() {
                Some(Some(role)) => rsx! {
                    Link { to: role.home_path(), class: "btn", "Open the {role.label()} dashboard" }
                },
                _ => rsx! {
                    Link { to: "/auth", class: "btn", "Sign in or register" }
                },
            }
        }
    }
}
