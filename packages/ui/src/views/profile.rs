use api::dashboard::{ProfileModel, ProfileView};
use api::ViewState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaRightFromBracket;
use dioxus_free_icons::Icon;
use store::Role;

use super::{phase_placeholder, VIEW_CSS};
use crate::context::use_app;
use crate::notice::use_view_effects;

/// Role summary with a way back to the dashboard and a logout button.
#[component]
fn ProfilePage(role: Role) -> Element {
    let app = use_app();
    let state = use_signal(|| ViewState::new(ProfileModel::default()));
    let view = use_hook(|| ProfileView::new(app.lifecycle(state)));
    use_view_effects(state);

    use_future({
        let view = view.clone();
        move || {
            let view = view.clone();
            async move {
                view.load().await;
            }
        }
    });

    let current = state();
    let stored = current.model.role.unwrap_or(role);
    let logout = {
        let view = view.clone();
        move |_| {
            let view = view.clone();
            spawn(async move {
                view.logout().await;
            });
        }
    };

    rsx! {
        style { {VIEW_CSS} }
        div { class: "page", style: "max-width: 520px;",
            h1 { style: "font-size: 1.5rem; font-weight: 700; margin-bottom: 1rem;", "{stored.label()} profile" }
            if let Some(placeholder) = phase_placeholder(&current.phase) {
                {placeholder}
            } else {
                div { class: "card",
                    p { "Signed in as a {stored.label().to_lowercase()}." }
                    div { style: "display: flex; gap: 0.75rem; margin-top: 1rem;",
                        Link { to: stored.home_path(), class: "btn btn--ghost", "Back to dashboard" }
                        button { class: "btn", onclick: logout,
                            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                            " Log out"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DonorProfile() -> Element {
    rsx! { ProfilePage { role: Role::Donor } }
}

#[component]
pub fn DoctorProfile() -> Element {
    rsx! { ProfilePage { role: Role::Doctor } }
}

#[component]
pub fn BloodBankProfile() -> Element {
    rsx! { ProfilePage { role: Role::BloodBank } }
}
