//! Route-level views, one per page of the application.

use api::Phase;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaUser;
use dioxus_free_icons::Icon;
use store::Role;

mod bank;
mod doctor;
mod donor;
mod home;
mod login;
mod profile;

pub use bank::BloodBank;
pub use doctor::Doctor;
pub use donor::Donor;
pub use home::Home;
pub use login::Login;
pub use profile::{BloodBankProfile, DoctorProfile, DonorProfile};

pub(crate) const VIEW_CSS: &str = r#"
.page {
    max-width: 960px;
    margin: 0 auto;
    padding: 2rem 1.5rem;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    color: #1f2937;
}
.card {
    background: #ffffff;
    border: 1px solid #e5e7eb;
    border-radius: 8px;
    padding: 1.25rem;
    margin-bottom: 1rem;
}
.btn {
    padding: 0.5rem 1rem;
    border: none;
    border-radius: 4px;
    font-weight: 500;
    cursor: pointer;
    background: #b91c1c;
    color: white;
}
.btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}
.btn--ghost {
    background: transparent;
    color: #374151;
    border: 1px solid #d1d5db;
}
.field {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    margin-bottom: 0.75rem;
}
.field input, .field select {
    padding: 0.5rem;
    border: 1px solid #d1d5db;
    border-radius: 4px;
}
.badge {
    display: inline-block;
    padding: 0.125rem 0.5rem;
    border-radius: 999px;
    font-size: 0.75rem;
    font-weight: 700;
    background: #fee2e2;
    color: #991b1b;
}
"#;

/// Placeholder for every phase in which the dashboard body can't be shown.
pub(crate) fn phase_placeholder(phase: &Phase) -> Option<Element> {
    let text = match phase {
        Phase::Loading => "Loading...".to_string(),
        Phase::Unauthenticated => "Redirecting to login...".to_string(),
        Phase::Failed(message) => message.clone(),
        Phase::Ready | Phase::Mutating => return None,
    };
    Some(rsx! {
        div {
            class: "card",
            style: "text-align: center; color: #6b7280;",
            "{text}"
        }
    })
}

#[component]
pub(crate) fn DashboardHeader(title: String, role: Role) -> Element {
    rsx! {
        header {
            style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 1.5rem;",
            h1 { style: "font-size: 1.5rem; font-weight: 700;", "{title}" }
            Link {
                to: role.profile_path(),
                class: "btn btn--ghost",
                style: "display: inline-flex; gap: 0.5rem; align-items: center; text-decoration: none;",
                Icon { icon: FaUser, width: 14, height: 14 }
                "Profile"
            }
        }
    }
}
