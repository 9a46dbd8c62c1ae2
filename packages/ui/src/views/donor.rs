use api::dashboard::{DonorDashboard, DonorModel};
use api::ViewState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBell, FaCheck, FaXmark};
use dioxus_free_icons::Icon;
use store::Role;

use super::{phase_placeholder, DashboardHeader, VIEW_CSS};
use crate::context::use_app;
use crate::notice::{use_view_effects, NoticeBanner};

#[component]
pub fn Donor() -> Element {
    let app = use_app();
    let state = use_signal(|| ViewState::new(DonorModel::default()));
    let dashboard = use_hook(|| DonorDashboard::new(app.client.clone(), app.lifecycle(state)));
    use_view_effects(state);

    use_future({
        let dashboard = dashboard.clone();
        move || {
            let dashboard = dashboard.clone();
            async move {
                dashboard.load().await;
            }
        }
    });

    let current = state();
    let body = phase_placeholder(&current.phase);
    let model = &current.model;
    let busy = !current.accepts_actions();
    let available = model.is_available();
    let name = model
        .profile
        .as_ref()
        .map(|p| p.display_name().to_string())
        .unwrap_or_default();
    let group = model
        .profile
        .as_ref()
        .and_then(|p| p.blood_group)
        .map(|g| g.to_string())
        .unwrap_or_else(|| "?".to_string());

    let toggle = {
        let dashboard = dashboard.clone();
        move |_| {
            let dashboard = dashboard.clone();
            spawn(async move {
                let _ = dashboard.toggle_availability().await;
            });
        }
    };

    rsx! {
        style { {VIEW_CSS} }
        div { class: "page",
            DashboardHeader { title: "Donor dashboard", role: Role::Donor }
            NoticeBanner { notice: current.notice.clone() }

            if let Some(placeholder) = body {
                {placeholder}
            } else {
                div { class: "card",
                    style: "display: flex; align-items: center; justify-content: space-between;",
                    div {
                        h2 { style: "font-weight: 600;", "Welcome, {name}" }
                        p { style: "color: #6b7280;", "Blood group {group}" }
                    }
                    button {
                        class: if available { "btn" } else { "btn btn--ghost" },
                        disabled: busy,
                        onclick: toggle,
                        if available { "Available" } else { "Unavailable" }
                    }
                }

                div { class: "card",
                    h2 {
                        style: "display: flex; gap: 0.5rem; align-items: center; font-weight: 600; margin-bottom: 0.75rem;",
                        Icon { icon: FaBell, width: 16, height: 16 }
                        "Active alerts"
                    }
                    if !available {
                        p { style: "color: #6b7280;", "Switch to available to receive alerts." }
                    } else if model.visible_alerts().is_empty() {
                        p { style: "color: #6b7280;", "No alerts for your blood group right now." }
                    }
                    for alert in model.visible_alerts().iter().cloned() {
                        div {
                            key: "{alert.id.unwrap_or_default()}",
                            style: "display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 0; border-top: 1px solid #f3f4f6;",
                            div {
                                strong { "{alert.blood_group} needed" }
                                if let Some(hospital) = alert.hospital.clone() {
                                    span { style: "margin-left: 0.5rem; color: #6b7280;", "at {hospital}" }
                                }
                                if let Some(distance) = alert.distance.clone() {
                                    span { style: "margin-left: 0.5rem; color: #6b7280;", "({distance})" }
                                }
                                if let Some(urgency) = alert.urgency {
                                    span { class: "badge", style: "margin-left: 0.5rem;", "{urgency.badge()}" }
                                }
                            }
                            if let Some(alert_id) = alert.id {
                                div { style: "display: flex; gap: 0.5rem;",
                                    button {
                                        class: "btn",
                                        disabled: busy,
                                        onclick: {
                                            let dashboard = dashboard.clone();
                                            move |_| {
                                                let dashboard = dashboard.clone();
                                                spawn(async move {
                                                    let _ = dashboard.accept(alert_id).await;
                                                });
                                            }
                                        },
                                        Icon { icon: FaCheck, width: 12, height: 12 }
                                        " Accept"
                                    }
                                    button {
                                        class: "btn btn--ghost",
                                        disabled: busy,
                                        onclick: {
                                            let dashboard = dashboard.clone();
                                            move |_| {
                                                let dashboard = dashboard.clone();
                                                spawn(async move {
                                                    let _ = dashboard.reject(alert_id).await;
                                                });
                                            }
                                        },
                                        Icon { icon: FaXmark, width: 12, height: 12 }
                                        " Reject"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
