use api::dashboard::{BankDashboard, BankModel};
use api::models::BloodGroup;
use api::ViewState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBell, FaHospital, FaUsers};
use dioxus_free_icons::Icon;
use store::Role;

use super::{phase_placeholder, DashboardHeader, VIEW_CSS};
use crate::context::use_app;
use crate::notice::{use_view_effects, NoticeBanner};

#[component]
fn Counter(label: String, value: String) -> Element {
    rsx! {
        div { class: "card", style: "flex: 1; text-align: center;",
            div { style: "font-size: 1.75rem; font-weight: 800;", "{value}" }
            div { style: "color: #6b7280;", "{label}" }
        }
    }
}

#[component]
pub fn BloodBank() -> Element {
    let app = use_app();
    let state = use_signal(|| ViewState::new(BankModel::default()));
    let dashboard = use_hook(|| BankDashboard::new(app.client.clone(), app.lifecycle(state)));
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
    let alert_form = model.alert_form.clone();
    let busy = !current.accepts_actions();

    let on_create = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let dashboard = dashboard.clone();
            spawn(async move {
                let _ = dashboard.create_alert().await;
            });
        }
    };
    let set_group = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            if let Ok(group) = evt.value().parse::<BloodGroup>() {
                dashboard.edit_alert_form(|form| form.blood_group = group);
            }
        }
    };
    let set_radius = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            dashboard.edit_alert_form(|form| form.radius = evt.value().parse().unwrap_or(0))
        }
    };
    let set_duration = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            dashboard.edit_alert_form(|form| form.duration = evt.value().parse().unwrap_or(0))
        }
    };

    rsx! {
        style { {VIEW_CSS} }
        div { class: "page",
            DashboardHeader { title: "Blood bank dashboard", role: Role::BloodBank }
            NoticeBanner { notice: current.notice.clone() }

            if let Some(placeholder) = body {
                {placeholder}
            } else {
                div { style: "display: flex; gap: 1rem;",
                    Counter { label: "Pending requests", value: model.pending_requests().to_string() }
                    Counter { label: "Active alerts", value: model.active_alerts().to_string() }
                    Counter { label: "Available donors", value: model.available_donors().to_string() }
                }

                div { class: "card",
                    h2 {
                        style: "display: flex; gap: 0.5rem; align-items: center; font-weight: 600; margin-bottom: 0.75rem;",
                        Icon { icon: FaHospital, width: 16, height: 16 }
                        "Incoming requests"
                    }
                    if model.requests.is_empty() {
                        p { style: "color: #6b7280;", "No pending requests." }
                    }
                    for request in model.requests.iter().cloned() {
                        div {
                            key: "{request.id}",
                            style: "display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 0; border-top: 1px solid #f3f4f6;",
                            div {
                                strong { "#{request.id} {request.blood_group} × {request.quantity}" }
                                span { style: "margin-left: 0.5rem; color: #6b7280;", "{request.hospital}" }
                                if let Some(doctor) = request.doctor.clone() {
                                    span { style: "margin-left: 0.5rem; color: #6b7280;", "Dr. {doctor}" }
                                }
                                if let Some(urgency) = request.urgency {
                                    span { class: "badge", style: "margin-left: 0.5rem;", "{urgency.badge()}" }
                                }
                            }
                            button {
                                class: "btn",
                                disabled: busy,
                                onclick: {
                                    let dashboard = dashboard.clone();
                                    let request_id = request.id;
                                    move |_| {
                                        let dashboard = dashboard.clone();
                                        spawn(async move {
                                            let _ = dashboard.process_request(request_id).await;
                                        });
                                    }
                                },
                                "Mark processed"
                            }
                        }
                    }
                }

                form { class: "card", onsubmit: on_create,
                    h2 {
                        style: "display: flex; gap: 0.5rem; align-items: center; font-weight: 600; margin-bottom: 0.75rem;",
                        Icon { icon: FaBell, width: 16, height: 16 }
                        "Broadcast an alert"
                    }
                    div { style: "display: flex; gap: 1rem;",
                        label { class: "field", style: "flex: 1;",
                            "Blood group"
                            select { onchange: set_group,
                                for group in BloodGroup::ALL {
                                    option {
                                        value: group.label(),
                                        selected: alert_form.blood_group == group,
                                        "{group}"
                                    }
                                }
                            }
                        }
                        label { class: "field", style: "flex: 1;",
                            "Radius (km)"
                            input {
                                r#type: "number",
                                min: "1",
                                value: "{alert_form.radius}",
                                oninput: set_radius,
                            }
                        }
                        label { class: "field", style: "flex: 1;",
                            "Duration (hours)"
                            input {
                                r#type: "number",
                                min: "1",
                                value: "{alert_form.duration}",
                                oninput: set_duration,
                            }
                        }
                    }
                    button { class: "btn", r#type: "submit", disabled: busy, "Broadcast" }
                }

                div { class: "card",
                    h2 {
                        style: "display: flex; gap: 0.5rem; align-items: center; font-weight: 600; margin-bottom: 0.75rem;",
                        Icon { icon: FaUsers, width: 16, height: 16 }
                        "Active alerts"
                    }
                    if model.alerts.is_empty() {
                        p { style: "color: #6b7280;", "No active alerts." }
                    }
                    for alert in model.alerts.iter().cloned() {
                        div {
                            key: "{alert.blood_group}",
                            style: "display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 0; border-top: 1px solid #f3f4f6;",
                            div {
                                strong { "{alert.blood_group}" }
                                if let Some(radius) = alert.radius {
                                    span { style: "margin-left: 0.5rem; color: #6b7280;", "{radius} km" }
                                }
                                if let Some(duration) = alert.duration {
                                    span { style: "margin-left: 0.5rem; color: #6b7280;", "{duration} h" }
                                }
                                span { style: "margin-left: 0.5rem;", "{alert.donor_count} responders" }
                            }
                            button {
                                class: "btn btn--ghost",
                                disabled: busy,
                                onclick: {
                                    let dashboard = dashboard.clone();
                                    let group = alert.blood_group;
                                    move |_| {
                                        let dashboard = dashboard.clone();
                                        spawn(async move {
                                            let _ = dashboard.close_alert(group).await;
                                        });
                                    }
                                },
                                "Deactivate"
                            }
                        }
                    }
                }
            }
        }
    }
}
