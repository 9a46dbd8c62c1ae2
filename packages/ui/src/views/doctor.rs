use api::dashboard::{DoctorDashboard, DoctorModel};
use api::models::{BloodGroup, Urgency};
use api::ViewState;
use dioxus::prelude::*;
use store::Role;

use super::{phase_placeholder, DashboardHeader, VIEW_CSS};
use crate::context::use_app;
use crate::notice::{use_view_effects, NoticeBanner};

#[component]
pub fn Doctor() -> Element {
    let app = use_app();
    let state = use_signal(|| ViewState::new(DoctorModel::default()));
    let dashboard = use_hook(|| DoctorDashboard::new(app.client.clone(), app.lifecycle(state)));
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
    let form = current.model.form.clone();
    let busy = !current.accepts_actions();

    let on_submit = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let dashboard = dashboard.clone();
            spawn(async move {
                let _ = dashboard.submit().await;
            });
        }
    };
    let set_group = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            dashboard.edit_form(|form| form.blood_group = evt.value().parse::<BloodGroup>().ok())
        }
    };
    let set_quantity = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| dashboard.edit_form(|form| form.quantity = evt.value().parse().unwrap_or(0))
    };
    let set_urgency = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| {
            dashboard.edit_form(|form| form.urgency = evt.value().parse::<Urgency>().ok())
        }
    };
    let set_hospital = {
        let dashboard = dashboard.clone();
        move |evt: FormEvent| dashboard.edit_form(|form| form.hospital = evt.value())
    };

    rsx! {
        style { {VIEW_CSS} }
        div { class: "page",
            DashboardHeader { title: "Doctor dashboard", role: Role::Doctor }
            NoticeBanner { notice: current.notice.clone() }

            if let Some(placeholder) = body {
                {placeholder}
            } else {
                form { class: "card", onsubmit: on_submit,
                    h2 { style: "font-weight: 600; margin-bottom: 0.75rem;", "New blood request" }
                    label { class: "field",
                        "Blood group"
                        select { onchange: set_group,
                            option { value: "", selected: form.blood_group.is_none(), "Select..." }
                            for group in BloodGroup::ALL {
                                option {
                                    value: group.label(),
                                    selected: form.blood_group == Some(group),
                                    "{group}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        "Quantity (units)"
                        input {
                            r#type: "number",
                            min: "1",
                            value: "{form.quantity}",
                            oninput: set_quantity,
                        }
                    }
                    label { class: "field",
                        "Urgency"
                        select { onchange: set_urgency,
                            option { value: "", selected: form.urgency.is_none(), "Select..." }
                            for urgency in Urgency::ALL {
                                option {
                                    value: urgency.label(),
                                    selected: form.urgency == Some(urgency),
                                    "{urgency}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        "Hospital"
                        input { value: "{form.hospital}", oninput: set_hospital }
                    }
                    button {
                        class: "btn",
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Sending..." } else { "Send request" }
                    }
                }

                div { class: "card",
                    h2 { style: "font-weight: 600; margin-bottom: 0.75rem;", "Request history" }
                    if current.model.requests.is_empty() {
                        p { style: "color: #6b7280;", "No requests yet." }
                    }
                    for request in current.model.requests.iter().cloned() {
                        div {
                            key: "{request.id}",
                            style: "display: flex; justify-content: space-between; padding: 0.75rem 0; border-top: 1px solid #f3f4f6;",
                            div {
                                strong { "{request.blood_group} × {request.quantity}" }
                                span { style: "margin-left: 0.5rem; color: #6b7280;", "{request.hospital}" }
                                if let Some(urgency) = request.urgency {
                                    span { class: "badge", style: "margin-left: 0.5rem;", "{urgency.badge()}" }
                                }
                            }
                            div { style: "color: #6b7280; text-align: right;",
                                span { "{request.status.label()}" }
                                if let Some(created) = request.created_label() {
                                    span { style: "margin-left: 0.5rem;", "{created}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
