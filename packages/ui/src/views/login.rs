use api::dashboard::{AuthMode, LoginForm, LoginModel, LoginView};
use api::{HttpTransport, ViewState};
use dioxus::prelude::*;
use store::Role;

use super::VIEW_CSS;
use crate::cell::SignalCell;
use crate::context::{use_app, PlatformStore};
use crate::notice::{use_view_effects, NoticeBanner};

type View = LoginView<HttpTransport, PlatformStore, SignalCell<LoginModel>>;

fn bind(view: &View, set: fn(&mut LoginForm, String)) -> impl FnMut(FormEvent) + 'static {
    let view = view.clone();
    move |evt: FormEvent| view.edit_form(|form| set(form, evt.value()))
}

/// Combined sign-in and registration page.
#[component]
pub fn Login() -> Element {
    let app = use_app();
    let state = use_signal(|| ViewState::ready(LoginModel::default()));
    let view = use_hook(|| LoginView::new(app.client.clone(), app.lifecycle(state)));
    use_view_effects(state);

    let current = state();
    let form = current.model.form.clone();
    let mode = current.model.mode;
    let busy = !current.accepts_actions();

    let on_submit = {
        let view = view.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let view = view.clone();
            spawn(async move {
                let _ = view.submit().await;
            });
        }
    };
    let toggle_mode = {
        let view = view.clone();
        move |_| {
            view.set_mode(match mode {
                AuthMode::SignIn => AuthMode::Register,
                AuthMode::Register => AuthMode::SignIn,
            })
        }
    };

    let (title, submit_label, toggle_label) = match mode {
        AuthMode::SignIn => ("Sign in", "Sign in", "No account yet? Register"),
        AuthMode::Register => ("Create an account", "Register", "Already registered? Sign in"),
    };

    rsx! {
        style { {VIEW_CSS} }
        div {
            class: "page",
            style: "max-width: 420px; padding-top: 4rem;",
            h1 { style: "font-size: 1.75rem; font-weight: 700; margin-bottom: 1rem;", "{title}" }
            NoticeBanner { notice: current.notice.clone() }

            form {
                class: "card",
                onsubmit: on_submit,

                label { class: "field",
                    "Role"
                    select {
                        disabled: busy,
                        onchange: bind(&view, |form, value| {
                            if let Some(role) = Role::from_label(&value) {
                                form.role = role;
                            }
                        }),
                        for role in Role::ALL {
                            option {
                                value: role.as_tag(),
                                selected: form.role == role,
                                "{role.label()}"
                            }
                        }
                    }
                }
                label { class: "field",
                    "Email"
                    input {
                        r#type: "email",
                        required: true,
                        value: "{form.email}",
                        oninput: bind(&view, |form, value| form.email = value),
                    }
                }
                label { class: "field",
                    "Password"
                    input {
                        r#type: "password",
                        required: true,
                        value: "{form.password}",
                        oninput: bind(&view, |form, value| form.password = value),
                    }
                }

                if mode == AuthMode::Register {
                    match form.role {
                        Role::Donor => rsx! {
                            label { class: "field",
                                "Full name"
                                input {
                                    value: "{form.name}",
                                    oninput: bind(&view, |form, value| form.name = value),
                                }
                            }
                            label { class: "field",
                                "Blood group"
                                select {
                                    onchange: bind(&view, |form, value| {
                                        if let Ok(group) = value.parse() {
                                            form.blood_group = group;
                                        }
                                    }),
                                    for group in api::models::BloodGroup::ALL {
                                        option {
                                            value: group.label(),
                                            selected: form.blood_group == group,
                                            "{group}"
                                        }
                                    }
                                }
                            }
                            label { class: "field",
                                "Date of birth"
                                input {
                                    r#type: "date",
                                    value: "{form.date_of_birth}",
                                    oninput: bind(&view, |form, value| form.date_of_birth = value),
                                }
                            }
                        },
                        Role::Doctor => rsx! {
                            label { class: "field",
                                "Professional ID"
                                input {
                                    value: "{form.professional_id}",
                                    oninput: bind(&view, |form, value| form.professional_id = value),
                                }
                            }
                            label { class: "field",
                                "Hospital"
                                input {
                                    value: "{form.hospital}",
                                    oninput: bind(&view, |form, value| form.hospital = value),
                                }
                            }
                        },
                        Role::BloodBank => rsx! {
                            label { class: "field",
                                "Bank name"
                                input {
                                    value: "{form.bank_name}",
                                    oninput: bind(&view, |form, value| form.bank_name = value),
                                }
                            }
                            label { class: "field",
                                "Location"
                                input {
                                    value: "{form.location}",
                                    oninput: bind(&view, |form, value| form.location = value),
                                }
                            }
                        },
                    }
                }

                button {
                    class: "btn",
                    r#type: "submit",
                    style: "width: 100%; margin-top: 0.5rem;",
                    disabled: busy,
                    if busy { "Please wait..." } else { "{submit_label}" }
                }
            }

            button {
                class: "btn btn--ghost",
                style: "width: 100%;",
                disabled: busy,
                onclick: toggle_mode,
                "{toggle_label}"
            }
        }
    }
}
