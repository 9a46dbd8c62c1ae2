use dioxus::prelude::*;

use ui::views::{
    BloodBank, BloodBankProfile, Doctor, DoctorProfile, Donor, DonorProfile, Home, Login,
};
use ui::AppProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/auth")]
    Login {},
    #[route("/doctor")]
    Doctor {},
    #[route("/profilDoc")]
    DoctorProfile {},
    #[route("/donor")]
    Donor {},
    #[route("/profilDon")]
    DonorProfile {},
    #[route("/blood-bank")]
    BloodBank {},
    #[route("/bloodbankprofil")]
    BloodBankProfile {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // The browser build always talks to the default backend.
    let config = use_hook(|| {
        tracing::info!("starting BloodLink web client");
        store::ClientConfig::default()
    });

    rsx! {
        AppProvider { config,
            Router::<Route> {}
        }
    }
}
