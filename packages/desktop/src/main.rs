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
    // Native builds read `bloodlink.toml` from the user's config directory.
    let config = use_hook(|| {
        let config = ui::load_config();
        tracing::info!("starting BloodLink desktop client against {}", config.api.base_url);
        config
    });

    rsx! {
        AppProvider { config,
            Router::<Route> {}
        }
    }
}
