//! # Role dashboards
//!
//! Each dashboard pairs an [`ApiClient`](crate::ApiClient) with a
//! [`Lifecycle`](crate::lifecycle::Lifecycle) and exposes the view's
//! operations as async methods. None of them render anything; the UI crate
//! binds them to components.
//!
//! | Module | View | Operations |
//! |--------|------|------------|
//! | [`donor`] | `/donor` | load, toggle availability, accept / reject alerts |
//! | [`doctor`] | `/doctor` | load request history, submit a request |
//! | [`bank`] | `/blood-bank` | parallel load, process requests, create / close alerts |
//! | [`login`] | `/auth` | sign in, register |
//! | [`profile`] | profile routes | role summary, logout |

pub mod bank;
pub mod doctor;
pub mod donor;
pub mod login;
pub mod profile;

pub use bank::{BankDashboard, BankModel};
pub use doctor::{DoctorDashboard, DoctorModel, SubmitError};
pub use donor::{DonorDashboard, DonorModel};
pub use login::{AuthMode, LoginForm, LoginModel, LoginView};
pub use profile::{ProfileModel, ProfileView};
