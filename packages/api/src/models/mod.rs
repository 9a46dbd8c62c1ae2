//! Wire models for the BloodLink REST API.

mod alert;
mod auth;
mod blood;
mod donor;
mod request;

pub use alert::{AlertAction, AlertReply, AlertResponse, DonorAlert, NewAlert};
pub use auth::{LoginRequest, Registration, TokenResponse};
pub use blood::{BloodGroup, Urgency};
pub use donor::{AvailabilityUpdate, BankStats, DonorProfile};
pub use request::{
    sort_newest_first, BloodRequest, FormError, NewBloodRequest, RequestForm, RequestStatus,
    StatusUpdate,
};
