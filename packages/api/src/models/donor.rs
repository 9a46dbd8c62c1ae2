//! Donor profile and blood-bank statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::blood::BloodGroup;

/// The authenticated donor, as returned by `GET /api/donor/me/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonorProfile {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub is_available: bool,
}

impl DonorProfile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Donor")
    }
}

/// Payload for `PATCH /api/donor/me/availability/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

/// Aggregate counters shown on the blood-bank dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BankStats {
    #[serde(default)]
    pub available_donors: u32,
    #[serde(default)]
    pub blood_groups: BTreeMap<String, u32>,
}
