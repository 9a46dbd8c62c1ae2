//! # Session models persisted on the client
//!
//! The client keeps exactly one piece of durable state: the credential issued
//! at login. It is split across three storage keys (see [`crate::kv`]) so that
//! it stays readable by anything else sharing the same origin storage.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Which dashboard the authenticated account belongs to. Serialised with the backend's wire tags (`"donor"`, `"doctor"`, `"bloodbank"`). |
//! | [`Credential`] | Bearer token pair plus the last-known role tag. |
//!
//! ## Role labels
//!
//! Two login forms circulated with different role vocabularies: one with
//! localized labels (`"Donneur"`, `"Docteur"`, `"Banque de Sang"`), one with
//! English ones. [`Role::from_label`] accepts both, as well as the raw wire
//! tags, so neither form is privileged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Account role, as tagged by the backend.
///
/// Serialized as the wire tag; deserialized through [`Role::from_label`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Doctor,
    #[serde(rename = "bloodbank")]
    BloodBank,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Donor, Role::Doctor, Role::BloodBank];

    /// Wire tag sent to and received from the backend.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Doctor => "doctor",
            Role::BloodBank => "bloodbank",
        }
    }

    /// English label shown in role pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Donor => "Donor",
            Role::Doctor => "Doctor",
            Role::BloodBank => "Blood Bank",
        }
    }

    /// Dashboard route for this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Donor => "/donor",
            Role::Doctor => "/doctor",
            Role::BloodBank => "/blood-bank",
        }
    }

    /// Profile route for this role.
    pub fn profile_path(&self) -> &'static str {
        match self {
            Role::Donor => "/profilDon",
            Role::Doctor => "/profilDoc",
            Role::BloodBank => "/bloodbankprofil",
        }
    }

    /// Resolve a role from a wire tag, an English label or a localized label.
    pub fn from_label(label: &str) -> Option<Role> {
        let normalized = label.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "donor" | "donneur" => Some(Role::Donor),
            "doctor" | "docteur" => Some(Role::Doctor),
            "bloodbank" | "blood bank" | "banque de sang" => Some(Role::BloodBank),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Role::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role: {label}")))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_label(s).ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Bearer token pair and role tag issued at login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access: String,
    pub refresh: String,
    pub role: Option<Role>,
}

impl Credential {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
            role,
        }
    }
}
