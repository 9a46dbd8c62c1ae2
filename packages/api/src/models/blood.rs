//! Blood groups and urgency levels shared by requests and alerts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// ABO/Rh blood group. The wire form is the printed label (`"AB+"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
}

impl BloodGroup {
    /// Picker order used by the forms.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::OPositive,
        BloodGroup::ONegative,
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.label() == wanted)
            .ok_or_else(|| format!("unknown blood group: {s}"))
    }
}

/// How urgently blood is needed. Ordered from least to most urgent.
///
/// Serialised with the labels the request form submits. Parsing also accepts
/// the snake_case tags seen on alerts and the blood-bank severity scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Urgency {
    Normal,
    Urgent,
    ExtremelyUrgent,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Normal, Urgency::Urgent, Urgency::ExtremelyUrgent];

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Normal => "Normal",
            Urgency::Urgent => "Urgent",
            Urgency::ExtremelyUrgent => "Extremely Urgent",
        }
    }

    /// Badge text.
    pub fn badge(&self) -> String {
        self.label().to_uppercase()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "normal" | "low" | "medium" => Ok(Urgency::Normal),
            "urgent" | "high" => Ok(Urgency::Urgent),
            "extremely urgent" | "critical" => Ok(Urgency::ExtremelyUrgent),
            _ => Err(format!("unknown urgency: {s}")),
        }
    }
}

impl TryFrom<String> for Urgency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Urgency> for String {
    fn from(value: Urgency) -> Self {
        value.label().to_string()
    }
}

/// Field decoder for urgencies sent by the backend: an unknown or
/// non-string value reads as absent rather than failing the whole record.
pub(crate) fn known_urgency<'de, D>(deserializer: D) -> Result<Option<Urgency>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}
