//! Donor alerts: broadcast by blood banks, answered by donors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::blood::{known_urgency, BloodGroup, Urgency};

/// An active call for donors of one blood group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonorAlert {
    /// Absent on some create responses; blood banks address alerts by group.
    #[serde(default)]
    pub id: Option<i64>,
    pub blood_group: BloodGroup,
    /// Search radius in kilometres.
    #[serde(default)]
    pub radius: Option<u32>,
    /// Lifetime in hours.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub donor_count: u32,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default, deserialize_with = "known_urgency")]
    pub urgency: Option<Urgency>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub distance: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(format!("{n} km")),
        _ => None,
    })
}

/// Payload for `POST /api/bloodbank/alerts/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    pub blood_group: BloodGroup,
    pub radius: u32,
    pub duration: u32,
}

impl Default for NewAlert {
    fn default() -> Self {
        Self {
            blood_group: BloodGroup::OPositive,
            radius: 10,
            duration: 24,
        }
    }
}

impl NewAlert {
    /// Radius and duration are at least 1.
    pub fn normalized(mut self) -> Self {
        self.radius = self.radius.max(1);
        self.duration = self.duration.max(1);
        self
    }
}

/// A donor's answer to an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertAction {
    Accept,
    Reject,
}

impl AlertAction {
    /// Path segment in `/api/donor/alerts/<id>/<action>/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertAction::Accept => "accept",
            AlertAction::Reject => "reject",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            AlertAction::Accept => "accepted",
            AlertAction::Reject => "rejected",
        }
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for the respond endpoint; the backend still expects the donor id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertReply {
    pub donor_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub donor_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_without_id_decodes() {
        let json = serde_json::json!({ "blood_group": "AB+", "radius": 10, "duration": 24 });
        let alert: DonorAlert = serde_json::from_value(json).unwrap();
        assert!(alert.id.is_none());
        assert_eq!(alert.donor_count, 0);
        assert_eq!(alert.radius, Some(10));
    }

    #[test]
    fn test_distance_number_or_string() {
        let numeric: DonorAlert =
            serde_json::from_value(serde_json::json!({ "id": 1, "blood_group": "O-", "distance": 3.5 }))
                .unwrap();
        assert_eq!(numeric.distance.as_deref(), Some("3.5 km"));

        let text: DonorAlert = serde_json::from_value(
            serde_json::json!({ "id": 2, "blood_group": "O-", "distance": "2 km", "urgency": "urgent" }),
        )
        .unwrap();
        assert_eq!(text.distance.as_deref(), Some("2 km"));
        assert_eq!(text.urgency, Some(Urgency::Urgent));
    }

    #[test]
    fn test_new_alert_defaults_and_floor() {
        let alert = NewAlert::default();
        assert_eq!(alert.blood_group, BloodGroup::OPositive);
        assert_eq!((alert.radius, alert.duration), (10, 24));

        let clamped = NewAlert { radius: 0, duration: 0, ..alert }.normalized();
        assert_eq!((clamped.radius, clamped.duration), (1, 1));
    }
}
