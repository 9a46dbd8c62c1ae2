//! Blood requests: created by doctors, processed by blood banks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::blood::{known_urgency, BloodGroup, Urgency};

/// Lifecycle of a blood request on the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Processed,
    Completed,
    Failed,
    /// Any status this client does not know yet.
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processed => "processed",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
            RequestStatus::Unknown => "unknown",
        }
    }
}

/// A request for blood units issued by a doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: i64,
    pub blood_group: BloodGroup,
    pub quantity: u32,
    #[serde(default, deserialize_with = "known_urgency")]
    pub urgency: Option<Urgency>,
    pub hospital: String,
    /// Name or id, whichever the backend sends.
    #[serde(default, deserialize_with = "text_or_number")]
    pub doctor: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl BloodRequest {
    /// Creation time as shown in lists.
    pub fn created_label(&self) -> Option<String> {
        self.created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
    }
}

/// Newest first; undated requests sink to the bottom.
pub fn sort_newest_first(requests: &mut [BloodRequest]) {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Payload for `POST /api/doctor/requests/`. The backend fills in the doctor
/// and the initial `pending` status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBloodRequest {
    pub blood_group: BloodGroup,
    pub quantity: u32,
    pub urgency: Urgency,
    pub hospital: String,
}

/// Payload for `PATCH /api/bloodbank/requests/<id>/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please complete all required fields and ensure quantity is at least 1.")]
    Incomplete,
}

/// Doctor request form as typed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestForm {
    pub blood_group: Option<BloodGroup>,
    pub quantity: u32,
    pub urgency: Option<Urgency>,
    pub hospital: String,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self {
            blood_group: None,
            quantity: 1,
            urgency: None,
            hospital: "Hospital Central".to_string(),
        }
    }
}

impl RequestForm {
    /// Validate and build the create payload.
    pub fn to_request(&self) -> Result<NewBloodRequest, FormError> {
        let hospital = self.hospital.trim();
        match (self.blood_group, self.urgency) {
            (Some(blood_group), Some(urgency)) if !hospital.is_empty() && self.quantity >= 1 => {
                Ok(NewBloodRequest {
                    blood_group,
                    quantity: self.quantity,
                    urgency,
                    hospital: hospital.to_string(),
                })
            }
            _ => Err(FormError::Incomplete),
        }
    }

    /// Clear the per-request fields, keeping the hospital.
    pub fn reset(&mut self) {
        self.blood_group = None;
        self.quantity = 1;
        self.urgency = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: i64, created_at: Option<&str>) -> BloodRequest {
        BloodRequest {
            id,
            blood_group: BloodGroup::APositive,
            quantity: 1,
            urgency: Some(Urgency::Normal),
            hospital: "H".into(),
            doctor: None,
            status: RequestStatus::Pending,
            created_at: created_at.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn test_decode_backend_request() {
        let json = serde_json::json!({
            "id": 7,
            "blood_group": "B-",
            "quantity": 3,
            "urgency": "extremely_urgent",
            "hospital": "Saint Luc",
            "doctor": "House",
            "status": "pending",
            "created_at": "2024-05-01T10:15:00.123456Z"
        });
        let decoded: BloodRequest = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.blood_group, BloodGroup::BNegative);
        assert_eq!(decoded.urgency, Some(Urgency::ExtremelyUrgent));
        assert_eq!(decoded.doctor.as_deref(), Some("House"));
        assert!(decoded.created_at.is_some());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = serde_json::json!({
            "id": 1, "blood_group": "O+", "quantity": 1, "urgency": "Normal", "hospital": "H"
        });
        let decoded: BloodRequest = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.status, RequestStatus::Pending);
        assert!(decoded.created_at.is_none());
    }

    #[test]
    fn test_lenient_fields_do_not_reject_the_row() {
        let json = serde_json::json!({
            "id": 3, "blood_group": "A+", "quantity": 2, "urgency": "apocalyptic",
            "hospital": "CHU", "doctor": 17, "status": "archived"
        });
        let decoded: BloodRequest = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.doctor.as_deref(), Some("17"));
        assert_eq!(decoded.urgency, None);
        assert_eq!(decoded.status, RequestStatus::Unknown);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut requests = vec![
            request(1, Some("2024-01-01T00:00:00Z")),
            request(2, None),
            request(3, Some("2024-03-01T00:00:00Z")),
        ];
        sort_newest_first(&mut requests);
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_form_validation() {
        let mut form = RequestForm::default();
        assert_eq!(form.to_request(), Err(FormError::Incomplete));

        form.blood_group = Some(BloodGroup::ONegative);
        form.urgency = Some(Urgency::Urgent);
        form.quantity = 0;
        assert_eq!(form.to_request(), Err(FormError::Incomplete));

        form.quantity = 2;
        form.hospital = "   ".into();
        assert_eq!(form.to_request(), Err(FormError::Incomplete));

        form.hospital = " Hospital Central ".into();
        let payload = form.to_request().unwrap();
        assert_eq!(payload.hospital, "Hospital Central");
        assert_eq!(
            serde_json::to_value(&payload).unwrap()["urgency"],
            serde_json::json!("Urgent")
        );

        form.reset();
        assert_eq!(form.quantity, 1);
        assert!(form.blood_group.is_none());
        assert_eq!(form.hospital, " Hospital Central ");
    }
}
