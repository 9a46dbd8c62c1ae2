//! # Login and registration payloads
//!
//! ## [`LoginRequest`] / [`TokenResponse`]
//!
//! `POST /api/auth/login/` takes the email, password and the role the user
//! claims; the backend answers with a JWT pair and the authoritative role,
//! which becomes the stored [`Credential`].
//!
//! ## [`Registration`]
//!
//! Each role registers against its own endpoint with its own extra fields.
//! The role tag is always sent explicitly; the backend rejects a payload whose
//! endpoint and role disagree.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use store::{Credential, Role};

use super::blood::BloodGroup;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    /// `None` when the backend sent no role or one no vocabulary knows.
    #[serde(default, deserialize_with = "known_role")]
    pub role: Option<Role>,
}

fn known_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(Role::from_label))
}

impl TokenResponse {
    pub fn into_credential(self) -> Credential {
        Credential::new(self.access, self.refresh, self.role)
    }
}

/// Role-specific registration fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Registration {
    Donor {
        name: String,
        blood_group: BloodGroup,
        /// `YYYY-MM-DD`, as typed.
        date_of_birth: String,
    },
    Doctor {
        professional_id: String,
        hospital: String,
    },
    BloodBank {
        bank_name: String,
        location: String,
    },
}

impl Registration {
    pub fn role(&self) -> Role {
        match self {
            Registration::Donor { .. } => Role::Donor,
            Registration::Doctor { .. } => Role::Doctor,
            Registration::BloodBank { .. } => Role::BloodBank,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Registration::Donor { .. } => "/api/auth/register/donneur/",
            Registration::Doctor { .. } => "/api/auth/register/doctor/",
            Registration::BloodBank { .. } => "/api/auth/register/blood_bank/",
        }
    }

    /// Full request body including credentials and the role tag.
    pub fn payload(&self, email: &str, password: &str) -> Value {
        let mut body = match self {
            Registration::Donor {
                name,
                blood_group,
                date_of_birth,
            } => json!({
                "name": name,
                "blood_group": blood_group,
                "date_of_birth": date_of_birth,
            }),
            Registration::Doctor {
                professional_id,
                hospital,
            } => json!({
                "professional_id": professional_id,
                "hospital": hospital,
            }),
            Registration::BloodBank {
                bank_name,
                location,
            } => json!({
                "bank_name": bank_name,
                "location": location,
            }),
        };
        if let Value::Object(fields) = &mut body {
            fields.insert("email".into(), Value::from(email));
            fields.insert("password".into(), Value::from(password));
            fields.insert("role".into(), Value::from(self.role().as_tag()));
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_bank_payload_carries_role_tag() {
        let registration = Registration::BloodBank {
            bank_name: "Central".into(),
            location: "Dakar".into(),
        };
        let body = registration.payload("bank@example.org", "secret");
        assert_eq!(registration.endpoint(), "/api/auth/register/blood_bank/");
        assert_eq!(body["role"], "bloodbank");
        assert_eq!(body["bank_name"], "Central");
        assert_eq!(body["email"], "bank@example.org");
    }

    #[test]
    fn test_donor_payload() {
        let registration = Registration::Donor {
            name: "Awa".into(),
            blood_group: BloodGroup::ONegative,
            date_of_birth: "1990-02-03".into(),
        };
        let body = registration.payload("a@b.c", "pw");
        assert_eq!(registration.endpoint(), "/api/auth/register/donneur/");
        assert_eq!(body["blood_group"], "O-");
        assert_eq!(body["role"], "donor");
    }

    #[test]
    fn test_token_response_becomes_credential() {
        let tokens: TokenResponse = serde_json::from_value(
            serde_json::json!({ "access": "a", "refresh": "r", "role": "bloodbank" }),
        )
        .unwrap();
        let credential = tokens.into_credential();
        assert_eq!(credential.role, Some(Role::BloodBank));
        assert_eq!(credential.access, "a");
    }

    #[test]
    fn test_token_response_role_vocabularies() {
        let decode = |role: serde_json::Value| {
            serde_json::from_value::<TokenResponse>(
                serde_json::json!({ "access": "a", "refresh": "r", "role": role }),
            )
            .unwrap()
            .role
        };
        assert_eq!(decode("Banque de Sang".into()), Some(Role::BloodBank));
        assert_eq!(decode("Docteur".into()), Some(Role::Doctor));
        assert_eq!(decode("admin".into()), None);
        assert_eq!(decode(serde_json::Value::Null), None);
    }
}
