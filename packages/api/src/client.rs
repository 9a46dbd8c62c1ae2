//! # Typed BloodLink API client
//!
//! [`ApiClient`] wraps a [`Transport`] with one method per backend endpoint.
//! Every authenticated method takes the [`Session`] explicitly and applies the
//! same rules:
//!
//! - no stored credential → [`ApiError::MissingCredential`], nothing is sent;
//! - 401 or 403 → the session is invalidated and [`ApiError::Unauthorized`]
//!   is returned, whichever endpoint answered it;
//! - any other non-2xx → [`ApiError::Rejected`] carrying the response body;
//! - 2xx → the body decoded into the endpoint's type.
//!
//! Login and registration go through the public path: no bearer, and a 401
//! there means "wrong password", not "session expired".

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use store::{Credential, KeyValueStore};

use crate::error::ApiError;
use crate::models::{
    AlertAction, AlertReply, AlertResponse, AvailabilityUpdate, BankStats, BloodGroup,
    BloodRequest, DonorAlert, DonorProfile, LoginRequest, NewAlert, NewBloodRequest,
    Registration, RequestStatus, StatusUpdate, TokenResponse,
};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub const LOGIN: &str = "/api/auth/login/";
pub const DONOR_PROFILE: &str = "/api/donor/me/";
pub const DONOR_AVAILABILITY: &str = "/api/donor/me/availability/";
pub const DONOR_ALERTS: &str = "/api/donor/alerts/";
pub const DOCTOR_REQUESTS: &str = "/api/doctor/requests/";
pub const BANK_REQUESTS: &str = "/api/bloodbank/requests/";
pub const BANK_ALERTS: &str = "/api/bloodbank/alerts/";
pub const BANK_STATS: &str = "/api/bloodbank/stats/";

pub fn alert_response_path(alert_id: i64, action: AlertAction) -> String {
    format!("{DONOR_ALERTS}{alert_id}/{action}/")
}

pub fn bank_request_path(request_id: i64) -> String {
    format!("{BANK_REQUESTS}{request_id}/")
}

pub fn bank_alert_path(blood_group: BloodGroup) -> String {
    format!("{BANK_ALERTS}{blood_group}/")
}

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Client talking HTTP to `base_url`.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(base_url))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    // ---- auth ----

    /// Exchange email, password and claimed role for a credential.
    ///
    /// The credential is returned, not stored; the caller establishes it.
    pub async fn login(&self, request: &LoginRequest) -> Result<Credential, ApiError> {
        let tokens: TokenResponse = self
            .public(ApiRequest::new(Method::Post, LOGIN).with_body(to_body(request)?))
            .await?;
        Ok(tokens.into_credential())
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        registration: &Registration,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .public(
                ApiRequest::new(Method::Post, registration.endpoint())
                    .with_body(registration.payload(email, password)),
            )
            .await?;
        Ok(())
    }

    // ---- donor ----

    pub async fn donor_profile<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<DonorProfile, ApiError> {
        self.authorized(session, ApiRequest::new(Method::Get, DONOR_PROFILE))
            .await
    }

    /// Active alerts matching the donor's blood group.
    pub async fn donor_alerts<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<Vec<DonorAlert>, ApiError> {
        self.list(session, DONOR_ALERTS).await
    }

    pub async fn set_availability<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        is_available: bool,
    ) -> Result<(), ApiError> {
        let body = to_body(&AvailabilityUpdate { is_available })?;
        let _: IgnoredAny = self
            .authorized(
                session,
                ApiRequest::new(Method::Patch, DONOR_AVAILABILITY).with_body(body),
            )
            .await?;
        Ok(())
    }

    pub async fn respond_to_alert<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        alert_id: i64,
        donor_id: i64,
        action: AlertAction,
    ) -> Result<AlertResponse, ApiError> {
        let body = to_body(&AlertReply { donor_id })?;
        self.authorized(
            session,
            ApiRequest::new(Method::Post, alert_response_path(alert_id, action)).with_body(body),
        )
        .await
    }

    // ---- doctor ----

    pub async fn doctor_requests<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<Vec<BloodRequest>, ApiError> {
        self.list(session, DOCTOR_REQUESTS).await
    }

    pub async fn create_request<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        request: &NewBloodRequest,
    ) -> Result<BloodRequest, ApiError> {
        let body = to_body(request)?;
        self.authorized(
            session,
            ApiRequest::new(Method::Post, DOCTOR_REQUESTS).with_body(body),
        )
        .await
    }

    // ---- blood bank ----

    /// Pending requests addressed to the bank.
    pub async fn bank_requests<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<Vec<BloodRequest>, ApiError> {
        self.list(session, BANK_REQUESTS).await
    }

    pub async fn bank_alerts<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<Vec<DonorAlert>, ApiError> {
        self.list(session, BANK_ALERTS).await
    }

    pub async fn bank_stats<S: KeyValueStore>(
        &self,
        session: &Session<S>,
    ) -> Result<BankStats, ApiError> {
        let stats: Option<BankStats> = self
            .authorized(session, ApiRequest::new(Method::Get, BANK_STATS))
            .await?;
        Ok(stats.unwrap_or_default())
    }

    pub async fn process_request<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        request_id: i64,
    ) -> Result<(), ApiError> {
        let body = to_body(&StatusUpdate {
            status: RequestStatus::Processed,
        })?;
        let _: IgnoredAny = self
            .authorized(
                session,
                ApiRequest::new(Method::Patch, bank_request_path(request_id)).with_body(body),
            )
            .await?;
        Ok(())
    }

    pub async fn create_alert<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        alert: &NewAlert,
    ) -> Result<DonorAlert, ApiError> {
        let body = to_body(alert)?;
        self.authorized(session, ApiRequest::new(Method::Post, BANK_ALERTS).with_body(body))
            .await
    }

    /// Deactivate the bank's alert for a blood group.
    pub async fn close_alert<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        blood_group: BloodGroup,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .authorized(
                session,
                ApiRequest::new(Method::Delete, bank_alert_path(blood_group)),
            )
            .await?;
        Ok(())
    }

    // ---- plumbing ----

    async fn list<S: KeyValueStore, R: DeserializeOwned>(
        &self,
        session: &Session<S>,
        path: &str,
    ) -> Result<Vec<R>, ApiError> {
        let items: Option<Vec<R>> = self
            .authorized(session, ApiRequest::new(Method::Get, path))
            .await?;
        Ok(items.unwrap_or_default())
    }

    async fn authorized<S: KeyValueStore, R: DeserializeOwned>(
        &self,
        session: &Session<S>,
        request: ApiRequest,
    ) -> Result<R, ApiError> {
        let credential = session
            .credential()
            .await
            .ok_or(ApiError::MissingCredential)?;
        let path = request.path.clone();
        let response = self
            .transport
            .send(request.with_bearer(credential.access))
            .await?;
        if matches!(response.status, 401 | 403) {
            tracing::warn!("{} rejected the credential ({})", path, response.status);
            session.invalidate().await;
            return Err(ApiError::Unauthorized {
                status: response.status,
            });
        }
        decode(response)
    }

    async fn public<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        decode(self.transport.send(request).await?)
    }
}

fn decode<R: DeserializeOwned>(response: ApiResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Rejected {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_value(response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
