//! Donor dashboard: availability switch and the alerts matching the donor's
//! blood group.

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::lifecycle::{Lifecycle, MutationError, NoticeLevel, Reconcile, ViewCell};
use crate::models::{AlertAction, AlertResponse, DonorAlert, DonorProfile};
use crate::transport::Transport;

pub const STATUS_FAILED: &str = "Failed to update status. Please try again.";
pub const ALERTS_FAILED: &str =
    "Failed to load alerts. Please check your network connection or authentication.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonorModel {
    pub profile: Option<DonorProfile>,
    pub alerts: Vec<DonorAlert>,
}

impl DonorModel {
    pub fn is_available(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.is_available)
    }

    /// Alerts are only shown to available donors.
    pub fn visible_alerts(&self) -> &[DonorAlert] {
        if self.is_available() {
            &self.alerts
        } else {
            &[]
        }
    }
}

fn availability_word(available: bool) -> &'static str {
    if available {
        "Available"
    } else {
        "Unavailable"
    }
}

#[derive(Clone, Debug)]
pub struct DonorDashboard<T, S, C> {
    client: ApiClient<T>,
    lifecycle: Lifecycle<S, C>,
}

impl<T, S, C> DonorDashboard<T, S, C>
where
    T: Transport,
    S: KeyValueStore,
    C: ViewCell<Model = DonorModel>,
{
    pub fn new(client: ApiClient<T>, lifecycle: Lifecycle<S, C>) -> Self {
        Self { client, lifecycle }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, C> {
        &self.lifecycle
    }

    /// Profile first, then alerts if the donor is available. Nothing is
    /// shown unless both succeed.
    pub async fn load(&self) -> bool {
        let session = self.lifecycle.session();
        let fetch = async {
            let profile = self.client.donor_profile(session).await?;
            let alerts = if profile.is_available {
                self.client.donor_alerts(session).await?
            } else {
                Vec::new()
            };
            Ok::<_, ApiError>((profile, alerts))
        };
        self.lifecycle
            .load(fetch, |model, (profile, alerts)| {
                model.profile = Some(profile);
                model.alerts = alerts;
            })
            .await
    }

    /// Re-read alerts for the current availability.
    pub async fn refresh_alerts(&self) -> bool {
        if !self.lifecycle.cell().snapshot().model.is_available() {
            self.lifecycle.cell().update(|view| view.model.alerts.clear());
            return true;
        }
        self.lifecycle
            .refresh(
                self.client.donor_alerts(self.lifecycle.session()),
                |model, alerts| model.alerts = alerts,
                ALERTS_FAILED,
            )
            .await
    }

    /// Flip availability optimistically; the previous value comes back if
    /// the server refuses.
    pub async fn toggle_availability(&self) -> Result<bool, MutationError> {
        let state = self.lifecycle.cell().snapshot();
        if !state.accepts_actions() || state.model.profile.is_none() {
            return Err(MutationError::NotReady);
        }
        let target = !state.model.is_available();

        self.lifecycle.notify(
            NoticeLevel::Info,
            format!("Updating status to {}...", availability_word(target)),
        );
        self.lifecycle
            .mutate_with(
                Reconcile::Optimistic,
                self.client
                    .set_availability(self.lifecycle.session(), target),
                |model, _| {
                    if let Some(profile) = model.profile.as_mut() {
                        profile.is_available = target;
                    }
                    if !target {
                        model.alerts.clear();
                    }
                },
                |_| STATUS_FAILED.to_string(),
            )
            .await?;

        self.lifecycle.notify(
            NoticeLevel::Success,
            format!(
                "Status updated: You are now {}.",
                availability_word(target).to_uppercase()
            ),
        );
        self.refresh_alerts().await;
        Ok(target)
    }

    pub async fn accept(&self, alert_id: i64) -> Result<AlertResponse, MutationError> {
        self.respond(alert_id, AlertAction::Accept).await
    }

    pub async fn reject(&self, alert_id: i64) -> Result<AlertResponse, MutationError> {
        self.respond(alert_id, AlertAction::Reject).await
    }

    /// Answer an alert. It disappears from the list immediately; on failure
    /// the whole list is fetched again.
    pub async fn respond(
        &self,
        alert_id: i64,
        action: AlertAction,
    ) -> Result<AlertResponse, MutationError> {
        let Some(donor_id) = self
            .lifecycle
            .cell()
            .snapshot()
            .model
            .profile
            .map(|p| p.id)
        else {
            return Err(MutationError::NotReady);
        };

        let result = self
            .lifecycle
            .mutate_with(
                Reconcile::Optimistic,
                self.client
                    .respond_to_alert(self.lifecycle.session(), alert_id, donor_id, action),
                |model, _| model.alerts.retain(|alert| alert.id != Some(alert_id)),
                |_| format!("Failed to {action} alert. Please retry."),
            )
            .await;

        match result {
            Ok(response) => {
                self.lifecycle.notify(
                    NoticeLevel::Success,
                    format!(
                        "Alert {} successfully! Donor count: {}",
                        action.past_tense(),
                        response.donor_count
                    ),
                );
                self.refresh_alerts().await;
                Ok(response)
            }
            Err(MutationError::Api(err)) if !err.is_unauthorized() => {
                self.refresh_alerts().await;
                Err(MutationError::Api(err))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::join;
    use serde_json::json;
    use store::{MemoryStore, Role};

    use super::*;
    use crate::client::{alert_response_path, DONOR_ALERTS, DONOR_AVAILABILITY, DONOR_PROFILE};
    use crate::lifecycle::{Phase, Timing, ViewState};
    use crate::test_support::{logged_in, logged_out, ScriptedTransport};
    use crate::transport::Method;

    type Cell = Rc<RefCell<ViewState<DonorModel>>>;

    fn dashboard(
        transport: &ScriptedTransport,
        session: crate::session::Session<MemoryStore>,
    ) -> (DonorDashboard<ScriptedTransport, MemoryStore, Cell>, Cell) {
        let cell: Cell = Rc::new(RefCell::new(ViewState::new(DonorModel::default())));
        let lifecycle = Lifecycle::new(session, cell.clone(), Timing::default());
        (
            DonorDashboard::new(ApiClient::new(transport.clone()), lifecycle),
            cell,
        )
    }

    fn alert(id: i64) -> serde_json::Value {
        json!({ "id": id, "blood_group": "A+", "hospital": "CHU", "urgency": "urgent", "distance": 4 })
    }

    fn available_donor(transport: &ScriptedTransport) {
        transport
            .reply(
                Method::Get,
                DONOR_PROFILE,
                200,
                json!({ "id": 12, "name": "Awa", "blood_group": "A+", "is_available": true }),
            )
            .reply(Method::Get, DONOR_ALERTS, 200, json!([alert(1), alert(2)]));
    }

    #[tokio::test]
    async fn test_load_available_donor() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);

        assert!(dash.load().await);
        let state = cell.snapshot();
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.model.visible_alerts().len(), 2);
        assert_eq!(state.model.alerts[0].distance.as_deref(), Some("4 km"));
    }

    #[tokio::test]
    async fn test_load_unavailable_skips_alerts() {
        let transport = ScriptedTransport::new();
        transport.reply(
            Method::Get,
            DONOR_PROFILE,
            200,
            json!({ "id": 12, "is_available": false }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);

        assert!(dash.load().await);
        assert_eq!(transport.count(Method::Get, DONOR_ALERTS), 0);
        assert!(cell.snapshot().model.visible_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_load_without_credential_issues_no_request() {
        let transport = ScriptedTransport::new();
        let (dash, cell) = dashboard(&transport, logged_out());

        assert!(!dash.load().await);
        assert!(transport.sent().is_empty());
        assert_eq!(cell.snapshot().phase, Phase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_load_is_all_or_nothing() {
        let transport = ScriptedTransport::new();
        transport
            .reply(
                Method::Get,
                DONOR_PROFILE,
                200,
                json!({ "id": 12, "is_available": true }),
            )
            .fail(Method::Get, DONOR_ALERTS);
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);

        assert!(!dash.load().await);
        let state = cell.snapshot();
        assert!(matches!(state.phase, Phase::Failed(_)));
        assert!(state.model.profile.is_none());
    }

    #[tokio::test]
    async fn test_toggle_flips_before_server_answers() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);
        dash.load().await;

        let release = transport.gate(Method::Patch, DONOR_AVAILABILITY);
        let watched = &cell;
        let observe = async move {
            let state = watched.snapshot();
            assert!(!state.model.is_available());
            assert!(state.model.visible_alerts().is_empty());
            assert_eq!(
                state.notice.as_ref().map(|n| n.message.as_str()),
                Some("Updating status to Unavailable...")
            );
            release.send((200, json!({}))).unwrap();
        };
        let (result, ()) = join!(dash.toggle_availability(), observe);

        assert_eq!(result, Ok(false));
        let state = cell.snapshot();
        assert_eq!(
            state.notice.unwrap().message,
            "Status updated: You are now UNAVAILABLE."
        );
        let patch = &transport.sent()[2];
        assert_eq!(patch.body, Some(json!({ "is_available": false })));
    }

    #[tokio::test]
    async fn test_toggle_failure_rolls_back() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        transport.reply(
            Method::Patch,
            DONOR_AVAILABILITY,
            500,
            json!({ "detail": "boom" }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);
        dash.load().await;

        assert!(dash.toggle_availability().await.is_err());
        let state = cell.snapshot();
        assert!(state.model.is_available());
        assert_eq!(state.model.alerts.len(), 2);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.notice.unwrap().message, STATUS_FAILED);
    }

    #[tokio::test]
    async fn test_accept_removes_and_reports_count() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        transport
            .reply(
                Method::Post,
                &alert_response_path(1, AlertAction::Accept),
                200,
                json!({ "donor_count": 3 }),
            )
            .reply(Method::Get, DONOR_ALERTS, 200, json!([alert(2)]));
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);
        dash.load().await;

        let response = dash.accept(1).await.unwrap();
        assert_eq!(response.donor_count, 3);
        let state = cell.snapshot();
        assert_eq!(state.model.alerts.len(), 1);
        assert_eq!(
            state.notice.unwrap().message,
            "Alert accepted successfully! Donor count: 3"
        );
        let post = transport
            .sent()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(post.body, Some(json!({ "donor_id": 12 })));
    }

    #[tokio::test]
    async fn test_accept_failure_restores_via_refetch() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        transport
            .fail(Method::Post, &alert_response_path(1, AlertAction::Accept))
            .reply(Method::Get, DONOR_ALERTS, 200, json!([alert(1), alert(2)]));
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);
        dash.load().await;

        assert!(dash.accept(1).await.is_err());
        assert_eq!(transport.count(Method::Get, DONOR_ALERTS), 2);
        let state = cell.snapshot();
        assert_eq!(state.model.alerts.len(), 2);
        assert_eq!(
            state.notice.unwrap().message,
            "Failed to accept alert. Please retry."
        );
    }

    #[tokio::test]
    async fn test_reject_with_expired_session_redirects() {
        let transport = ScriptedTransport::new();
        available_donor(&transport);
        transport.reply(
            Method::Post,
            &alert_response_path(2, AlertAction::Reject),
            401,
            json!({ "detail": "Token expired" }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::Donor).await);
        dash.load().await;

        assert!(dash.reject(2).await.is_err());
        assert!(!dash.lifecycle().session().is_authenticated().await);
        let state = cell.snapshot();
        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.redirect.unwrap().to, "/auth");
        assert_eq!(transport.count(Method::Get, DONOR_ALERTS), 1);
    }
}
