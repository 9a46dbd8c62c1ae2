//! Blood-bank dashboard: incoming requests, active alerts and donor stats.
//!
//! All three collections are fetched concurrently and shown together. Every
//! action here is pessimistic: the lists change only after the backend
//! confirmed.

use futures::future::try_join3;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::lifecycle::{Lifecycle, MutationError, NoticeLevel, Reconcile, ViewCell};
use crate::models::{BankStats, BloodGroup, BloodRequest, DonorAlert, NewAlert};
use crate::transport::Transport;

pub const PROCESS_FAILED: &str = "Failed to process the request.";
pub const CREATE_FAILED: &str = "Failed to create the alert";
pub const CREATE_HINT: &str = "Check whether an alert for this group is already active.";
pub const CLOSE_FAILED: &str = "Failed to deactivate the alert.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BankModel {
    pub requests: Vec<BloodRequest>,
    pub alerts: Vec<DonorAlert>,
    pub stats: BankStats,
    pub alert_form: NewAlert,
}

impl BankModel {
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    pub fn active_alerts(&self) -> usize {
        self.alerts.len()
    }

    pub fn available_donors(&self) -> u32 {
        self.stats.available_donors
    }
}

#[derive(Clone, Debug)]
pub struct BankDashboard<T, S, C> {
    client: ApiClient<T>,
    lifecycle: Lifecycle<S, C>,
}

impl<T, S, C> BankDashboard<T, S, C>
where
    T: Transport,
    S: KeyValueStore,
    C: ViewCell<Model = BankModel>,
{
    pub fn new(client: ApiClient<T>, lifecycle: Lifecycle<S, C>) -> Self {
        Self { client, lifecycle }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, C> {
        &self.lifecycle
    }

    pub async fn load(&self) -> bool {
        let session = self.lifecycle.session();
        let fetch = try_join3(
            self.client.bank_requests(session),
            self.client.bank_alerts(session),
            self.client.bank_stats(session),
        );
        self.lifecycle
            .load(fetch, |model, (requests, alerts, stats)| {
                model.requests = requests;
                model.alerts = alerts;
                model.stats = stats;
            })
            .await
    }

    pub fn edit_alert_form(&self, edit: impl FnOnce(&mut NewAlert)) {
        self.lifecycle
            .cell()
            .update(|view| edit(&mut view.model.alert_form));
    }

    /// Mark a request processed and drop it from the pending list.
    pub async fn process_request(&self, request_id: i64) -> Result<(), MutationError> {
        self.lifecycle
            .mutate(
                Reconcile::Pessimistic,
                self.client
                    .process_request(self.lifecycle.session(), request_id),
                |model, _| model.requests.retain(|r| r.id != request_id),
                PROCESS_FAILED,
            )
            .await?;
        self.lifecycle.notify(
            NoticeLevel::Success,
            format!("Request {request_id} successfully marked as processed."),
        );
        Ok(())
    }

    /// Broadcast an alert from the form and append the server's copy.
    pub async fn create_alert(&self) -> Result<DonorAlert, MutationError> {
        let alert = self
            .lifecycle
            .cell()
            .snapshot()
            .model
            .alert_form
            .normalized();

        let created = self
            .lifecycle
            .mutate_with(
                Reconcile::Pessimistic,
                self.client.create_alert(self.lifecycle.session(), &alert),
                |model, created| {
                    if let Some(created) = created {
                        model.alerts.push(created.clone());
                    }
                    model.alert_form = NewAlert::default();
                },
                |err| {
                    let reason = err
                        .server_message()
                        .unwrap_or_else(|| CREATE_HINT.to_string());
                    format!("{CREATE_FAILED}: {reason}")
                },
            )
            .await?;

        self.lifecycle.notify(
            NoticeLevel::Success,
            format!("Alert for {} broadcast successfully!", alert.blood_group),
        );
        Ok(created)
    }

    /// Deactivate the alert for `blood_group`.
    pub async fn close_alert(&self, blood_group: BloodGroup) -> Result<(), MutationError> {
        self.lifecycle
            .mutate_with(
                Reconcile::Pessimistic,
                self.client.close_alert(self.lifecycle.session(), blood_group),
                |model, _| model.alerts.retain(|a| a.blood_group != blood_group),
                |_| CLOSE_FAILED.to_string(),
            )
            .await?;
        self.lifecycle.notify(
            NoticeLevel::Success,
            format!("Alert for {blood_group} successfully deactivated."),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use store::{MemoryStore, Role};

    use super::*;
    use crate::client::{bank_alert_path, bank_request_path, BANK_ALERTS, BANK_REQUESTS, BANK_STATS};
    use crate::lifecycle::{Phase, Timing, ViewState};
    use crate::session::Session;
    use crate::test_support::{logged_in, ScriptedTransport};
    use crate::transport::Method;

    type Cell = Rc<RefCell<ViewState<BankModel>>>;

    fn dashboard(
        transport: &ScriptedTransport,
        session: Session<MemoryStore>,
    ) -> (BankDashboard<ScriptedTransport, MemoryStore, Cell>, Cell) {
        let cell: Cell = Rc::new(RefCell::new(ViewState::new(BankModel::default())));
        let lifecycle = Lifecycle::new(session, cell.clone(), Timing::default());
        (
            BankDashboard::new(ApiClient::new(transport.clone()), lifecycle),
            cell,
        )
    }

    fn seeded(transport: &ScriptedTransport) {
        transport
            .reply(
                Method::Get,
                BANK_REQUESTS,
                200,
                json!([
                    { "id": 3, "blood_group": "O-", "quantity": 4, "urgency": "Extremely Urgent", "hospital": "CHU" },
                    { "id": 4, "blood_group": "A+", "quantity": 1, "urgency": "Normal", "hospital": "CHU" },
                ]),
            )
            .reply(
                Method::Get,
                BANK_ALERTS,
                200,
                json!([{ "id": 8, "blood_group": "O-", "radius": 15, "duration": 12, "donor_count": 2 }]),
            )
            .reply(
                Method::Get,
                BANK_STATS,
                200,
                json!({ "available_donors": 41, "blood_groups": { "O-": 5 } }),
            );
    }

    #[tokio::test]
    async fn test_empty_reads_give_zero_counters() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Method::Get, BANK_REQUESTS, 200, json!(null))
            .reply(Method::Get, BANK_ALERTS, 200, json!([]))
            .reply(Method::Get, BANK_STATS, 200, json!(null));
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);

        assert!(dash.load().await);
        let state = cell.snapshot();
        assert!(!state.is_loading());
        assert_eq!(state.model.pending_requests(), 0);
        assert_eq!(state.model.active_alerts(), 0);
        assert_eq!(state.model.available_donors(), 0);
    }

    #[tokio::test]
    async fn test_load_counts() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);

        assert!(dash.load().await);
        let model = cell.snapshot().model;
        assert_eq!(model.pending_requests(), 2);
        assert_eq!(model.active_alerts(), 1);
        assert_eq!(model.available_donors(), 41);
    }

    #[tokio::test]
    async fn test_numeric_doctor_and_unknown_status_still_load() {
        let transport = ScriptedTransport::new();
        transport
            .reply(
                Method::Get,
                BANK_REQUESTS,
                200,
                json!([{
                    "id": 3, "blood_group": "O-", "quantity": 4, "urgency": "critical",
                    "hospital": "CHU", "doctor": 17, "status": "escalated"
                }]),
            )
            .reply(Method::Get, BANK_ALERTS, 200, json!([]))
            .reply(Method::Get, BANK_STATS, 200, json!({ "available_donors": 1 }));
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);

        assert!(dash.load().await);
        let state = cell.snapshot();
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.model.requests[0].doctor.as_deref(), Some("17"));
        assert_eq!(state.model.pending_requests(), 1);
    }

    #[tokio::test]
    async fn test_any_failed_read_shows_nothing() {
        let transport = ScriptedTransport::new();
        transport
            .reply(Method::Get, BANK_REQUESTS, 200, json!([]))
            .reply(Method::Get, BANK_ALERTS, 500, json!({ "detail": "db down" }))
            .reply(Method::Get, BANK_STATS, 200, json!({ "available_donors": 3 }));
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);

        assert!(!dash.load().await);
        let state = cell.snapshot();
        assert!(matches!(state.phase, Phase::Failed(_)));
        assert_eq!(state.model.available_donors(), 0);
    }

    #[tokio::test]
    async fn test_process_request_removes_after_confirmation() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.reply(Method::Patch, &bank_request_path(3), 200, json!({}));
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;

        dash.process_request(3).await.unwrap();
        let state = cell.snapshot();
        assert_eq!(state.model.pending_requests(), 1);
        assert_eq!(
            state.notice.unwrap().message,
            "Request 3 successfully marked as processed."
        );
        let patch = transport
            .sent()
            .into_iter()
            .find(|r| r.method == Method::Patch)
            .unwrap();
        assert_eq!(patch.body, Some(json!({ "status": "processed" })));
    }

    #[tokio::test]
    async fn test_process_failure_keeps_request() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.fail(Method::Patch, &bank_request_path(4));
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;

        assert!(dash.process_request(4).await.is_err());
        let state = cell.snapshot();
        assert_eq!(state.model.pending_requests(), 2);
        assert_eq!(state.notice.unwrap().message, PROCESS_FAILED);
    }

    #[tokio::test]
    async fn test_create_alert_appends_server_copy() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.reply(
            Method::Post,
            BANK_ALERTS,
            201,
            json!({ "id": 9, "blood_group": "AB-", "radius": 1, "duration": 6, "donor_count": 0 }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;

        dash.edit_alert_form(|form| {
            form.blood_group = BloodGroup::AbNegative;
            form.radius = 0;
            form.duration = 6;
        });
        let created = dash.create_alert().await.unwrap();
        assert_eq!(created.id, Some(9));

        let state = cell.snapshot();
        assert_eq!(state.model.active_alerts(), 2);
        assert_eq!(state.model.alert_form, NewAlert::default());
        assert_eq!(
            state.notice.unwrap().message,
            "Alert for AB- broadcast successfully!"
        );
        let post = transport
            .sent()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(
            post.body,
            Some(json!({ "blood_group": "AB-", "radius": 1, "duration": 6 }))
        );
    }

    #[tokio::test]
    async fn test_duplicate_alert_reports_server_reason() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.reply(
            Method::Post,
            BANK_ALERTS,
            400,
            json!({ "non_field_errors": ["An active alert already exists for O-."] }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;
        dash.edit_alert_form(|form| form.blood_group = BloodGroup::ONegative);

        assert!(dash.create_alert().await.is_err());
        let state = cell.snapshot();
        assert_eq!(state.model.active_alerts(), 1);
        assert_eq!(
            state.notice.unwrap().message,
            "Failed to create the alert: An active alert already exists for O-."
        );
    }

    #[tokio::test]
    async fn test_close_alert_by_group() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.reply(
            Method::Delete,
            &bank_alert_path(BloodGroup::ONegative),
            204,
            json!(null),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;

        dash.close_alert(BloodGroup::ONegative).await.unwrap();
        let state = cell.snapshot();
        assert_eq!(state.model.active_alerts(), 0);
        assert_eq!(
            state.notice.unwrap().message,
            "Alert for O- successfully deactivated."
        );
    }

    #[tokio::test]
    async fn test_expired_session_on_close_redirects() {
        let transport = ScriptedTransport::new();
        seeded(&transport);
        transport.reply(
            Method::Delete,
            &bank_alert_path(BloodGroup::ONegative),
            403,
            json!({ "detail": "Authentication credentials were not provided." }),
        );
        let (dash, cell) = dashboard(&transport, logged_in(Role::BloodBank).await);
        dash.load().await;

        assert!(dash.close_alert(BloodGroup::ONegative).await.is_err());
        assert!(!dash.lifecycle().session().is_authenticated().await);
        let state = cell.snapshot();
        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.redirect.unwrap().to, "/auth");
        assert_eq!(state.model.active_alerts(), 1);
    }
}
