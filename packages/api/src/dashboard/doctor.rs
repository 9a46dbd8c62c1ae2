//! Doctor dashboard: request form and request history.

use store::KeyValueStore;
use thiserror::Error;

use crate::client::ApiClient;
use crate::lifecycle::{Lifecycle, MutationError, NoticeLevel, Reconcile, ViewCell};
use crate::models::{sort_newest_first, BloodRequest, FormError, RequestForm};
use crate::transport::Transport;

pub const SUBMIT_FAILED: &str = "Failed to submit request. Please check the data and try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctorModel {
    /// Newest first.
    pub requests: Vec<BloodRequest>,
    pub form: RequestForm,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

#[derive(Clone, Debug)]
pub struct DoctorDashboard<T, S, C> {
    client: ApiClient<T>,
    lifecycle: Lifecycle<S, C>,
}

impl<T, S, C> DoctorDashboard<T, S, C>
where
    T: Transport,
    S: KeyValueStore,
    C: ViewCell<Model = DoctorModel>,
{
    pub fn new(client: ApiClient<T>, lifecycle: Lifecycle<S, C>) -> Self {
        Self { client, lifecycle }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, C> {
        &self.lifecycle
    }

    pub async fn load(&self) -> bool {
        self.lifecycle
            .load(
                self.client.doctor_requests(self.lifecycle.session()),
                |model, mut requests| {
                    sort_newest_first(&mut requests);
                    model.requests = requests;
                },
            )
            .await
    }

    /// Edit the form in place.
    pub fn edit_form(&self, edit: impl FnOnce(&mut RequestForm)) {
        self.lifecycle
            .cell()
            .update(|view| edit(&mut view.model.form));
    }

    /// Validate the form and create the request. The history only changes
    /// once the server returned the created request.
    pub async fn submit(&self) -> Result<BloodRequest, SubmitError> {
        let form = self.lifecycle.cell().snapshot().model.form;
        let payload = match form.to_request() {
            Ok(payload) => payload,
            Err(err) => {
                self.lifecycle.notify(NoticeLevel::Error, err.to_string());
                return Err(err.into());
            }
        };

        let created = self
            .lifecycle
            .mutate_with(
                Reconcile::Pessimistic,
                self.client
                    .create_request(self.lifecycle.session(), &payload),
                |model, created| {
                    if let Some(created) = created {
                        model.requests.retain(|r| r.id != created.id);
                        model.requests.insert(0, created.clone());
                    }
                    model.form.reset();
                },
                |_| SUBMIT_FAILED.to_string(),
            )
            .await?;

        self.lifecycle.notify(
            NoticeLevel::Success,
            format!(
                "Request for {} sent successfully! Donors are being notified.",
                payload.blood_group
            ),
        );
        Ok(created)
    }
}
