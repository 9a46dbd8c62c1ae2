//! # Session-scoped view lifecycle
//!
//! Every dashboard follows the same pattern: check the credential, load one
//! or more collections, render, then accept user actions that each issue a
//! single mutating call. [`Lifecycle`] implements that pattern once.
//!
//! ## States
//!
//! ```text
//! Unauthenticated ──► Loading ──► Ready ◄──► Mutating
//!        ▲               │          │            │
//!        └───────────────┴── 401/403 ────────────┘
//!                        └──► Failed(message)
//! ```
//!
//! `Ready` is the only phase in which [`Lifecycle::mutate`] accepts work;
//! anything else yields [`MutationError::NotReady`] without touching the
//! network. That is also what the views use to disable their controls.
//!
//! ## Reconciliation
//!
//! [`Reconcile`] is chosen per action. `Optimistic` applies the change before
//! the call and restores the previous model if it fails. `Pessimistic` applies
//! it only after the server confirmed, with the server's response at hand.
//!
//! ## State holders
//!
//! The engine never owns view state. It reads and writes through
//! [`ViewCell`], so the same code drives a Dioxus signal in the browser and a
//! plain `Rc<RefCell<_>>` in tests. Writes happen before each await, which is
//! what makes an optimistic change visible while the request is in flight.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use store::{ClientConfig, KeyValueStore};
use thiserror::Error;

use crate::error::ApiError;
use crate::session::Session;

pub const LOAD_FAILED: &str = "Failed to reach the server. Please try again later.";
pub const SESSION_EXPIRED: &str = "Session expired. Redirecting to login...";

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Unauthenticated,
    Loading,
    Ready,
    Mutating,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient message that disappears after `expires_after`.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub expires_after: Duration,
    /// Distinguishes this notice from a later one with the same text.
    pub seq: u64,
}

/// Navigation the view should perform once `after` has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconcile {
    Optimistic,
    Pessimistic,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("view is not ready for another action")]
    NotReady,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything a view renders from.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<M> {
    pub phase: Phase,
    pub model: M,
    pub notice: Option<Notice>,
    pub redirect: Option<Redirect>,
    next_seq: u64,
}

impl<M> ViewState<M> {
    /// Fresh view, waiting for its first load.
    pub fn new(model: M) -> Self {
        Self {
            phase: Phase::Loading,
            model,
            notice: None,
            redirect: None,
            next_seq: 0,
        }
    }

    /// View with nothing to load (forms).
    pub fn ready(model: M) -> Self {
        Self {
            phase: Phase::Ready,
            ..Self::new(model)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether user actions are currently accepted.
    pub fn accepts_actions(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn show(&mut self, level: NoticeLevel, message: impl Into<String>, expires_after: Duration) {
        self.next_seq += 1;
        self.notice = Some(Notice {
            level,
            message: message.into(),
            expires_after,
            seq: self.next_seq,
        });
    }

    /// Clear the notice if it is still the one identified by `seq`.
    pub fn expire_notice(&mut self, seq: u64) {
        if self.notice.as_ref().is_some_and(|n| n.seq == seq) {
            self.notice = None;
        }
    }
}

/// Holder of a [`ViewState`] the engine can read and write.
pub trait ViewCell {
    type Model: Clone;

    fn snapshot(&self) -> ViewState<Self::Model>;
    fn update<R>(&self, f: impl FnOnce(&mut ViewState<Self::Model>) -> R) -> R;
}

impl<M: Clone> ViewCell for Rc<RefCell<ViewState<M>>> {
    type Model = M;

    fn snapshot(&self) -> ViewState<M> {
        self.borrow().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState<M>) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Delays and destinations, resolved from [`ClientConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    pub login_path: String,
    pub redirect_delay: Duration,
    pub info: Duration,
    pub success: Duration,
    pub failure: Duration,
    pub auth: Duration,
}

impl Timing {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            login_path: config.session.login_path.clone(),
            redirect_delay: config.redirect_delay(),
            info: Duration::from_millis(config.notices.info_ms),
            success: Duration::from_millis(config.notices.success_ms),
            failure: Duration::from_millis(config.notices.failure_ms),
            auth: Duration::from_millis(config.notices.auth_ms),
        }
    }

    /// Login and registration keep every message on screen for the auth window.
    pub fn for_auth(&self) -> Self {
        Self {
            success: self.auth,
            failure: self.auth,
            ..self.clone()
        }
    }

    fn duration(&self, level: NoticeLevel) -> Duration {
        match level {
            NoticeLevel::Info => self.info,
            NoticeLevel::Success => self.success,
            NoticeLevel::Error => self.failure,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// Drives one view through its phases.
#[derive(Clone, Debug)]
pub struct Lifecycle<S, C> {
    session: Session<S>,
    cell: C,
    timing: Timing,
}

impl<S: KeyValueStore, C: ViewCell> Lifecycle<S, C> {
    pub fn new(session: Session<S>, cell: C, timing: Timing) -> Self {
        Self {
            session,
            cell,
            timing,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Initial load. `fetch` is only polled when a credential is present.
    ///
    /// Results are applied all at once on success; on failure the model is
    /// left untouched. Returns whether the view reached `Ready`.
    pub async fn load<R, F>(&self, fetch: F, apply: impl FnOnce(&mut C::Model, R)) -> bool
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        if !self.session.is_authenticated().await {
            self.sign_out();
            return false;
        }
        self.cell.update(|view| view.phase = Phase::Loading);

        match fetch.await {
            Ok(data) => {
                self.cell.update(|view| {
                    apply(&mut view.model, data);
                    view.phase = Phase::Ready;
                });
                true
            }
            Err(err) if err.is_unauthorized() => {
                self.session.invalidate().await;
                self.sign_out();
                false
            }
            Err(err) => {
                tracing::error!("initial load failed: {err}");
                self.cell
                    .update(|view| view.phase = Phase::Failed(LOAD_FAILED.to_string()));
                false
            }
        }
    }

    /// Re-read data for a view that is already showing. The phase is kept;
    /// a failure only raises a notice.
    pub async fn refresh<R, F>(
        &self,
        fetch: F,
        apply: impl FnOnce(&mut C::Model, R),
        failure: &str,
    ) -> bool
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        if !self.session.is_authenticated().await {
            self.sign_out();
            return false;
        }
        match fetch.await {
            Ok(data) => {
                self.cell.update(|view| apply(&mut view.model, data));
                true
            }
            Err(err) => {
                self.reject(&err, failure.to_string()).await;
                false
            }
        }
    }

    /// Run one mutating call under the given reconciliation policy.
    ///
    /// `apply` receives `None` when applied optimistically and the server's
    /// response when applied pessimistically. On failure, the message shown is
    /// `"{failure}: {server message}"` when the server explained itself, and
    /// `failure` otherwise.
    pub async fn mutate<R, F>(
        &self,
        policy: Reconcile,
        call: F,
        apply: impl FnOnce(&mut C::Model, Option<&R>),
        failure: &str,
    ) -> Result<R, MutationError>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        self.mutate_with(policy, call, apply, |err| match err.server_message() {
            Some(reason) => format!("{failure}: {reason}"),
            None => failure.to_string(),
        })
        .await
    }

    /// [`mutate`](Self::mutate) with a caller-built failure message.
    pub async fn mutate_with<R, F>(
        &self,
        policy: Reconcile,
        call: F,
        apply: impl FnOnce(&mut C::Model, Option<&R>),
        describe: impl FnOnce(&ApiError) -> String,
    ) -> Result<R, MutationError>
    where
        F: Future<Output = Result<R, ApiError>>,
    {
        let optimistic = policy == Reconcile::Optimistic;
        let mut pending = Some(apply);

        let accepted = self.cell.update(|view| {
            if !view.accepts_actions() {
                return None;
            }
            view.phase = Phase::Mutating;
            let prior = optimistic.then(|| view.model.clone());
            if optimistic {
                if let Some(apply) = pending.take() {
                    apply(&mut view.model, None);
                }
            }
            Some(prior)
        });
        let Some(prior) = accepted else {
            return Err(MutationError::NotReady);
        };

        match call.await {
            Ok(response) => {
                self.cell.update(|view| {
                    if let Some(apply) = pending.take() {
                        apply(&mut view.model, Some(&response));
                    }
                    if view.phase == Phase::Mutating {
                        view.phase = Phase::Ready;
                    }
                });
                Ok(response)
            }
            Err(err) => {
                if let Some(prior) = prior {
                    self.cell.update(|view| view.model = prior);
                }
                let message = describe(&err);
                self.reject(&err, message).await;
                Err(MutationError::Api(err))
            }
        }
    }

    /// Show a notice with the configured expiry for its level.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let expires_after = self.timing.duration(level);
        self.cell
            .update(|view| view.show(level, message, expires_after));
    }

    /// Forget the credential and leave for the login view right away.
    pub async fn logout(&self) {
        self.session.invalidate().await;
        let redirect = Redirect {
            to: self.timing.login_path.clone(),
            after: Duration::ZERO,
        };
        self.cell.update(|view| {
            view.phase = Phase::Unauthenticated;
            view.redirect = Some(redirect);
        });
    }

    /// Schedule navigation after the configured delay.
    pub fn redirect(&self, to: impl Into<String>) {
        let redirect = Redirect {
            to: to.into(),
            after: self.timing.redirect_delay,
        };
        self.cell.update(|view| view.redirect = Some(redirect));
    }

    async fn reject(&self, err: &ApiError, message: String) {
        if err.is_unauthorized() {
            self.session.invalidate().await;
            self.sign_out();
            return;
        }
        tracing::error!("{message} ({err})");
        let expires_after = self.timing.failure;
        self.cell.update(|view| {
            if view.phase == Phase::Mutating {
                view.phase = Phase::Ready;
            }
            view.show(NoticeLevel::Error, message, expires_after);
        });
    }

    fn sign_out(&self) {
        let redirect = Redirect {
            to: self.timing.login_path.clone(),
            after: self.timing.redirect_delay,
        };
        let expires_after = self.timing.redirect_delay;
        self.cell.update(|view| {
            view.phase = Phase::Unauthenticated;
            view.redirect = Some(redirect);
            view.show(NoticeLevel::Error, SESSION_EXPIRED, expires_after);
        });
    }
}
