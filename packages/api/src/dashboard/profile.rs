//! Profile pages: who is signed in, and the way out.

use store::{KeyValueStore, Role};

use crate::lifecycle::{Lifecycle, Phase, ViewCell};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileModel {
    pub role: Option<Role>,
}

#[derive(Clone, Debug)]
pub struct ProfileView<S, C> {
    lifecycle: Lifecycle<S, C>,
}

impl<S, C> ProfileView<S, C>
where
    S: KeyValueStore,
    C: ViewCell<Model = ProfileModel>,
{
    pub fn new(lifecycle: Lifecycle<S, C>) -> Self {
        Self { lifecycle }
    }

    pub fn lifecycle(&self) -> &Lifecycle<S, C> {
        &self.lifecycle
    }

    /// Read the stored role. Nothing goes over the network.
    pub async fn load(&self) -> bool {
        let Some(credential) = self.lifecycle.session().credential().await else {
            self.lifecycle.logout().await;
            return false;
        };
        self.lifecycle.cell().update(|view| {
            view.model.role = credential.role;
            view.phase = Phase::Ready;
        });
        true
    }

    pub async fn logout(&self) {
        tracing::info!("logged out");
        self.lifecycle.logout().await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::lifecycle::{Timing, ViewState};
    use crate::test_support::{logged_in, logged_out};

    type Cell = Rc<RefCell<ViewState<ProfileModel>>>;

    fn cell() -> Cell {
        Rc::new(RefCell::new(ViewState::new(ProfileModel::default())))
    }

    #[tokio::test]
    async fn test_profile_shows_stored_role() {
        let view = cell();
        let profile = ProfileView::new(Lifecycle::new(
            logged_in(Role::Doctor).await,
            view.clone(),
            Timing::default(),
        ));

        assert!(profile.load().await);
        assert_eq!(view.snapshot().model.role, Some(Role::Doctor));
        assert_eq!(view.snapshot().phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_logout_clears_and_leaves() {
        let view = cell();
        let profile = ProfileView::new(Lifecycle::new(
            logged_in(Role::Donor).await,
            view.clone(),
            Timing::default(),
        ));
        profile.load().await;

        profile.logout().await;
        assert!(!profile.lifecycle().session().is_authenticated().await);
        let state = view.snapshot();
        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.redirect.unwrap().to, "/auth");
    }

    #[tokio::test]
    async fn test_missing_credential_redirects() {
        let view = cell();
        let profile = ProfileView::new(Lifecycle::new(logged_out(), view.clone(), Timing::default()));

        assert!(!profile.load().await);
        assert_eq!(view.snapshot().phase, Phase::Unauthenticated);
    }
}
