use std::sync::Arc;

use onsite_domain::{Session, User};
use tracing::debug;

use crate::{
    storage::{load_state, save_state, KeyValueStore},
    CoreError,
};

pub const AUTH_STORE_KEY: &str = "auth-store";

/// Simulated login state, persisted under its own key. Every change is written immediately.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    session: Session,
}

impl SessionStore {
    pub fn hydrate(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, CoreError> {
        let key = key.into();
        let session = load_state::<Session>(storage.as_ref(), &key)?.unwrap_or_default();
        debug!(key = %key, authenticated = session.is_authenticated, "session restored");
        Ok(Self {
            storage,
            key,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }

    pub fn needs_onboarding(&self) -> bool {
        self.session.needs_onboarding
    }

    pub fn login(&mut self, user: User, needs_onboarding: bool) -> Result<(), CoreError> {
        debug!(user = %user.id, needs_onboarding, "login");
        self.session = Session::signed_in(user, needs_onboarding);
        self.persist()
    }

    pub fn demo_login(&mut self) -> Result<(), CoreError> {
        self.login(User::demo(), false)
    }

    pub fn logout(&mut self) -> Result<(), CoreError> {
        debug!("logout");
        self.session = Session::default();
        self.persist()
    }

    pub fn complete_onboarding(&mut self) -> Result<(), CoreError> {
        self.session.needs_onboarding = false;
        self.persist()
    }

    fn persist(&self) -> Result<(), CoreError> {
        save_state(self.storage.as_ref(), &self.key, &self.session)
    }
}
