//! Session state.
//!
//! The session is an explicit value owned by the application shell and passed
//! to whoever needs the bearer token. Every transition that changes it also
//! updates the [`TokenStore`] so a reload sees the same state.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::store::{StoredSession, TokenStore};
use crate::{AuthError, AuthToken, LoginResponse, User};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { token: AuthToken, user: User },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Load the persisted session. Unreadable or expired entries are cleared
    /// and yield an anonymous session.
    pub fn restore(store: &dyn TokenStore, now: DateTime<Utc>) -> Self {
        match store.load() {
            Ok(Some(stored)) if stored.token.is_expired_at(now) => {
                info!(user_id = %stored.user.id, "stored session expired");
                clear_quietly(store);
                Self::anonymous()
            }
            Ok(Some(StoredSession { token, user })) => {
                debug!(user_id = %user.id, "session restored");
                Self {
                    state: SessionState::Authenticated { token, user },
                }
            }
            Ok(None) => Self::anonymous(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable stored session");
                clear_quietly(store);
                Self::anonymous()
            }
        }
    }

    /// Persist a successful login and switch to the authenticated state.
    pub fn sign_in(
        &mut self,
        store: &dyn TokenStore,
        response: LoginResponse,
    ) -> Result<(), AuthError> {
        let stored = StoredSession {
            token: response.token,
            user: response.user,
        };
        store.save(&stored)?;
        info!(user_id = %stored.user.id, "signed in");
        self.state = SessionState::Authenticated {
            token: stored.token,
            user: stored.user,
        };
        Ok(())
    }

    /// Drop the session. The in-memory state is cleared even if the store
    /// fails.
    pub fn sign_out(&mut self, store: &dyn TokenStore) -> Result<(), AuthError> {
        let was_authenticated = self.is_authenticated();
        self.state = SessionState::Anonymous;
        store.clear()?;
        if was_authenticated {
            info!("signed out");
        }
        Ok(())
    }

    /// Drop the session after the API rejected its token.
    pub fn invalidate(&mut self, store: &dyn TokenStore) {
        if self.is_authenticated() {
            warn!("session rejected by the API, signing out");
        }
        self.state = SessionState::Anonymous;
        clear_quietly(store);
    }

    /// Token to attach to requests, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    /// Token that has not passed its expiry at `now`.
    pub fn active_token(&self, now: DateTime<Utc>) -> Option<&AuthToken> {
        self.token().filter(|token| !token.is_expired_at(now))
    }

    /// Invalidate if the token has expired. Returns `true` when it did.
    pub fn check_expiry(&mut self, store: &dyn TokenStore, now: DateTime<Utc>) -> bool {
        let expired = self.token().is_some_and(|t| t.is_expired_at(now));
        if expired {
            info!("session expired");
            self.state = SessionState::Anonymous;
            clear_quietly(store);
        }
        expired
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }
}

fn clear_quietly(store: &dyn TokenStore) {
    if let Err(e) = store.clear() {
        warn!(error = %e, "failed to clear token store");
    }
}
