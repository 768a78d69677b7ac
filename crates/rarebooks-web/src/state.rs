//! Application context shared by every page.

use chrono::Utc;
use leptos::prelude::*;
use rarebooks_auth::{LoginResponse, Session, TokenStore};
use rarebooks_data::FetchClient;
use rarebooks_search::{ApiError, HttpSearchApi, Location, Messages};
use std::rc::Rc;
use tracing::warn;

use crate::config::AppConfig;

/// Where the user came from before opening a book, so "back" returns to the
/// same result page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub origin: Option<Location>,
}

impl NavState {
    pub fn back_href(&self, fallback: &str) -> String {
        self.origin
            .as_ref()
            .map(Location::href)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    pub session: RwSignal<Session>,
    pub nav: RwSignal<NavState>,
    store: StoredValue<Rc<dyn TokenStore>, LocalStorage>,
}

impl AppContext {
    /// Build the context, restoring the persisted session.
    pub fn new(config: AppConfig, store: Rc<dyn TokenStore>) -> Self {
        let session = Session::restore(store.as_ref(), Utc::now());
        Self {
            config: StoredValue::new(config),
            session: RwSignal::new(session),
            nav: RwSignal::new(NavState::default()),
            store: StoredValue::new_local(store),
        }
    }

    /// API client carrying the current bearer token, if still valid.
    pub fn api(&self) -> HttpSearchApi {
        let base_url = self.config.with_value(|c| c.api_base_url.clone());
        let token = self
            .session
            .with_untracked(|s| s.active_token(Utc::now()).cloned());
        HttpSearchApi::new(FetchClient::new().with_base_url(base_url)).with_token(token)
    }

    pub fn messages(&self) -> Messages {
        self.config.with_value(|c| c.messages.clone())
    }

    pub fn subscribe_href(&self) -> String {
        self.config.with_value(|c| c.subscribe_path.clone())
    }

    pub fn sign_in(&self, response: LoginResponse) {
        let store = self.store.get_value();
        self.session.update(|session| {
            if let Err(e) = session.sign_in(store.as_ref(), response) {
                warn!(error = %e, "failed to persist session");
            }
        });
    }

    pub fn sign_out(&self) {
        let store = self.store.get_value();
        self.session.update(|session| {
            if let Err(e) = session.sign_out(store.as_ref()) {
                warn!(error = %e, "failed to clear session");
            }
        });
    }

    /// Drop the session when the API refused the token or it expired.
    pub fn handle_api_error(&self, error: &ApiError) {
        let store = self.store.get_value();
        if error.is_unauthorized() {
            self.session
                .update(|session| session.invalidate(store.as_ref()));
        } else if self
            .session
            .with_untracked(|s| s.token().is_some_and(|t| t.is_expired_at(Utc::now())))
        {
            self.session
                .update(|session| {
                    session.check_expiry(store.as_ref(), Utc::now());
                });
        }
    }
}

pub fn provide_app_context(context: AppContext) {
    provide_context(context);
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
