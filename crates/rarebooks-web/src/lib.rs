//! Browser client for the rare-books marketplace.
//!
//! - [`app`]: router, header and footer
//! - [`pages`]: search, categories, book details, sign-in
//! - [`components`]: result list, pagination, teaser
//! - [`state`]: application context (config, session, navigation origin)
//! - [`config`] / [`logging`]: embedded configuration and console logging

pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod state;

use rarebooks_auth::TokenStore;
use std::rc::Rc;
use tracing::{error, info};

use app::App;
use config::AppConfig;
use state::AppContext;

/// Token store for the current platform.
pub fn platform_token_store(config: &AppConfig) -> Rc<dyn TokenStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(browser::CookieTokenStore::new(
            config.session_cookie.clone(),
            config.session_days,
        ))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = config;
        Rc::new(rarebooks_auth::MemoryTokenStore::new())
    }
}

/// Configuration embedded at build time, or the defaults if it is invalid.
pub fn load_config() -> AppConfig {
    match AppConfig::embedded() {
        Ok(config) => config,
        Err(e) => {
            let config = AppConfig::default();
            let _ = logging::init(&config.logging);
            error!(error = %e, "invalid embedded config, using defaults");
            config
        }
    }
}

/// Entry point: install logging, restore the session and mount the app.
pub fn start() {
    console_error_panic_hook::set_once();

    let config = load_config();
    if let Err(e) = logging::init(&config.logging) {
        let _ = logging::init(&Default::default());
        error!(error = %e, "invalid logging config, using defaults");
    }
    info!(app = %config.name, api = %config.api_base_url, "starting");

    leptos::mount::mount_to_body(move || {
        let store = platform_token_store(&config);
        let context = AppContext::new(config.clone(), store);
        leptos::view! { <App context=context/> }
    });
}
