//! Sign-in form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use rarebooks_auth::{AuthError, Credentials};
use rarebooks_search::{ApiError, SearchApi};
use tracing::{info, warn};

use crate::routes::HOME;
use crate::state::use_app;

/// Which message a failed sign-in shows.
fn login_error_message(error: &ApiError) -> LoginError {
    match error {
        ApiError::Auth(AuthError::InvalidCredentials | AuthError::InvalidInput(_)) => {
            LoginError::Rejected
        }
        _ => LoginError::Unavailable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginError {
    Rejected,
    Unavailable,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let messages = StoredValue::new(ctx.messages());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let failure = RwSignal::new(None::<LoginError>);
    let navigate = StoredValue::new_local(use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        if credentials.validate().is_err() {
            failure.set(Some(LoginError::Rejected));
            return;
        }

        pending.set(true);
        failure.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match api.login(&credentials).await {
                Ok(response) => {
                    info!(user = %response.user.id, "signed in");
                    ctx.sign_in(response);
                    password.try_set(String::new());
                    navigate.try_with_value(|navigate| navigate(HOME, NavigateOptions::default()));
                }
                Err(e) => {
                    warn!(error = %e, "sign-in failed");
                    failure.try_set(Some(login_error_message(&e)));
                }
            }
            pending.try_set(false);
        });
    };

    let error_text = move || {
        failure.get().map(|kind| {
            let text = messages.with_value(|m| match kind {
                LoginError::Rejected => m.invalid_credentials.clone(),
                LoginError::Unavailable => m.login_failed.clone(),
            });
            view! { <p class="notice error">{text}</p> }
        })
    };

    view! {
        <form class="login" on:submit=on_submit>
            <h2>{messages.with_value(|m| m.login_title.clone())}</h2>
            {error_text}
            <label>
                {messages.with_value(|m| m.email_label.clone())}
                <input
                    type="email"
                    autocomplete="username"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                {messages.with_value(|m| m.password_label.clone())}
                <input
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" disabled=move || pending.get()>
                {messages.with_value(|m| m.login_button.clone())}
            </button>
        </form>
    }
}
