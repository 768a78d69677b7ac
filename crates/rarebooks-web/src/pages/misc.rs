//! Static pages.

use leptos::prelude::*;

use crate::routes::HOME;
use crate::state::use_app;

#[component]
pub fn SubscribePage() -> impl IntoView {
    let messages = use_app().messages();

    view! {
        <section class="subscribe">
            <h2>{messages.subscribe_title}</h2>
            <p>{messages.subscribe_text}</p>
        </section>
    }
}

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
    let ctx = use_app();
    let messages = ctx.messages();
    let home = ctx.config.with_value(|c| c.title.clone());

    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>{messages.not_found}</p>
            <a href=HOME>{home}</a>
        </div>
    }
}
