//! Teaser shown instead of a gated result list.

use leptos::prelude::*;
use rarebooks_search::Teaser;

use crate::state::use_app;

#[component]
pub fn TeaserView(teaser: Teaser) -> impl IntoView {
    let messages = use_app().messages();
    let headline = teaser.headline(&messages);

    view! {
        <section class="teaser">
            <h3>{headline}</h3>
            <ul class="teaser-titles">
                {teaser
                    .sample_titles
                    .into_iter()
                    .map(|title| view! { <li>{title}</li> })
                    .collect::<Vec<_>>()}
            </ul>
            <p class="hint">{messages.teaser_hint.clone()}</p>
            <a href=teaser.subscribe_href class="btn">
                {messages.subscribe.clone()}
            </a>
        </section>
    }
}
