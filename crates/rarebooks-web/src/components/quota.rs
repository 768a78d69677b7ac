//! Remaining-requests badge.

use leptos::prelude::*;
use rarebooks_catalog::Quota;
use rarebooks_search::messages::fill;

use crate::state::use_app;

/// Shown only while the API reports a finite quota.
#[component]
pub fn QuotaBadge(#[prop(into)] remaining: Signal<Quota>) -> impl IntoView {
    let messages = use_app().messages();

    move || {
        remaining.get().remaining().map(|count| {
            let text = fill(&messages.requests_left, &[("count", &count)]);
            view! { <span class="quota">{text}</span> }
        })
    }
}
