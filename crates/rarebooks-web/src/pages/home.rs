//! Landing page with the three search forms.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::routes::{price_search_href, seller_search_href, title_search_href, CATEGORIES};
use crate::state::use_app;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app();
    let messages = ctx.messages();
    let title = ctx.config.with_value(|c| c.title.clone());
    let categories_title = messages.categories_title.clone();

    view! {
        <div class="hero">
            <h2>{title}</h2>
            <a href=CATEGORIES class="btn">{categories_title}</a>
        </div>
        <TitleSearchForm/>
        <PriceSearchForm/>
        <SellerSearchForm/>
    }
}

#[component]
fn TitleSearchForm() -> impl IntoView {
    let messages = use_app().messages();
    let title = RwSignal::new(String::new());
    let exact = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(href) = title_search_href(&title.get_untracked(), exact.get_untracked()) {
            navigate(&href, NavigateOptions::default());
        }
    };

    view! {
        <form class="search-form" on:submit=on_submit>
            <label>
                {messages.title_label}
                <input
                    type="search"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            <label class="exact-phrase">
                <input
                    type="checkbox"
                    prop:checked=move || exact.get()
                    on:change=move |ev| exact.set(event_target_checked(&ev))
                />
                {messages.exact_phrase}
            </label>
            <button type="submit">{messages.search_button}</button>
        </form>
    }
}

#[component]
fn PriceSearchForm() -> impl IntoView {
    let messages = use_app().messages();
    let min = RwSignal::new(String::new());
    let max = RwSignal::new(String::new());
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(href) = price_search_href(&min.get_untracked(), &max.get_untracked()) {
            navigate(&href, NavigateOptions::default());
        }
    };

    view! {
        <form class="search-form" on:submit=on_submit>
            <label>
                {messages.min_price_label}
                <input
                    type="number"
                    min="0"
                    prop:value=move || min.get()
                    on:input=move |ev| min.set(event_target_value(&ev))
                />
            </label>
            <label>
                {messages.max_price_label}
                <input
                    type="number"
                    min="0"
                    prop:value=move || max.get()
                    on:input=move |ev| max.set(event_target_value(&ev))
                />
            </label>
            <button type="submit">{messages.search_button}</button>
        </form>
    }
}

#[component]
fn SellerSearchForm() -> impl IntoView {
    let messages = use_app().messages();
    let seller = RwSignal::new(String::new());
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(href) = seller_search_href(&seller.get_untracked()) {
            navigate(&href, NavigateOptions::default());
        }
    };

    view! {
        <form class="search-form" on:submit=on_submit>
            <label>
                {messages.seller_label}
                <input
                    type="search"
                    prop:value=move || seller.get()
                    on:input=move |ev| seller.set(event_target_value(&ev))
                />
            </label>
            <button type="submit">{messages.search_button}</button>
        </form>
    }
}
