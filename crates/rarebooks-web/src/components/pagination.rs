//! Previous/next and numbered page controls.

use leptos::prelude::*;
use rarebooks_catalog::Pagination;

use crate::state::use_app;

/// Page controls. Clicking the current page or a disabled arrow does nothing.
#[component]
pub fn PaginationControls(
    pagination: Pagination,
    on_page: Callback<u32>,
    #[prop(default = 7)] max_visible: usize,
) -> impl IntoView {
    let messages = use_app().messages();
    let current = pagination.current();

    let prev = pagination.prev();
    let next = pagination.next();

    view! {
        <nav class="pagination">
            <button
                class="page-prev"
                disabled=prev.is_none()
                on:click=move |_| {
                    if let Some(page) = prev {
                        on_page.run(page);
                    }
                }
            >
                {messages.previous_page.clone()}
            </button>
            {pagination
                .page_numbers(max_visible)
                .into_iter()
                .map(|page| {
                    let is_current = page == current;
                    view! {
                        <button
                            class="page-number"
                            class:current=is_current
                            aria-current=is_current.then_some("page")
                            on:click=move |_| {
                                if !is_current {
                                    on_page.run(page);
                                }
                            }
                        >
                            {page.to_string()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
            <button
                class="page-next"
                disabled=next.is_none()
                on:click=move |_| {
                    if let Some(page) = next {
                        on_page.run(page);
                    }
                }
            >
                {messages.next_page.clone()}
            </button>
        </nav>
    }
}
