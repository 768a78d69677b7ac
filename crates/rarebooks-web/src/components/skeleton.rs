//! Loading placeholders.

use leptos::prelude::*;

#[component]
pub fn ListSkeleton(#[prop(default = 3)] rows: usize) -> impl IntoView {
    view! {
        <ul class="book-list skeleton">
            {(0..rows)
                .map(|_| {
                    view! {
                        <li class="book-card">
                            <div class="thumb"></div>
                            <div class="book-info">
                                <div class="skeleton-line wide"></div>
                                <div class="skeleton-line"></div>
                            </div>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
}
