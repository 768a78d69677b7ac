//! Book detail page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use rarebooks_catalog::{BookDetails, BookId, BookSummary};
use rarebooks_search::{load_thumbnails, SearchApi, ThumbnailCache, ThumbnailUpdate};
use tracing::warn;

use super::Loaded;
use crate::browser::PlatformImageFactory;
use crate::routes::CATEGORIES;
use crate::state::use_app;

#[component]
pub fn BookPage() -> impl IntoView {
    let ctx = use_app();
    let messages = StoredValue::new(ctx.messages());
    let params = use_params_map();
    let requested = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|raw| raw.parse::<BookId>().ok()))
    });
    let book = RwSignal::new(Loaded::<BookDetails>::Pending);

    Effect::new(move |_| {
        let Some(id) = requested.get() else {
            book.set(Loaded::Failed);
            return;
        };
        book.set(Loaded::Pending);
        let api = ctx.api();
        spawn_local(async move {
            let loaded = match api.book(id).await {
                Ok(details) => Loaded::Ready(details),
                Err(e) => {
                    warn!(book = %id, error = %e, "failed to load book");
                    ctx.handle_api_error(&e);
                    Loaded::Failed
                }
            };
            // A later id may have been requested meanwhile.
            if requested.try_get_untracked() == Some(Some(id)) {
                book.try_set(loaded);
            }
        });
    });

    let back_href = move || ctx.nav.with(|nav| nav.back_href(CATEGORIES));

    view! {
        <a href=back_href class="back">{messages.with_value(|m| m.back_to_results.clone())}</a>
        {move || match book.get() {
            Loaded::Pending => view! {
                <p class="notice">{messages.with_value(|m| m.loading.clone())}</p>
            }
            .into_any(),
            Loaded::Failed => view! {
                <p class="notice error">{messages.with_value(|m| m.book_failed.clone())}</p>
            }
            .into_any(),
            Loaded::Ready(details) => view! { <BookDetailView details=details/> }.into_any(),
        }}
    }
}

#[component]
fn BookDetailView(details: BookDetails) -> impl IntoView {
    let price = details.price_display();
    let date = details.date_display();
    let description = details.description_text().map(str::to_string);

    view! {
        <article class="book-detail">
            <BookCover book=BookSummary::from(&details)/>
            <div>
                <h1>{details.title}</h1>
                <p class="price">{price}</p>
                <p class="meta">{details.seller_name} " · " {date} " · " {details.book_type}</p>
                {description.map(|text| view! { <p class="description">{text}</p> })}
            </div>
        </article>
    }
}

/// First image of the book, loaded once and released on unmount.
#[component]
fn BookCover(book: BookSummary) -> impl IntoView {
    let ctx = use_app();
    let src = RwSignal::new(None::<String>);
    let cache = StoredValue::new_local(ThumbnailCache::new(PlatformImageFactory::default()));

    let requests = cache
        .try_update_value(|c| c.refresh(std::slice::from_ref(&book)))
        .unwrap_or_default();
    if !requests.is_empty() {
        let api = ctx.api();
        spawn_local(async move {
            load_thumbnails(&api, requests, |request, result| {
                let loaded = cache
                    .try_update_value(|c| match c.complete(&request, result) {
                        ThumbnailUpdate::Loaded => c.get(request.book_id).cloned(),
                        _ => None,
                    })
                    .flatten();
                if let Some(url) = loaded {
                    src.try_set(Some(url));
                }
            })
            .await;
        });
    }

    on_cleanup(move || {
        cache.try_update_value(|c| c.unmount());
    });

    view! {
        <div class="cover">
            {move || src.get().map(|src| view! { <img src=src alt=""/> })}
        </div>
    }
}
