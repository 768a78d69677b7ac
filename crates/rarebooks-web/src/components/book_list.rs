//! Result list with lazily loaded thumbnails.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;
use rarebooks_catalog::{BookId, BookSummary, UrlQuery};
use rarebooks_search::{load_thumbnails, Location, ThumbnailCache, ThumbnailUpdate};
use std::collections::HashMap;

use crate::browser::PlatformImageFactory;
use crate::routes::book_href;
use crate::state::use_app;

/// One card per book. Thumbnails load concurrently once mounted and are
/// discarded when the list unmounts.
#[component]
pub fn BookList(items: Vec<BookSummary>) -> impl IntoView {
    let ctx = use_app();
    let messages = ctx.messages();

    let thumbnails = RwSignal::new(HashMap::<BookId, String>::new());
    let warning = RwSignal::new(false);
    let cache = StoredValue::new_local(ThumbnailCache::new(PlatformImageFactory::default()));

    let requests = cache
        .try_update_value(|c| c.refresh(&items))
        .unwrap_or_default();
    if !requests.is_empty() {
        let api = ctx.api();
        spawn_local(async move {
            load_thumbnails(&api, requests, |request, result| {
                let applied = cache.try_update_value(|c| {
                    let update = c.complete(&request, result);
                    (update, c.get(request.book_id).cloned())
                });
                match applied {
                    Some((ThumbnailUpdate::Loaded, Some(src))) => {
                        thumbnails.try_update(|map| map.insert(request.book_id, src));
                    }
                    Some((ThumbnailUpdate::Failed { first: true }, _)) => {
                        warning.try_set(true);
                    }
                    _ => {}
                }
            })
            .await;
        });
    }

    on_cleanup(move || {
        cache.try_update_value(|c| c.unmount());
    });

    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);
    let remember_origin = move || {
        let origin = Location::new(
            pathname.get_untracked(),
            UrlQuery::parse(&search.get_untracked()),
        );
        ctx.nav.update(|nav| nav.origin = Some(origin));
    };

    view! {
        <Show when=move || warning.get()>
            <p class="notice">{messages.previews_unavailable.clone()}</p>
        </Show>
        <ul class="book-list">
            {items
                .into_iter()
                .map(|book| {
                    let id = book.id;
                    let href = book_href(id);
                    let price = book.price_display();
                    let date = book.date_display();
                    view! {
                        <li class="book-card">
                            <div class="thumb">
                                {move || {
                                    thumbnails
                                        .with(|map| map.get(&id).cloned())
                                        .map(|src| view! { <img src=src alt=""/> })
                                }}
                            </div>
                            <div class="book-info">
                                <a href=href on:click=move |_| remember_origin()>
                                    <h3>{book.title}</h3>
                                </a>
                                <p class="price">{price}</p>
                                <p class="meta">{book.seller_name} " · " {date} " · " {book.book_type}</p>
                            </div>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
}
