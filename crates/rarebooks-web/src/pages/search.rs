//! Search pages, one per mode, all driven by [`SearchController`].
//!
//! The route is the source of truth. Every change of path or query string
//! re-derives the query; if it differs from what the controller last asked
//! for, a new request starts. When it settles the address bar is replaced
//! with the canonical location (page included), which re-enters here as a
//! no-op.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate, use_params_map};
use leptos_router::NavigateOptions;
use rarebooks_catalog::{SearchQuery, TitleFilter, UrlQuery};
use rarebooks_search::{
    controller, CategorySearch, Gated, PriceRangeSearch, RequestTicket, SearchController,
    SearchMode, SearchStatus, SellerSearch, TitleSearch,
};
use std::rc::Rc;

use crate::components::{BookList, ListSkeleton, PaginationControls, QuotaBadge, TeaserView};
use crate::routes::decode_segment;
use crate::state::{use_app, AppContext};

type Navigate = Rc<dyn Fn(&str, NavigateOptions)>;

/// Controller of the mounted search page plus what it needs to run requests.
pub struct SearchHandle<M: SearchMode> {
    controller: RwSignal<Option<SearchController<M>>>,
    navigate: StoredValue<Navigate, LocalStorage>,
    ctx: AppContext,
}

impl<M: SearchMode> Clone for SearchHandle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: SearchMode> Copy for SearchHandle<M> {}

impl<M: SearchMode> SearchHandle<M> {
    fn new(ctx: AppContext) -> Self {
        let navigate = use_navigate();
        Self {
            controller: RwSignal::new(None),
            navigate: StoredValue::new_local(Rc::new(move |href: &str, options| {
                navigate(href, options)
            }) as Navigate),
            ctx,
        }
    }

    /// Start a request for `query` unless it is the one already shown.
    fn sync(self, query: SearchQuery<M::Filter>) {
        let stale = self
            .controller
            .with_untracked(|c| c.as_ref().map_or(true, |c| c.needs_fetch(&query)));
        if !stale {
            return;
        }

        let ticket = self.controller.try_update(|slot| match slot {
            Some(search) => search.begin(query),
            None => {
                let (search, ticket) = SearchController::mount(query);
                *slot = Some(search);
                ticket
            }
        });
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    /// Same filter, another page.
    pub fn go_to_page(self, page: u32) {
        let ticket = self
            .controller
            .try_update(|slot| slot.as_mut().map(|search| search.go_to_page(page)))
            .flatten();
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    /// New filter on the current page.
    pub fn navigate_filter(self, filter: M::Filter) {
        let ticket = self
            .controller
            .try_update(|slot| slot.as_mut().map(|search| search.navigate_filter(filter)))
            .flatten();
        if let Some(ticket) = ticket {
            self.run(ticket);
        }
    }

    pub fn filter(self) -> Option<M::Filter> {
        self.controller
            .with(|slot| slot.as_ref().map(|search| search.query().filter.clone()))
    }

    fn run(self, ticket: RequestTicket<M::Filter>) {
        let api = self.ctx.api();
        spawn_local(async move {
            let result = controller::fetch::<M>(&api, &ticket).await;
            if let Err(e) = &result {
                self.ctx.handle_api_error(e);
            }

            let location = self
                .controller
                .try_update(|slot| slot.as_mut().and_then(|search| search.settle(ticket, result)))
                .flatten();
            if let Some(location) = location {
                let href = location.href();
                self.navigate.try_with_value(|navigate| {
                    navigate(
                        &href,
                        NavigateOptions {
                            replace: true,
                            scroll: false,
                            ..Default::default()
                        },
                    )
                });
            }
        });
    }

    fn cancel(self) {
        self.controller.try_update_untracked(|slot| {
            if let Some(search) = slot {
                search.cancel();
            }
        });
    }
}

/// Shared shell of every search page. `controls` renders mode-specific
/// inputs above the results.
fn search_page<M, V>(controls: impl FnOnce(SearchHandle<M>) -> V) -> impl IntoView
where
    M: SearchMode,
    V: IntoView + 'static,
{
    let ctx = use_app();
    let messages = StoredValue::new(ctx.messages());
    let subscribe_href = ctx.subscribe_href();
    let max_visible = ctx.config.with_value(|c| c.max_visible_pages);
    let handle = SearchHandle::<M>::new(ctx);

    let params = use_params_map();
    let location = use_location();
    let query = Memo::new(move |_| {
        let segments: UrlQuery = params.with(|p| {
            M::SEGMENTS
                .iter()
                .filter_map(|key| p.get(key).map(|value| (*key, decode_segment(&value))))
                .collect()
        });
        let search = UrlQuery::parse(&location.search.get());
        M::query_from(&segments, &search).ok()
    });

    Effect::new(move |_| {
        if let Some(query) = query.get() {
            handle.sync(query);
        }
    });

    on_cleanup(move || handle.cancel());

    let status = Memo::new(move |_| {
        handle
            .controller
            .with(|slot| slot.as_ref().map(|search| search.status().clone()))
    });
    let remaining = Signal::derive(move || {
        handle
            .controller
            .with(|slot| slot.as_ref().map(|search| search.remaining()).unwrap_or_default())
    });
    let heading = move || {
        query.with(|q| {
            q.as_ref()
                .map(|q| messages.with_value(|m| M::heading(&q.filter, m)))
        })
    };
    let on_page = Callback::new(move |page: u32| handle.go_to_page(page));

    let results = move || {
        if query.with(Option::is_none) {
            return view! {
                <p class="notice error">{messages.with_value(|m| m.invalid_link.clone())}</p>
            }
            .into_any();
        }

        match status.get() {
            None | Some(SearchStatus::Idle) => view! { <ListSkeleton/> }.into_any(),
            Some(SearchStatus::Loading) => view! {
                <p class="notice">{messages.with_value(|m| m.loading.clone())}</p>
                <ListSkeleton/>
            }
            .into_any(),
            Some(SearchStatus::Empty) => view! {
                <p class="notice">{messages.with_value(|m| m.nothing_found.clone())}</p>
            }
            .into_any(),
            Some(SearchStatus::Failed) => view! {
                <p class="notice error">{messages.with_value(|m| m.search_failed.clone())}</p>
            }
            .into_any(),
            Some(SearchStatus::Full(_) | SearchStatus::Partial(_)) => {
                let (gated, pagination) = handle.controller.with_untracked(|slot| {
                    slot.as_ref()
                        .map(|search| (search.gated(&subscribe_href), search.pagination()))
                        .unwrap_or_default()
                });
                match (gated, pagination) {
                    (Some(Gated::List(page)), Some(pagination)) => view! {
                        <BookList items=page.items/>
                        <PaginationControls
                            pagination=pagination
                            on_page=on_page
                            max_visible=max_visible
                        />
                    }
                    .into_any(),
                    (Some(Gated::Teaser(teaser)), _) => view! { <TeaserView teaser=teaser/> }.into_any(),
                    _ => ().into_any(),
                }
            }
        }
    };

    view! {
        <section class=format!("search search-{}", M::NAME)>
            <header class="search-header">
                <h2>{heading}</h2>
                <QuotaBadge remaining=remaining/>
            </header>
            {controls(handle)}
            {results}
        </section>
    }
}

#[component]
pub fn TitleSearchPage() -> impl IntoView {
    search_page::<TitleSearch, _>(|handle| {
        let messages = use_app().messages();
        let checked = move || handle.filter().is_some_and(|f| f.exact_phrase);
        let toggle = move |ev: leptos::ev::Event| {
            let exact = event_target_checked(&ev);
            if let Some(filter) = handle.filter() {
                handle.navigate_filter(TitleFilter { exact_phrase: exact, ..filter });
            }
        };

        view! {
            <label class="exact-phrase">
                <input type="checkbox" prop:checked=checked on:change=toggle/>
                {messages.exact_phrase}
            </label>
        }
    })
}

#[component]
pub fn PriceSearchPage() -> impl IntoView {
    search_page::<PriceRangeSearch, _>(|_| ())
}

#[component]
pub fn SellerSearchPage() -> impl IntoView {
    search_page::<SellerSearch, _>(|_| ())
}

#[component]
pub fn CategorySearchPage() -> impl IntoView {
    search_page::<CategorySearch, _>(|_| ())
}
