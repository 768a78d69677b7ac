//! Category listing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use rarebooks_catalog::{sort_by_name, Category};
use rarebooks_search::messages::fill;
use rarebooks_search::SearchApi;
use tracing::warn;

use super::Loaded;
use crate::components::ListSkeleton;
use crate::routes::category_href;
use crate::state::use_app;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let ctx = use_app();
    let messages = StoredValue::new(ctx.messages());
    let categories = RwSignal::new(Loaded::<Vec<Category>>::Pending);

    let api = ctx.api();
    spawn_local(async move {
        let loaded = match api.categories().await {
            Ok(mut list) => {
                sort_by_name(&mut list);
                Loaded::Ready(list)
            }
            Err(e) => {
                warn!(error = %e, "failed to load categories");
                ctx.handle_api_error(&e);
                Loaded::Failed
            }
        };
        categories.try_set(loaded);
    });

    view! {
        <h2>{messages.with_value(|m| m.categories_title.clone())}</h2>
        {move || match categories.get() {
            Loaded::Pending => view! { <ListSkeleton/> }.into_any(),
            Loaded::Failed => view! {
                <p class="notice error">{messages.with_value(|m| m.categories_failed.clone())}</p>
            }
            .into_any(),
            Loaded::Ready(list) => view! {
                <ul class="categories">
                    {list
                        .into_iter()
                        .map(|category| {
                            let count = category.book_count.map(|count| {
                                messages.with_value(|m| fill(&m.category_books, &[("count", &count)]))
                            });
                            let description = category.description_text().map(str::to_string);
                            view! {
                                <li class="category">
                                    <a href=category_href(category.id)>
                                        <h3>{category.name}</h3>
                                    </a>
                                    {description.map(|text| view! { <p>{text}</p> })}
                                    {count.map(|text| view! { <span class="count">{text}</span> })}
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ul>
            }
            .into_any(),
        }}
    }
}
