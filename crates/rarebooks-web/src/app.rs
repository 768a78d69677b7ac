//! Application shell and routing.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{path, NavigateOptions};

use crate::pages::{
    BookPage, CategoriesPage, CategorySearchPage, HomePage, LoginPage, NotFound,
    PriceSearchPage, SellerSearchPage, SubscribePage, TitleSearchPage,
};
use crate::routes::{CATEGORIES, HOME, LOGIN};
use crate::state::{provide_app_context, use_app, AppContext};

#[component]
pub fn App(context: AppContext) -> impl IntoView {
    provide_meta_context();
    provide_app_context(context);

    let title = context.config.with_value(|c| c.title.clone());
    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Title text=title/>

        <Router>
            <Header/>
            <main>
                <Routes fallback>
                    <Route path=path!("") view=HomePage/>
                    <Route path=path!("/categories") view=CategoriesPage/>
                    <Route path=path!("/category/:id") view=CategorySearchPage/>
                    <Route path=path!("/search/title/:title") view=TitleSearchPage/>
                    <Route path=path!("/search/price/:min/:max") view=PriceSearchPage/>
                    <Route path=path!("/search/seller/:seller") view=SellerSearchPage/>
                    <Route path=path!("/book/:id") view=BookPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/subscribe") view=SubscribePage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

#[component]
fn Header() -> impl IntoView {
    let ctx = use_app();
    let messages = StoredValue::new(ctx.messages());
    let title = ctx.config.with_value(|c| c.title.clone());
    let navigate = StoredValue::new_local(use_navigate());

    let account = move || {
        ctx.session.with(|session| match session.user() {
            Some(user) => {
                let name = user.display_name().to_string();
                view! {
                    <span class="user">{name}</span>
                    <button
                        class="logout"
                        on:click=move |_| {
                            ctx.sign_out();
                            navigate.with_value(|navigate| navigate(HOME, NavigateOptions::default()));
                        }
                    >
                        {messages.with_value(|m| m.logout.clone())}
                    </button>
                }
                .into_any()
            }
            None => view! {
                <a href=LOGIN>{messages.with_value(|m| m.login_title.clone())}</a>
            }
            .into_any(),
        })
    };

    view! {
        <header>
            <h1><a href=HOME>{title}</a></h1>
            <nav>
                <a href=CATEGORIES>{messages.with_value(|m| m.categories_title.clone())}</a>
                {account}
            </nav>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let name = use_app().config.with_value(|c| c.name.clone());

    view! {
        <footer>
            <p>{name}</p>
        </footer>
    }
}
