//! Previous/next pager for the six-per-page listings.

use gateway::listing::PageInfo;
use leptos::prelude::*;

#[component]
pub fn Pagination(#[prop(into)] info: Signal<PageInfo>, on_page: Callback<usize>) -> impl IntoView {
    let on_prev = move |_| {
        let page = info.get_untracked();
        if page.has_previous() {
            on_page.run(page.page - 1);
        }
    };
    let on_next = move |_| {
        let page = info.get_untracked();
        if page.has_next() {
            on_page.run(page.page + 1);
        }
    };

    view! {
        <nav class="pagination">
            <button class="btn" on:click=on_prev disabled=move || !info.get().has_previous()>
                "Previous"
            </button>
            <span class="pagination__status">
                {move || {
                    let page = info.get();
                    format!("Page {} of {}", page.page, page.total_pages)
                }}
            </span>
            <button class="btn" on:click=on_next disabled=move || !info.get().has_next()>
                "Next"
            </button>
        </nav>
    }
}
