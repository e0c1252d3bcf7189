//! Pagination Component
//!
//! Prev/next controls with a "page X of Y" label.

use leptos::prelude::*;

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let prev = move |_: leptos::ev::MouseEvent| {
        let p = page.get();
        if p > 1 {
            on_change.run(p - 1);
        }
    };
    let next = move |_: leptos::ev::MouseEvent| {
        let p = page.get();
        if p < total_pages.get() {
            on_change.run(p + 1);
        }
    };

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="pagination">
                <button type="button" class="page-btn" disabled=move || page.get() <= 1 on:click=prev>
                    "‹ Prev"
                </button>
                <span class="page-info">
                    {move || format!("Page {} of {}", page.get(), total_pages.get())}
                </span>
                <button
                    type="button"
                    class="page-btn"
                    disabled=move || page.get() >= total_pages.get()
                    on:click=next
                >
                    "Next ›"
                </button>
            </div>
        </Show>
    }
}
