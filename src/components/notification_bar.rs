//! Notification Bar Component
//!
//! Stack of transient messages pushed through `AppContext::notify`.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NotificationBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="notification-container">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() on:click=move |_| ctx.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
