//! FlyForms Dashboard App
//!
//! Session, hash routing and the top-level view switch.

use gloo_timers::callback::Interval;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{FormEditor, FormsList, LoginPanel, NotificationBar, ResponseDetail, ResponsesList, TopBar};
use crate::config;
use crate::context::{AppContext, Notice, View};
use crate::session;

fn current_hash() -> String {
    web_sys::window()
        .and_then(|win| win.location().hash().ok())
        .unwrap_or_default()
}

fn ping_backend() {
    spawn_local(async {
        if !api::check_health().await {
            log::warn!("API health check failed");
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    // State
    let stored = session::load();
    let initial_view = if stored.is_some() { View::from_hash(&current_hash()) } else { View::Login };
    let (session, set_session) = signal(stored);
    let (view, set_view) = signal(initial_view);
    let (notices, set_notices) = signal(Vec::<Notice>::new());

    // Provide context to all children
    let ctx = AppContext::new((session, set_session), (view, set_view), (notices, set_notices));
    provide_context(ctx);

    // Back/forward and hand-edited URLs
    let on_hash = window_event_listener(ev::hashchange, move |_| {
        let next = View::from_hash(&current_hash());
        if view.get_untracked() != next {
            ctx.navigate(next);
        }
    });
    on_cleanup(move || on_hash.remove());

    // Wake the hosted API up and keep it awake
    ping_backend();
    let _ = Interval::new(config::KEEP_ALIVE_INTERVAL.as_millis() as u32, ping_backend).forget();

    view! {
        <NotificationBar />
        {move || match view.get() {
            View::Login => view! { <LoginPanel /> }.into_any(),
            other => view! {
                <div class="app-layout">
                    <TopBar />
                    <main class="main-content">
                        {match other {
                            View::Editor(id) => view! { <FormEditor form_id=id /> }.into_any(),
                            View::Responses(id) => view! { <ResponsesList form_id=id /> }.into_any(),
                            View::Response(form_id, id) => view! { <ResponseDetail form_id=form_id response_id=id /> }.into_any(),
                            _ => view! { <FormsList /> }.into_any(),
                        }}
                    </main>
                </div>
            }.into_any(),
        }}
    }
}
