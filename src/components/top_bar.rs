//! Top Bar Component
//!
//! Brand, navigation and the user menu.

use leptos::prelude::*;

use crate::context::{AppContext, View};

#[component]
pub fn TopBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (menu_open, set_menu_open) = signal(false);

    let initials = move || ctx.session.get().map(|s| s.initials()).unwrap_or_default();
    let username = move || ctx.session.get().map(|s| s.username).unwrap_or_default();

    view! {
        <header class="top-bar">
            <span class="brand" on:click=move |_| ctx.navigate(View::Forms)>"FlyForms"</span>
            <nav class="top-nav">
                <button type="button" class="nav-btn" on:click=move |_| ctx.navigate(View::Forms)>
                    "My forms"
                </button>
                <button type="button" class="nav-btn primary" on:click=move |_| ctx.navigate(View::Editor(None))>
                    "+ New form"
                </button>
            </nav>
            <div class="user-dropdown">
                <button
                    type="button"
                    class="user-dropdown-toggle"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    <span class="user-initials">{initials}</span>
                    <span class="user-name">{username}</span>
                </button>
                <Show when=move || menu_open.get()>
                    <div class="user-dropdown-menu active">
                        <button
                            type="button"
                            on:click=move |_| {
                                set_menu_open.set(false);
                                ctx.logout();
                            }
                        >
                            "Log out"
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
