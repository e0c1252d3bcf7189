//! Forms List Component
//!
//! The user's forms with search, status filter, sort and paging.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::components::{DashboardSummary, DeleteConfirmButton, Pagination};
use crate::config;
use crate::context::{AppContext, NoticeKind, View};
use crate::debounce::Debouncer;
use crate::listing::{clamp_page, display_date, page_slice, total_pages, FormFilter, SortOrder, StatusFilter};
use crate::models::Form;
use crate::store::{
    store_remove_form, store_set_filter, store_set_forms, store_toggle_form, FormsState, FormsStateStoreFields,
    FormsStore,
};

/// Public URL of a form
pub fn share_link(origin: &str, form_id: &str) -> String {
    format!("{}/{}?id={}", origin.trim_end_matches('/'), config::PUBLIC_FORM_PAGE, form_id)
}

async fn copy_to_clipboard(text: &str) -> bool {
    let Some(win) = web_sys::window() else { return false };
    JsFuture::from(win.navigator().clipboard().write_text(text)).await.is_ok()
}

#[component]
pub fn FormsList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = FormsStore::new(FormsState::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Load forms on mount and after server-side changes
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        let Some(token) = ctx.token() else { return };
        spawn_local(async move {
            match api::list_forms(&token).await {
                Ok(forms) => {
                    log::info!("loaded {} forms", forms.len());
                    store_set_forms(&store, forms);
                }
                Err(e) => {
                    *store.loading().write() = false;
                    ctx.report("Failed to load forms", &e);
                }
            }
        });
    });

    let visible = Memo::new(move |_| store.with(|s| s.visible()));
    let pages = Signal::derive(move || total_pages(visible.with(Vec::len), config::FORMS_PER_PAGE));
    let page = Signal::derive(move || store.page().get());
    let page_forms = move || page_slice(&visible.get(), page.get(), config::FORMS_PER_PAGE);

    // A delete can empty the last page
    Effect::new(move |_| {
        let last = pages.get();
        let current = store.page().get_untracked();
        let clamped = clamp_page(current, last);
        if clamped != current {
            *store.page().write() = clamped;
        }
    });

    let debouncer = Debouncer::new(config::SEARCH_DEBOUNCE_MS);
    let on_search = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        debouncer.call(move || {
            let filter = FormFilter { search: value, ..store.filter().get_untracked() };
            store_set_filter(&store, filter);
        });
    };

    let on_delete = Callback::new(move |id: String| {
        let Some(token) = ctx.token() else { return };
        spawn_local(async move {
            match api::delete_form(&token, &id).await {
                Ok(()) => {
                    store_remove_form(&store, &id);
                    ctx.notify(NoticeKind::Success, "Form deleted");
                }
                Err(e) => ctx.report("Failed to delete form", &e),
            }
        });
    });

    let on_toggle = Callback::new(move |id: String| {
        let Some(token) = ctx.token() else { return };
        spawn_local(async move {
            match api::toggle_form_status(&token, &id).await {
                Ok(()) => store_toggle_form(&store, &id),
                Err(e) => ctx.report("Failed to change form status", &e),
            }
        });
    });

    let on_duplicate = Callback::new(move |id: String| {
        let Some(token) = ctx.token() else { return };
        spawn_local(async move {
            match api::duplicate_form(&token, &id).await {
                Ok(()) => {
                    ctx.notify(NoticeKind::Success, "Form duplicated");
                    set_reload_trigger.update(|v| *v += 1);
                }
                Err(e) => ctx.report("Failed to duplicate form", &e),
            }
        });
    });

    view! {
        <section class="forms-page">
            <DashboardSummary forms=Signal::derive(move || store.forms().get()) />

            <div class="forms-toolbar">
                <input
                    type="search"
                    class="search-forms"
                    placeholder="Search forms..."
                    on:input=on_search
                />
                <select
                    class="status-filter"
                    on:change=move |ev| {
                        let status = StatusFilter::parse(&event_target_value(&ev));
                        store_set_filter(&store, FormFilter { status, ..store.filter().get_untracked() });
                    }
                >
                    <option value="all">"All forms"</option>
                    <option value="active">"Active"</option>
                    <option value="inactive">"Inactive"</option>
                </select>
                <select
                    class="sort-filter"
                    on:change=move |ev| {
                        let sort = SortOrder::parse(&event_target_value(&ev));
                        store_set_filter(&store, FormFilter { sort, ..store.filter().get_untracked() });
                    }
                >
                    {SortOrder::ALL.into_iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            <Show when=move || store.loading().get()>
                <p class="loading">"Loading forms..."</p>
            </Show>
            <Show when=move || !store.loading().get() && visible.with(Vec::is_empty)>
                <div class="empty-forms">
                    <p>"No forms found."</p>
                    <button type="button" class="primary" on:click=move |_| ctx.navigate(View::Editor(None))>
                        "Create your first form"
                    </button>
                </div>
            </Show>

            <div class="forms-list">
                <For
                    each=page_forms
                    key=|form| (form.id.clone(), form.is_active, form.title.clone())
                    children=move |form| view! {
                        <FormCard
                            form=form
                            on_delete=on_delete
                            on_toggle=on_toggle
                            on_duplicate=on_duplicate
                        />
                    }
                />
            </div>

            <Pagination
                page=page
                total_pages=pages
                on_change=move |p| *store.page().write() = p
            />
        </section>
    }
}

#[component]
fn FormCard(
    form: Form,
    on_delete: Callback<String>,
    on_toggle: Callback<String>,
    on_duplicate: Callback<String>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let id = form.id.clone().unwrap_or_default();
    let created = form.created_at.as_ref().map(display_date).unwrap_or_default();
    let status_class = if form.is_active { "status-badge active" } else { "status-badge inactive" };

    let share = {
        let id = id.clone();
        move |_| {
            let Some(win) = web_sys::window() else { return };
            let Ok(origin) = win.location().origin() else { return };
            let link = share_link(&origin, &id);
            spawn_local(async move {
                if copy_to_clipboard(&link).await {
                    ctx.notify(NoticeKind::Success, "Share link copied to clipboard");
                } else {
                    ctx.notify(NoticeKind::Info, format!("Share link: {}", link));
                }
            });
        }
    };

    let edit_id = id.clone();
    let responses_id = id.clone();
    let toggle_id = id.clone();
    let duplicate_id = id.clone();
    let delete_id = id;

    view! {
        <div class="form-card">
            <div class="form-card-header">
                <h3>{form.title.clone()}</h3>
                <span class=status_class>{if form.is_active { "Active" } else { "Inactive" }}</span>
            </div>
            <p class="form-description">{form.description.clone().unwrap_or_default()}</p>
            <div class="form-meta">
                <span>{format!("{} questions", form.questions.len())}</span>
                <span>{format!("{} responses", form.response_count)}</span>
                <span>{created}</span>
            </div>
            <div class="form-actions">
                <button type="button" on:click=move |_| ctx.navigate(View::Editor(Some(edit_id.clone())))>
                    "Edit"
                </button>
                <button type="button" on:click=move |_| ctx.navigate(View::Responses(responses_id.clone()))>
                    "Responses"
                </button>
                <button type="button" on:click=share>"Share"</button>
                <button type="button" on:click=move |_| on_toggle.run(toggle_id.clone())>
                    {if form.is_active { "Deactivate" } else { "Activate" }}
                </button>
                <button type="button" on:click=move |_| on_duplicate.run(duplicate_id.clone())>
                    "Duplicate"
                </button>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    label="Delete"
                    on_confirm=move |_| on_delete.run(delete_id.clone())
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link() {
        assert_eq!(
            share_link("https://app.flyforms.io/", "65f0"),
            "https://app.flyforms.io/form.html?id=65f0"
        );
        assert_eq!(share_link("http://localhost:8080", "x"), "http://localhost:8080/form.html?id=x");
    }
}
