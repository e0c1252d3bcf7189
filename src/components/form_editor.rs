//! Form Editor Component
//!
//! Title, description and a drag-reorderable list of questions.
//! Uses leptos-reorder; the drop order is applied to the draft, which
//! re-renders the list in the same order.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_reorder::{use_reorder, ReorderOptions, Row};

use crate::api::{self, ApiError};
use crate::components::QuestionCard;
use crate::config;
use crate::context::{AppContext, NoticeKind, View};
use crate::editor::FormDraft;
use crate::models::Form;

/// Reorder settings shared by the question and option lists
pub fn reorder_options(handle_selector: &str) -> ReorderOptions {
    ReorderOptions {
        handle_selector: Some(handle_selector.to_string()),
        animation_ms: config::REORDER_ANIMATION_MS,
        dragging_class: "dragging".to_string(),
    }
}

/// Create or update; new forms are stamped with the owner's id first
async fn save_form(token: String, mut form: Form) -> Result<Form, ApiError> {
    match form.id.clone() {
        Some(id) => api::update_form(&token, &id, &form).await,
        None => {
            if form.user_id.is_none() {
                form.user_id = api::current_user(&token).await?.id;
            }
            api::create_form(&token, &form).await
        }
    }
}

#[component]
pub fn FormEditor(form_id: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let draft = RwSignal::new(FormDraft::new());
    let (loading, set_loading) = signal(form_id.is_some());
    let (saving, set_saving) = signal(false);

    if let (Some(id), Some(token)) = (form_id, ctx.token()) {
        spawn_local(async move {
            match api::get_form(&token, &id).await {
                Ok(form) => {
                    log::info!("editing form {} ({} questions)", id, form.questions.len());
                    draft.set(FormDraft::from_form(form));
                }
                Err(e) => ctx.report("Failed to load form", &e),
            }
            set_loading.set(false);
        });
    }

    let reorder = use_reorder(
        reorder_options(".question-handle"),
        Callback::new(move |order: Vec<usize>| {
            draft.update(|d| {
                d.reorder_questions(&order);
            });
        }),
    );

    // (row, question id) pairs; moved questions get a fresh key so their card re-renders
    let question_rows = move || {
        let len = draft.with(|d| d.form.questions.len());
        let rows = reorder.rows(len);
        draft.with(|d| {
            rows.into_iter()
                .map(|row| {
                    let id = match row {
                        Row::Item(i) => d.form.questions.get(i).map(|q| q.id.clone()).unwrap_or_default(),
                        Row::Placeholder => String::new(),
                    };
                    (row, id)
                })
                .collect::<Vec<_>>()
        })
    };

    let add_question = move |_| {
        draft.update(|d| {
            d.add_question();
        });
    };

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let payload = match draft.with_untracked(FormDraft::to_payload) {
            Ok(form) => form,
            Err(e) => {
                ctx.notify(NoticeKind::Error, e.to_string());
                return;
            }
        };
        let Some(token) = ctx.token() else { return };
        set_saving.set(true);
        spawn_local(async move {
            let result = save_form(token, payload).await;
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("saved form {:?}", saved.id);
                    ctx.notify(NoticeKind::Success, "Form saved successfully!");
                    ctx.navigate(View::Forms);
                }
                Err(e) => ctx.report("Failed to save form", &e),
            }
        });
    };

    view! {
        <section class="form-editor">
            <Show when=move || loading.get()>
                <p class="loading">"Loading form..."</p>
            </Show>
            <Show when=move || !loading.get()>
                <div class="editor-header">
                    <input
                        type="text"
                        class="form-title-input"
                        placeholder="Form title"
                        prop:value=move || draft.with(|d| d.form.title.clone())
                        on:input=move |ev| {
                            let title = event_target_value(&ev);
                            draft.update(|d| d.form.title = title);
                        }
                    />
                    <textarea
                        class="form-description-input"
                        placeholder="Form description (optional)"
                        prop:value=move || draft.with(|d| d.form.description.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            draft.update(|d| d.form.description = (!text.trim().is_empty()).then_some(text));
                        }
                    />
                    <input
                        type="text"
                        class="start-screen-input"
                        placeholder="Welcome screen title"
                        prop:value=move || draft.with(|d| d.form.start_screen.title.clone())
                        on:input=move |ev| {
                            let title = event_target_value(&ev);
                            draft.update(|d| d.form.start_screen.title = title);
                        }
                    />
                </div>

                <div class="question-list">
                    <For
                        each=question_rows
                        key=|(row, id)| (*row, id.clone())
                        children=move |(row, id)| match row {
                            Row::Placeholder => view! {
                                <div class="reorder-placeholder question-placeholder" style=move || reorder.placeholder_style() />
                            }.into_any(),
                            Row::Item(index) => view! {
                                <div
                                    data-reorder-item=""
                                    class=move || reorder.item_class(index)
                                    style=move || reorder.item_style(index)
                                    on:pointerdown=reorder.on_pointerdown()
                                >
                                    <QuestionCard draft=draft question_id=id number={index + 1} />
                                </div>
                            }.into_any(),
                        }
                    />
                </div>

                <Show when=move || draft.with(|d| d.form.questions.is_empty())>
                    <p class="empty-questions">"No questions yet. Add one to get started."</p>
                </Show>

                <div class="editor-actions">
                    <button type="button" class="add-question-btn" on:click=add_question>
                        "+ Add question"
                    </button>
                    <button type="button" class="cancel-btn" on:click=move |_| ctx.navigate(View::Forms)>
                        "Cancel"
                    </button>
                    <button type="button" class="primary save-btn" disabled=move || saving.get() on:click=save>
                        {move || if saving.get() { "Saving..." } else { "Save form" }}
                    </button>
                </div>
            </Show>
        </section>
    }
}
