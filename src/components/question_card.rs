//! Question Card Component
//!
//! Editable card for one question of the draft.

use leptos::prelude::*;

use crate::components::{DeleteConfirmButton, OptionList};
use crate::editor::{parse_limit, FormDraft};
use crate::models::{Question, QuestionType};

fn edit_question(draft: RwSignal<FormDraft>, id: StoredValue<String>, f: impl FnOnce(&mut Question)) {
    id.with_value(|id| {
        draft.update(|d| {
            if let Some(q) = d.question_mut(id) {
                f(q);
            }
        })
    });
}

/// Number input bound to one optional limit of the question
#[component]
fn LimitInput(
    draft: RwSignal<FormDraft>,
    id: StoredValue<String>,
    label: &'static str,
    get: fn(&Question) -> Option<i64>,
    set: fn(&mut Question, Option<i64>),
) -> impl IntoView {
    let value = move || {
        id.with_value(|id| draft.with(|d| d.question(id).and_then(get)))
            .map(|n| n.to_string())
            .unwrap_or_default()
    };
    view! {
        <label class="question-setting">
            {label}
            <input
                type="number"
                prop:value=value
                on:input=move |ev| {
                    let limit = parse_limit(&event_target_value(&ev));
                    edit_question(draft, id, |q| set(q, limit));
                }
            />
        </label>
    }
}

#[component]
pub fn QuestionCard(draft: RwSignal<FormDraft>, question_id: String, number: usize) -> impl IntoView {
    let id = StoredValue::new(question_id);

    let question = Memo::new(move |_| id.with_value(|id| draft.with(|d| d.question(id).cloned())));
    let field = move |f: fn(&Question) -> String| move || question.with(|q| q.as_ref().map(f).unwrap_or_default());

    let current_type = move || question.with(|q| q.as_ref().map(|q| q.question_type).unwrap_or(QuestionType::Text));
    let has_options = move || current_type().has_options();
    let has_settings = move || {
        let t = current_type();
        t.has_value_range() || t.has_length_limits() || t.has_placeholder()
    };

    view! {
        <div class="question-card">
            <div class="question-card-header">
                <span class="drag-handle question-handle" title="Drag to reorder">"⠿"</span>
                <span class="question-number">{format!("Q{}", number)}</span>
                <select
                    class="question-type"
                    on:change=move |ev| {
                        if let Some(t) = QuestionType::parse(&event_target_value(&ev)) {
                            id.with_value(|id| draft.update(|d| d.set_question_type(id, t)));
                        }
                    }
                >
                    {QuestionType::ALL.into_iter().map(|t| view! {
                        <option value=t.as_str() selected=move || current_type() == t>{t.label()}</option>
                    }).collect_view()}
                </select>
                <label class="required-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || question.with(|q| q.as_ref().is_some_and(|q| q.required))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            edit_question(draft, id, |q| q.required = checked);
                        }
                    />
                    "Required"
                </label>
                <button
                    type="button"
                    class="question-duplicate-btn"
                    title="Duplicate question"
                    on:click=move |_| id.with_value(|id| draft.update(|d| {
                        d.duplicate_question(id);
                    }))
                >
                    "Duplicate"
                </button>
                <DeleteConfirmButton
                    button_class="question-delete-btn"
                    on_confirm=move |_| id.with_value(|id| draft.update(|d| d.remove_question(id)))
                />
            </div>

            <input
                type="text"
                class="question-title"
                placeholder="Question"
                prop:value=field(|q| q.title.clone())
                on:input=move |ev| {
                    let title = event_target_value(&ev);
                    edit_question(draft, id, |q| q.title = title);
                }
            />
            <input
                type="text"
                class="question-description"
                placeholder="Description (optional)"
                prop:value=field(|q| q.description.clone().unwrap_or_default())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    edit_question(draft, id, |q| q.description = (!text.trim().is_empty()).then_some(text));
                }
            />

            <Show when=has_options>
                <OptionList draft=draft question_id=id.get_value() />
            </Show>

            <Show when=has_settings>
                <div class="question-settings">
                    <Show when=move || current_type().has_value_range()>
                        <LimitInput draft=draft id=id label="Min value" get=|q| q.min_value set=|q, v| q.min_value = v />
                        <LimitInput draft=draft id=id label="Max value" get=|q| q.max_value set=|q, v| q.max_value = v />
                    </Show>
                    <Show when=move || current_type().has_length_limits()>
                        <LimitInput draft=draft id=id label="Min length" get=|q| q.min_length set=|q, v| q.min_length = v />
                        <LimitInput draft=draft id=id label="Max length" get=|q| q.max_length set=|q, v| q.max_length = v />
                    </Show>
                    <Show when=move || current_type().has_placeholder()>
                        <input
                            type="text"
                            class="question-placeholder-input"
                            placeholder="Placeholder text"
                            prop:value=field(|q| q.placeholder.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                edit_question(draft, id, |q| q.placeholder = (!text.is_empty()).then_some(text));
                            }
                        />
                    </Show>
                </div>
            </Show>
        </div>
    }
}
