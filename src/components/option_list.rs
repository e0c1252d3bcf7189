//! Option List Component
//!
//! Drag-reorderable options of a choice question.

use leptos::prelude::*;

use leptos_reorder::{use_reorder, Row};

use super::form_editor::reorder_options;
use crate::components::DeleteConfirmButton;
use crate::context::{AppContext, NoticeKind};
use crate::editor::FormDraft;

#[component]
pub fn OptionList(draft: RwSignal<FormDraft>, question_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let qid = StoredValue::new(question_id);

    let reorder = use_reorder(
        reorder_options(".option-handle"),
        Callback::new(move |order: Vec<usize>| {
            qid.with_value(|qid| {
                draft.update(|d| {
                    d.reorder_options(qid, &order);
                })
            });
        }),
    );

    // (row, option id)
    let option_rows = move || {
        let options = qid.with_value(|qid| {
            draft.with(|d| {
                d.question(qid)
                    .and_then(|q| q.options.clone())
                    .unwrap_or_default()
            })
        });
        reorder
            .rows(options.len())
            .into_iter()
            .map(|row| match row {
                Row::Item(i) => (row, options.get(i).map(|o| o.id.clone()).unwrap_or_default()),
                Row::Placeholder => (row, String::new()),
            })
            .collect::<Vec<_>>()
    };

    let label_of = move |option_id: &str| {
        qid.with_value(|qid| {
            draft.with(|d| {
                d.question(qid)
                    .and_then(|q| q.options.as_ref())
                    .and_then(|opts| opts.iter().find(|o| o.id == option_id))
                    .map(|o| o.label.clone())
                    .unwrap_or_default()
            })
        })
    };

    view! {
        <div class="option-list">
            <For
                each=option_rows
                key=|(row, id)| (*row, id.clone())
                children=move |(row, option_id)| match row {
                    Row::Placeholder => view! {
                        <div class="reorder-placeholder option-placeholder" style=move || reorder.placeholder_style() />
                    }.into_any(),
                    Row::Item(index) => {
                        let oid = StoredValue::new(option_id);
                        view! {
                            <div
                                data-reorder-item=""
                                class=move || format!("option-row {}", reorder.item_class(index))
                                style=move || reorder.item_style(index)
                                on:pointerdown=reorder.on_pointerdown()
                            >
                                <span class="drag-handle option-handle">"⠿"</span>
                                <input
                                    type="text"
                                    class="option-label"
                                    placeholder="Option label"
                                    prop:value=move || oid.with_value(|oid| label_of(oid))
                                    on:input=move |ev| {
                                        let label = event_target_value(&ev);
                                        qid.with_value(|qid| oid.with_value(|oid| draft.update(|d| {
                                            let option = d
                                                .question_mut(qid)
                                                .and_then(|q| q.options.as_mut())
                                                .and_then(|opts| opts.iter_mut().find(|o| o.id == *oid));
                                            if let Some(o) = option {
                                                o.label = label;
                                            }
                                        })));
                                    }
                                />
                                <DeleteConfirmButton
                                    button_class="option-delete-btn"
                                    on_confirm=move |_| {
                                        let removed = qid.with_value(|qid| oid.with_value(|oid| {
                                            draft.try_update(|d| d.remove_option(qid, oid)).unwrap_or(false)
                                        }));
                                        if !removed {
                                            ctx.notify(NoticeKind::Error, "A choice question needs at least one option");
                                        }
                                    }
                                />
                            </div>
                        }.into_any()
                    }
                }
            />
            <button
                type="button"
                class="add-option-btn"
                on:click=move |_| qid.with_value(|qid| draft.update(|d| d.add_option(qid)))
            >
                "+ Add option"
            </button>
        </div>
    }
}
