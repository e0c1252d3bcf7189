//! Response Detail Component
//!
//! One submission with every answered question, and links to its
//! neighbours in newest-first order.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::responses_list::{format_answer, is_blank, short_id};
use crate::context::{AppContext, View};
use crate::listing::{display_date, neighbours};
use crate::models::{Form, Submission};

/// (question title, answer text) for every question the submission answered, in form order
pub fn answered_questions(form: &Form, submission: &Submission) -> Vec<(String, String)> {
    form.questions
        .iter()
        .filter_map(|q| {
            let answer = submission.answers.get(&q.id).filter(|a| !is_blank(Some(*a)))?;
            Some((q.title.clone(), format_answer(Some(answer), Some(q))))
        })
        .collect()
}

#[component]
pub fn ResponseDetail(form_id: String, response_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (form, set_form) = signal(None::<Form>);
    let (responses, set_responses) = signal(Vec::<Submission>::new());
    let (loading, set_loading) = signal(true);
    let form_id = StoredValue::new(form_id);
    let response_id = StoredValue::new(response_id);

    if let Some(token) = ctx.token() {
        let id = form_id.get_value();
        spawn_local(async move {
            match api::get_form(&token, &id).await {
                Ok(f) => set_form.set(Some(f)),
                Err(e) => {
                    ctx.report("Failed to load form", &e);
                    if e.ends_session() {
                        set_loading.set(false);
                        return;
                    }
                }
            }
            match api::list_responses(&token, &id).await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    set_responses.set(list);
                }
                Err(e) => ctx.report("Failed to load response", &e),
            }
            set_loading.set(false);
        });
    }

    let submission = Memo::new(move |_| {
        response_id.with_value(|rid| responses.with(|r| r.iter().find(|s| &s.id == rid).cloned()))
    });
    let adjacent = Memo::new(move |_| {
        response_id.with_value(|rid| {
            responses.with(|r| {
                let ids: Vec<&str> = r.iter().map(|s| s.id.as_str()).collect();
                let (prev, next) = neighbours(&ids, rid);
                (prev.map(str::to_string), next.map(str::to_string))
            })
        })
    });
    let answers = move || {
        form.with(|f| {
            submission.with(|s| match (f, s) {
                (Some(f), Some(s)) => answered_questions(f, s),
                _ => Vec::new(),
            })
        })
    };

    let go = move |target: Option<String>| {
        if let Some(rid) = target {
            ctx.navigate(View::Response(form_id.get_value(), rid));
        }
    };

    view! {
        <section class="response-detail">
            <div class="responses-header">
                <button type="button" class="back-btn" on:click=move |_| ctx.navigate(View::Responses(form_id.get_value()))>
                    "← Back to responses"
                </button>
                <h2>{move || form.with(|f| f.as_ref().map(|f| f.title.clone()).unwrap_or_default())}</h2>
            </div>

            <Show when=move || loading.get()>
                <p class="loading">"Loading response..."</p>
            </Show>
            <Show when=move || !loading.get() && submission.with(Option::is_none)>
                <p class="empty-responses">"Response not found."</p>
            </Show>

            <Show when=move || submission.with(Option::is_some)>
                <div class="response-meta">
                    <span class="response-id" title=move || response_id.get_value()>
                        {move || response_id.with_value(|id| short_id(id))}
                    </span>
                    <span class="response-date">
                        {move || submission.with(|s| s.as_ref().map(|s| display_date(&s.created_at)).unwrap_or_default())}
                    </span>
                </div>
                <dl class="response-answers">
                    {move || answers().into_iter().map(|(title, answer)| view! {
                        <dt>{title}</dt>
                        <dd>{answer}</dd>
                    }).collect_view()}
                </dl>
                <div class="response-nav">
                    <button
                        type="button"
                        disabled=move || adjacent.with(|(prev, _)| prev.is_none())
                        on:click=move |_| go(adjacent.get().0)
                    >
                        "← Newer"
                    </button>
                    <button
                        type="button"
                        disabled=move || adjacent.with(|(_, next)| next.is_none())
                        on:click=move |_| go(adjacent.get().1)
                    >
                        "Older →"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionType};
    use serde_json::json;

    #[test]
    fn test_answered_questions_skip_blanks_and_keep_form_order() {
        let mut form = Form::new("Feedback");
        for (id, t, title) in [("q1", "text", "Name"), ("q2", "rating", "Score"), ("q3", "email", "Email")] {
            let q: Question = serde_json::from_value(json!({"id": id, "type": t, "title": title})).unwrap();
            form.questions.push(q);
        }
        assert_eq!(form.questions[1].question_type, QuestionType::Rating);

        let submission: Submission = serde_json::from_value(json!({
            "id": "r1",
            "form_id": "f1",
            "answers": {"q3": "", "q2": 4, "q1": "Ada", "q9": "orphan"},
            "created_at": "2024-05-06T07:08:09"
        }))
        .unwrap();

        assert_eq!(
            answered_questions(&form, &submission),
            vec![
                ("Name".to_string(), "Ada".to_string()),
                ("Score".to_string(), "4 / 5".to_string()),
            ]
        );
    }
}
