//! Responses List Component
//!
//! Submitted responses of one form, with date range, search and paging.

use chrono::{DateTime, NaiveDateTime};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api;
use crate::components::{DeleteConfirmButton, Pagination};
use crate::config;
use crate::context::{AppContext, NoticeKind, View};
use crate::debounce::Debouncer;
use crate::listing::{clamp_page, display_date, filter_responses, page_slice, total_pages, DateRange, ResponseFilter};
use crate::models::{Form, Question, QuestionType, Submission};

/// Questions shown as table columns
const PREVIEW_COLUMNS: usize = 4;
const PREVIEW_CHARS: usize = 30;
const PREVIEW_CHARS_LONG: usize = 50;
const DEFAULT_RATING_MAX: i64 = 5;

fn now_utc() -> NaiveDateTime {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

fn option_label(value: &str, question: Option<&Question>) -> String {
    question
        .and_then(|q| q.options.as_ref())
        .and_then(|opts| opts.iter().find(|o| o.value == value))
        .map(|o| o.label.clone())
        .unwrap_or_else(|| value.to_string())
}

pub fn is_blank(answer: Option<&Value>) -> bool {
    match answer {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Full text of an answer; option values are shown by their labels
pub fn format_answer(answer: Option<&Value>, question: Option<&Question>) -> String {
    let Some(answer) = answer.filter(|a| !is_blank(Some(*a))) else {
        return "Not answered".to_string();
    };
    if let Some(q) = question.filter(|q| q.question_type == QuestionType::Rating) {
        let score = match answer {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        };
        if let Some(score) = score {
            return format!("{} / {}", score, q.max_value.unwrap_or(DEFAULT_RATING_MAX));
        }
    }
    match answer {
        Value::String(s) => option_label(s, question),
        Value::Array(values) if values.is_empty() => "None selected".to_string(),
        Value::Array(values) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => option_label(s, question),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(obj) => match obj.get("filename").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None if obj.contains_key("file_id") => "File uploaded".to_string(),
            None => Value::Object(obj.clone()).to_string(),
        },
        Value::Null => String::new(),
    }
}

/// Table cell text: multi-choice collapses to a count, long text is cut
pub fn preview_answer(answer: Option<&Value>, question: Option<&Question>) -> String {
    if let Some(Value::Array(values)) = answer {
        if values.len() > 1 {
            return format!("{} options selected", values.len());
        }
    }
    let text = format_answer(answer, question);
    let limit = match question.map(|q| q.question_type) {
        Some(QuestionType::Textarea) => PREVIEW_CHARS_LONG,
        _ => PREVIEW_CHARS,
    };
    if text.chars().count() > limit {
        format!("{}...", text.chars().take(limit).collect::<String>())
    } else {
        text
    }
}

pub fn short_id(id: &str) -> String {
    if id.chars().count() > 8 {
        format!("{}...", id.chars().take(8).collect::<String>())
    } else {
        id.to_string()
    }
}

#[component]
pub fn ResponsesList(form_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (form, set_form) = signal(None::<Form>);
    let (responses, set_responses) = signal(Vec::<Submission>::new());
    let (loading, set_loading) = signal(true);
    let (filter, set_filter) = signal(ResponseFilter::default());
    let (page, set_page) = signal(1usize);

    if let Some(token) = ctx.token() {
        let id = form_id.clone();
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
                Ok(list) => {
                    log::info!("loaded {} responses for form {}", list.len(), id);
                    set_responses.set(list);
                }
                Err(e) => ctx.report("Failed to load responses", &e),
            }
            set_loading.set(false);
        });
    }

    let filtered = Memo::new(move |_| filter.with(|f| responses.with(|r| filter_responses(r, f, now_utc()))));
    let pages = Signal::derive(move || total_pages(filtered.with(Vec::len), config::RESPONSES_PER_PAGE));

    // Keep the page inside the shrinking result
    Effect::new(move |_| {
        let last = pages.get();
        let current = page.get_untracked();
        let clamped = clamp_page(current, last);
        if clamped != current {
            set_page.set(clamped);
        }
    });

    let page_responses = move || page_slice(&filtered.get(), page.get(), config::RESPONSES_PER_PAGE);
    let columns = Memo::new(move |_| {
        form.with(|f| {
            f.as_ref()
                .map(|f| f.questions.iter().take(PREVIEW_COLUMNS).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let latest = move || {
        responses.with(|r| r.iter().map(|s| s.created_at).max().as_ref().map(display_date))
            .unwrap_or_else(|| "-".to_string())
    };

    let debouncer = Debouncer::new(config::SEARCH_DEBOUNCE_MS);
    let on_search = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        debouncer.call(move || {
            set_filter.update(|f| f.search = value);
            set_page.set(1);
        });
    };

    let on_delete = Callback::new(move |_id: String| {
        ctx.notify(NoticeKind::Info, "Deleting individual responses is not available");
    });

    view! {
        <section class="responses-page">
            <div class="responses-header">
                <button type="button" class="back-btn" on:click=move |_| ctx.navigate(View::Forms)>
                    "← Back to forms"
                </button>
                <h2>{move || form.with(|f| f.as_ref().map(|f| f.title.clone()).unwrap_or_default())}</h2>
            </div>

            <div class="responses-summary">
                <div class="summary-card">
                    <span class="summary-label">"Total responses"</span>
                    <span class="summary-value">{move || responses.with(Vec::len)}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">"Latest response"</span>
                    <span class="summary-value">{latest}</span>
                </div>
            </div>

            <div class="responses-toolbar">
                <select
                    class="date-filter"
                    on:change=move |ev| {
                        let range = DateRange::parse(&event_target_value(&ev));
                        set_filter.update(|f| f.range = range);
                        set_page.set(1);
                    }
                >
                    {DateRange::ALL.into_iter().map(|r| view! {
                        <option value=r.as_str()>{r.label()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="search"
                    class="search-responses"
                    placeholder="Search responses..."
                    on:input=on_search
                />
            </div>

            <Show when=move || loading.get()>
                <p class="loading">"Loading responses..."</p>
            </Show>
            <Show when=move || !loading.get() && filtered.with(Vec::is_empty)>
                <p class="empty-responses">"No responses found."</p>
            </Show>

            <Show when=move || !filtered.with(Vec::is_empty)>
                <table class="responses-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Submitted"</th>
                            {move || columns.get().into_iter().map(|q| view! { <th>{q.title}</th> }).collect_view()}
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=page_responses
                            key=|s| s.id.clone()
                            children=move |submission| view! {
                                <ResponseRow submission=submission columns=columns on_delete=on_delete />
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Pagination page=page total_pages=pages on_change=move |p| set_page.set(p) />
        </section>
    }
}

#[component]
fn ResponseRow(submission: Submission, columns: Memo<Vec<Question>>, on_delete: Callback<String>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let submission = StoredValue::new(submission);
    let id = submission.with_value(|s| s.id.clone());

    let cells = move || {
        submission.with_value(|s| {
            columns
                .get()
                .into_iter()
                .map(|q| view! { <td>{preview_answer(s.answers.get(&q.id), Some(&q))}</td> })
                .collect_view()
        })
    };

    let open = move |_| {
        submission.with_value(|s| ctx.navigate(View::Response(s.form_id.clone(), s.id.clone())));
    };
    let delete_id = id.clone();

    view! {
        <tr class="response-row">
            <td><span class="response-id" title=id.clone()>{short_id(&id)}</span></td>
            <td>{submission.with_value(|s| display_date(&s.created_at))}</td>
            {cells}
            <td class="response-actions">
                <button type="button" class="view-response" on:click=open>"View"</button>
                <DeleteConfirmButton
                    button_class="delete-response"
                    on_confirm=move |_| on_delete.run(delete_id.clone())
                />
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionOption;
    use serde_json::json;

    fn question(question_type: QuestionType) -> Question {
        Question {
            id: "q1".into(),
            question_type,
            title: "Q".into(),
            description: None,
            required: false,
            options: Some(vec![
                QuestionOption { id: "o1".into(), value: "red".into(), label: "Red".into(), image_url: None },
                QuestionOption { id: "o2".into(), value: "blue".into(), label: "Blue".into(), image_url: None },
            ]),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            placeholder: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_format_answer_kinds() {
        let radio = question(QuestionType::Radio);
        assert_eq!(format_answer(None, Some(&radio)), "Not answered");
        assert_eq!(format_answer(Some(&json!("")), Some(&radio)), "Not answered");
        assert_eq!(format_answer(Some(&json!("blue")), Some(&radio)), "Blue");
        assert_eq!(format_answer(Some(&json!("green")), Some(&radio)), "green");

        let checks = question(QuestionType::Checkbox);
        assert_eq!(format_answer(Some(&json!(["red", "blue"])), Some(&checks)), "Red, Blue");
        assert_eq!(format_answer(Some(&json!([])), Some(&checks)), "None selected");

        let mut rating = question(QuestionType::Rating);
        assert_eq!(format_answer(Some(&json!(4)), Some(&rating)), "4 / 5");
        rating.max_value = Some(10);
        assert_eq!(format_answer(Some(&json!(7)), Some(&rating)), "7 / 10");
        // scores stored as text still read as a scale
        rating.max_value = None;
        assert_eq!(format_answer(Some(&json!("4")), Some(&rating)), "4 / 5");
        assert_eq!(format_answer(Some(&json!("")), Some(&rating)), "Not answered");
        assert_eq!(format_answer(Some(&json!(4)), Some(&question(QuestionType::Number))), "4");

        assert_eq!(format_answer(Some(&json!(true)), None), "Yes");
        assert_eq!(format_answer(Some(&json!({"file_id": "f", "filename": "cv.pdf"})), None), "cv.pdf");
        assert_eq!(format_answer(Some(&json!({"file_id": "f"})), None), "File uploaded");
    }

    #[test]
    fn test_preview_answer_truncates_and_counts() {
        let checks = question(QuestionType::Checkbox);
        assert_eq!(preview_answer(Some(&json!(["red", "blue"])), Some(&checks)), "2 options selected");
        assert_eq!(preview_answer(Some(&json!(["red"])), Some(&checks)), "Red");

        let text = question(QuestionType::Text);
        let long = "x".repeat(40);
        assert_eq!(preview_answer(Some(&json!(long)), Some(&text)), format!("{}...", "x".repeat(30)));

        let area = question(QuestionType::Textarea);
        assert_eq!(preview_answer(Some(&json!("x".repeat(40))), Some(&area)), "x".repeat(40));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("65f0c0ffee11"), "65f0c0ff...");
        assert_eq!(short_id("abc"), "abc");
    }
}
