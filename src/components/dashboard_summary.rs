//! Dashboard Summary Component
//!
//! Totals over the loaded forms plus the latest forms and submissions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config;
use crate::context::{AppContext, View};
use crate::listing::{display_date, recent_forms, recent_responses, summarize_forms};
use crate::models::{Form, Submission};

#[component]
pub fn DashboardSummary(#[prop(into)] forms: Signal<Vec<Form>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let summary = Memo::new(move |_| forms.with(|f| summarize_forms(f)));
    let latest_forms = Memo::new(move |_| forms.with(|f| recent_forms(f, config::RECENT_LIMIT)));
    let (latest_responses, set_latest_responses) = signal(Vec::<Submission>::new());

    // Responses of the newest forms, refetched whenever the form list changes
    Effect::new(move |_| {
        let ids: Vec<String> = latest_forms.with(|f| f.iter().filter_map(|f| f.id.clone()).collect());
        let Some(token) = ctx.token() else { return };
        spawn_local(async move {
            let mut batches = Vec::with_capacity(ids.len());
            for id in ids {
                match api::list_responses(&token, &id).await {
                    Ok(list) => batches.push(list),
                    Err(e) if e.ends_session() => {
                        ctx.report("Failed to load recent responses", &e);
                        return;
                    }
                    Err(e) => log::warn!("recent responses for form {}: {}", id, e),
                }
            }
            set_latest_responses.set(recent_responses(batches, config::RECENT_LIMIT));
        });
    });

    let form_title = move |form_id: &str| {
        forms.with(|f| {
            f.iter()
                .find(|f| f.id.as_deref() == Some(form_id))
                .map(|f| f.title.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="dashboard-summary">
            <div class="summary-cards">
                <div class="summary-card">
                    <span class="summary-label">"Total forms"</span>
                    <span class="summary-value">{move || summary.get().total}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">"Active forms"</span>
                    <span class="summary-value">{move || summary.get().active}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">"Total responses"</span>
                    <span class="summary-value">{move || summary.get().responses}</span>
                </div>
            </div>

            <div class="recent-panels">
                <div class="recent-forms">
                    <h3>"Recent forms"</h3>
                    <ul>
                        {move || latest_forms.get().into_iter().map(|form| {
                            let id = form.id.clone().unwrap_or_default();
                            let created = form.created_at.as_ref().map(display_date).unwrap_or_default();
                            view! {
                                <li on:click=move |_| ctx.navigate(View::Editor(Some(id.clone())))>
                                    <span class="recent-title">{form.title}</span>
                                    <span class="recent-date">{created}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </div>
                <div class="recent-responses">
                    <h3>"Recent responses"</h3>
                    <Show when=move || latest_responses.with(Vec::is_empty)>
                        <p class="empty-responses">"No responses yet."</p>
                    </Show>
                    <ul>
                        {move || latest_responses.get().into_iter().map(|s| {
                            let title = form_title(&s.form_id);
                            let created = display_date(&s.created_at);
                            let target = View::Response(s.form_id, s.id);
                            view! {
                                <li on:click=move |_| ctx.navigate(target.clone())>
                                    <span class="recent-title">{title}</span>
                                    <span class="recent-date">{created}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </div>
            </div>
        </div>
    }
}
