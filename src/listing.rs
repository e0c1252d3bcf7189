//! Listing Utilities
//!
//! Client-side filtering, sorting and pagination for the forms and
//! responses lists.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::{Form, Submission};

/// Display format for submission and creation dates
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn display_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

// ========================
// Pagination
// ========================

/// Number of pages needed for `total` entries (0 when empty)
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Keep a 1-based page inside `1..=total_pages`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Entries of 1-based `page`
pub fn page_slice<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    items.iter().skip(start).take(per_page).cloned().collect()
}

// ========================
// Forms
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.as_str() == s).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
    Responses,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Newest,
        SortOrder::Oldest,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::Responses,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::Responses => "responses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Oldest => "Oldest first",
            SortOrder::NameAsc => "Name (A-Z)",
            SortOrder::NameDesc => "Name (Z-A)",
            SortOrder::Responses => "Most responses",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL.into_iter().find(|o| o.as_str() == s).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormFilter {
    pub status: StatusFilter,
    pub sort: SortOrder,
    pub search: String,
}

pub fn filter_forms(forms: &[Form], filter: &FormFilter) -> Vec<Form> {
    let search = filter.search.trim().to_lowercase();
    let mut filtered: Vec<Form> = forms
        .iter()
        .filter(|form| match filter.status {
            StatusFilter::All => true,
            StatusFilter::Active => form.is_active,
            StatusFilter::Inactive => !form.is_active,
        })
        .filter(|form| {
            search.is_empty()
                || form.title.to_lowercase().contains(&search)
                || form
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&search))
        })
        .cloned()
        .collect();

    match filter.sort {
        SortOrder::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::NameAsc => filtered.sort_by_key(|f| f.title.to_lowercase()),
        SortOrder::NameDesc => filtered.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase())),
        SortOrder::Responses => filtered.sort_by(|a, b| b.response_count.cmp(&a.response_count)),
    }
    filtered
}

// ========================
// Responses
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [DateRange::All, DateRange::Today, DateRange::Week, DateRange::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::All => "All time",
            DateRange::Today => "Today",
            DateRange::Week => "This week",
            DateRange::Month => "This month",
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL.into_iter().find(|r| r.as_str() == s).unwrap_or_default()
    }

    /// First instant included by the range; weeks start on Sunday
    pub fn start(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date();
        let day: NaiveDate = match self {
            DateRange::All => return None,
            DateRange::Today => today,
            DateRange::Week => today - Duration::days(today.weekday().num_days_from_sunday() as i64),
            DateRange::Month => today.with_day(1)?,
        };
        day.and_hms_opt(0, 0, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseFilter {
    pub range: DateRange,
    pub search: String,
}

fn answer_matches(answer: &serde_json::Value, needle: &str) -> bool {
    match answer {
        serde_json::Value::String(s) => s.to_lowercase().contains(needle),
        serde_json::Value::Array(values) => values
            .iter()
            .filter_map(|v| v.as_str())
            .any(|s| s.to_lowercase().contains(needle)),
        serde_json::Value::Object(file) => file
            .get("filename")
            .and_then(|f| f.as_str())
            .is_some_and(|f| f.to_lowercase().contains(needle)),
        _ => false,
    }
}

fn submission_matches(submission: &Submission, needle: &str) -> bool {
    submission.id.to_lowercase().contains(needle)
        || display_date(&submission.created_at).to_lowercase().contains(needle)
        || submission.answers.values().any(|a| answer_matches(a, needle))
}

/// Filter by range and search, newest first
pub fn filter_responses(responses: &[Submission], filter: &ResponseFilter, now: NaiveDateTime) -> Vec<Submission> {
    let start = filter.range.start(now);
    let needle = filter.search.trim().to_lowercase();
    let mut filtered: Vec<Submission> = responses
        .iter()
        .filter(|s| start.map_or(true, |start| s.created_at >= start))
        .filter(|s| needle.is_empty() || submission_matches(s, &needle))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormsSummary {
    pub total: usize,
    pub active: usize,
    pub responses: u64,
}

pub fn summarize_forms(forms: &[Form]) -> FormsSummary {
    FormsSummary {
        total: forms.len(),
        active: forms.iter().filter(|f| f.is_active).count(),
        responses: forms.iter().map(|f| u64::from(f.response_count)).sum(),
    }
}

/// The `limit` most recently created forms, newest first
pub fn recent_forms(forms: &[Form], limit: usize) -> Vec<Form> {
    let mut recent = forms.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

/// Merge per-form response lists into the `limit` newest submissions
pub fn recent_responses(batches: Vec<Vec<Submission>>, limit: usize) -> Vec<Submission> {
    let mut all: Vec<Submission> = batches.into_iter().flatten().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all.truncate(limit);
    all
}

/// Ids before and after `id` in `ids`
pub fn neighbours<'a>(ids: &[&'a str], id: &str) -> (Option<&'a str>, Option<&'a str>) {
    let Some(i) = ids.iter().position(|x| *x == id) else {
        return (None, None);
    };
    let prev = i.checked_sub(1).map(|p| ids[p]);
    (prev, ids.get(i + 1).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn form(title: &str, active: bool, created: &str, responses: u32) -> Form {
        let mut f = Form::new(title);
        f.is_active = active;
        f.created_at = Some(at(created));
        f.response_count = responses;
        f
    }

    fn submission(id: &str, created: &str, answers: serde_json::Value) -> Submission {
        Submission {
            id: id.to_string(),
            form_id: "f1".to_string(),
            answers: serde_json::from_value(answers).unwrap(),
            created_at: at(created),
            is_spam: false,
        }
    }

    fn titles(forms: &[Form]) -> Vec<&str> {
        forms.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_pagination() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(clamp_page(5, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
        assert_eq!(clamp_page(3, 0), 1);

        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(page_slice(&items, 3, 10), vec![21, 22, 23, 24, 25]);
        assert_eq!(page_slice(&items, 1, 10).len(), 10);
        assert!(page_slice(&items, 4, 10).is_empty());
    }

    #[test]
    fn test_filter_forms_status_and_search() {
        let mut with_desc = form("Poll", false, "2024-01-03 00:00", 0);
        with_desc.description = Some("Quarterly FEEDBACK round".into());
        let forms = vec![
            form("Customer Feedback", true, "2024-01-01 00:00", 3),
            form("Signup", true, "2024-01-02 00:00", 10),
            with_desc,
        ];

        let filter = FormFilter { status: StatusFilter::Active, ..Default::default() };
        assert_eq!(titles(&filter_forms(&forms, &filter)), vec!["Signup", "Customer Feedback"]);

        let filter = FormFilter { search: "feedback".into(), ..Default::default() };
        assert_eq!(titles(&filter_forms(&forms, &filter)), vec!["Poll", "Customer Feedback"]);

        let filter = FormFilter { status: StatusFilter::Inactive, search: "sign".into(), ..Default::default() };
        assert!(filter_forms(&forms, &filter).is_empty());
    }

    #[test]
    fn test_sort_forms() {
        let forms = vec![
            form("beta", true, "2024-01-02 00:00", 1),
            form("Alpha", true, "2024-01-03 00:00", 7),
            form("gamma", true, "2024-01-01 00:00", 4),
        ];
        let sorted = |sort| titles(&filter_forms(&forms, &FormFilter { sort, ..Default::default() }))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        assert_eq!(sorted(SortOrder::Newest), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(sorted(SortOrder::Oldest), vec!["gamma", "beta", "Alpha"]);
        assert_eq!(sorted(SortOrder::NameAsc), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(sorted(SortOrder::NameDesc), vec!["gamma", "beta", "Alpha"]);
        assert_eq!(sorted(SortOrder::Responses), vec!["Alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_date_range_start() {
        // 2024-05-15 is a Wednesday
        let now = at("2024-05-15 13:45");
        assert_eq!(DateRange::All.start(now), None);
        assert_eq!(DateRange::Today.start(now), Some(at("2024-05-15 00:00")));
        assert_eq!(DateRange::Week.start(now), Some(at("2024-05-12 00:00")));
        assert_eq!(DateRange::Month.start(now), Some(at("2024-05-01 00:00")));
    }

    #[test]
    fn test_filter_responses_by_range_newest_first() {
        let responses = vec![
            submission("a", "2024-05-01 09:00", json!({})),
            submission("b", "2024-05-14 09:00", json!({})),
            submission("c", "2024-04-30 09:00", json!({})),
            submission("d", "2024-05-15 08:00", json!({})),
        ];
        let now = at("2024-05-15 13:45");
        let ids = |range| {
            filter_responses(&responses, &ResponseFilter { range, search: String::new() }, now)
                .into_iter()
                .map(|s| s.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(DateRange::All), vec!["d", "b", "a", "c"]);
        assert_eq!(ids(DateRange::Month), vec!["d", "b", "a"]);
        assert_eq!(ids(DateRange::Week), vec!["d", "b"]);
        assert_eq!(ids(DateRange::Today), vec!["d"]);
    }

    #[test]
    fn test_filter_responses_search() {
        let responses = vec![
            submission("r-001", "2024-05-01 09:00", json!({"q1": "Hello World"})),
            submission("r-002", "2024-05-02 09:00", json!({"q2": ["Red", "Blue"]})),
            submission("r-003", "2024-05-03 09:00", json!({"q3": {"filename": "CV.pdf", "size": 3}})),
            submission("r-004", "2024-05-04 09:00", json!({"q4": 42})),
        ];
        let now = at("2024-06-01 00:00");
        let search = |s: &str| {
            let filter = ResponseFilter { range: DateRange::All, search: s.to_string() };
            filter_responses(&responses, &filter, now)
                .into_iter()
                .map(|s| s.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(search("world"), vec!["r-001"]);
        assert_eq!(search("blue"), vec!["r-002"]);
        assert_eq!(search("cv.pdf"), vec!["r-003"]);
        assert_eq!(search("42"), Vec::<String>::new());
        assert_eq!(search("R-004"), vec!["r-004"]);
        assert_eq!(search("2024-05-02"), vec!["r-002"]);
    }

    #[test]
    fn test_summarize_and_recent_forms() {
        let forms = vec![
            form("old", true, "2024-01-01 00:00", 3),
            form("new", false, "2024-03-01 00:00", 0),
            form("mid", true, "2024-02-01 00:00", 5),
        ];
        assert_eq!(summarize_forms(&forms), FormsSummary { total: 3, active: 2, responses: 8 });
        assert_eq!(summarize_forms(&[]), FormsSummary::default());
        assert_eq!(titles(&recent_forms(&forms, 2)), vec!["new", "mid"]);
        assert_eq!(recent_forms(&forms, 10).len(), 3);
    }

    #[test]
    fn test_recent_responses_merge_across_forms() {
        let a = vec![
            submission("a1", "2024-05-01 09:00", json!({})),
            submission("a2", "2024-05-04 09:00", json!({})),
        ];
        let b = vec![
            submission("b1", "2024-05-03 09:00", json!({})),
            submission("b2", "2024-05-05 09:00", json!({})),
        ];
        let ids: Vec<_> = recent_responses(vec![a, b, Vec::new()], 3).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["b2", "a2", "b1"]);
        assert!(recent_responses(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_neighbours() {
        let ids = ["r3", "r2", "r1"];
        assert_eq!(neighbours(&ids, "r3"), (None, Some("r2")));
        assert_eq!(neighbours(&ids, "r2"), (Some("r3"), Some("r1")));
        assert_eq!(neighbours(&ids, "r1"), (Some("r2"), None));
        assert_eq!(neighbours(&ids, "gone"), (None, None));
    }

    #[test]
    fn test_filter_names_round_trip_from_select_values() {
        assert_eq!(SortOrder::parse("name-desc"), SortOrder::NameDesc);
        assert_eq!(SortOrder::parse("bogus"), SortOrder::Newest);
        assert_eq!(StatusFilter::parse("inactive"), StatusFilter::Inactive);
        assert_eq!(DateRange::parse("week"), DateRange::Week);
    }
}
