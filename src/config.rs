//! Build-time Configuration
//!
//! Constants shared by the views and the API client.

use std::time::Duration;

const DEFAULT_API_URL: &str = "https://chat-8ynk.onrender.com";

/// Base URL of the FlyForms API, overridable with `FLYFORMS_API_URL` at build time
pub fn api_url() -> &'static str {
    option_env!("FLYFORMS_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Forms shown per page on the forms list
pub const FORMS_PER_PAGE: usize = 12;

/// Responses shown per page on the responses list
pub const RESPONSES_PER_PAGE: usize = 10;

/// Delay before a search box applies its value
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// How long a notification stays on screen
pub const NOTIFICATION_MS: u32 = 4_000;

/// Health ping interval that keeps the hosted API awake
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Settle animation after dropping a reordered row
pub const REORDER_ANIMATION_MS: u32 = 150;

/// Page the public form is served from
pub const PUBLIC_FORM_PAGE: &str = "form.html";

/// Entries in each dashboard "recent" panel
pub const RECENT_LIMIT: usize = 5;
