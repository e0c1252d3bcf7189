//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::ApiError;
use crate::config;
use crate::session::{self, Session};

/// Top-level screens, mirrored in the URL hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    Forms,
    /// `None` creates a new form
    Editor(Option<String>),
    Responses(String),
    /// (form id, response id)
    Response(String, String),
}

impl View {
    pub fn to_hash(&self) -> String {
        match self {
            View::Login => "#/login".to_string(),
            View::Forms => "#/forms".to_string(),
            View::Editor(None) => "#/forms/new".to_string(),
            View::Editor(Some(id)) => format!("#/forms/{}/edit", id),
            View::Responses(id) => format!("#/forms/{}/responses", id),
            View::Response(form_id, id) => format!("#/forms/{}/responses/{}", form_id, id),
        }
    }

    /// Parse a location hash; anything unknown lands on the forms list
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            ["login"] => View::Login,
            ["forms", "new"] => View::Editor(None),
            ["forms", id, "edit"] => View::Editor(Some(id.to_string())),
            ["forms", id, "responses"] => View::Responses(id.to_string()),
            ["forms", form_id, "responses", id] => View::Response(form_id.to_string(), id.to_string()),
            _ => View::Forms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notification info",
            NoticeKind::Success => "notification success",
            NoticeKind::Error => "notification error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Logged-in session - read
    pub session: ReadSignal<Option<Session>>,
    /// Logged-in session - write
    set_session: WriteSignal<Option<Session>>,
    /// Current screen - read
    pub view: ReadSignal<View>,
    /// Current screen - write
    set_view: WriteSignal<View>,
    /// Visible notifications - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Visible notifications - write
    set_notices: WriteSignal<Vec<Notice>>,
    next_notice: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        session: (ReadSignal<Option<Session>>, WriteSignal<Option<Session>>),
        view: (ReadSignal<View>, WriteSignal<View>),
        notices: (ReadSignal<Vec<Notice>>, WriteSignal<Vec<Notice>>),
    ) -> Self {
        Self {
            session: session.0,
            set_session: session.1,
            view: view.0,
            set_view: view.1,
            notices: notices.0,
            set_notices: notices.1,
            next_notice: StoredValue::new(0),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.get_untracked().map(|s| s.token)
    }

    /// Switch screens; without a session only the login screen is reachable
    pub fn navigate(&self, view: View) {
        let view = if self.session.get_untracked().is_none() { View::Login } else { view };
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_hash(&view.to_hash());
        }
        self.set_view.set(view);
    }

    pub fn login(&self, session: Session) {
        session::save(&session);
        log::info!("logged in as {}", session.username);
        self.set_session.set(Some(session));
        self.navigate(View::Forms);
    }

    pub fn logout(&self) {
        session::clear();
        self.set_session.set(None);
        self.navigate(View::Login);
    }

    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.next_notice.get_value();
        self.next_notice.set_value(id + 1);
        self.set_notices.update(|n| {
            n.push(Notice {
                id,
                kind,
                message: message.into(),
            })
        });

        let ctx = *self;
        let _ = Timeout::new(config::NOTIFICATION_MS, move || ctx.dismiss(id)).forget();
    }

    pub fn dismiss(&self, id: u32) {
        self.set_notices.try_update(|n| n.retain(|notice| notice.id != id));
    }

    /// Report a failed request; an expired session sends the user back to login
    pub fn report(&self, action: &str, err: &ApiError) {
        log::error!("{}: {}", action, err);
        if err.ends_session() {
            self.logout();
        }
        self.notify(NoticeKind::Error, format!("{}: {}", action, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_hash_round_trip() {
        let views = [
            View::Login,
            View::Forms,
            View::Editor(None),
            View::Editor(Some("abc123".into())),
            View::Responses("abc123".into()),
            View::Response("abc123".into(), "r9".into()),
        ];
        for v in views {
            assert_eq!(View::from_hash(&v.to_hash()), v);
        }
    }

    #[test]
    fn test_unknown_hash_falls_back_to_forms() {
        assert_eq!(View::from_hash(""), View::Forms);
        assert_eq!(View::from_hash("#/"), View::Forms);
        assert_eq!(View::from_hash("#/forms/x/delete"), View::Forms);
        assert_eq!(View::from_hash("#/forms/x/responses/r1/extra"), View::Forms);
        assert_eq!(View::from_hash("#forms/9/responses/"), View::Responses("9".into()));
    }
}
