//! Forms List Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::listing::{filter_forms, FormFilter};
use crate::models::Form;

/// State owned by the forms list view
#[derive(Clone, Debug, Default, Store)]
pub struct FormsState {
    /// Every form of the current user, as loaded
    pub forms: Vec<Form>,
    pub filter: FormFilter,
    /// 1-based page
    pub page: usize,
    pub loading: bool,
}

impl FormsState {
    pub fn new() -> Self {
        Self {
            page: 1,
            loading: true,
            ..Default::default()
        }
    }

    /// Forms after filter and sort
    pub fn visible(&self) -> Vec<Form> {
        filter_forms(&self.forms, &self.filter)
    }
}

/// Type alias for the store
pub type FormsStore = Store<FormsState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the loaded forms
pub fn store_set_forms(store: &FormsStore, forms: Vec<Form>) {
    *store.forms().write() = forms;
    *store.loading().write() = false;
}

/// Remove a form from the store by ID
pub fn store_remove_form(store: &FormsStore, form_id: &str) {
    store.forms().write().retain(|f| f.id.as_deref() != Some(form_id));
}

/// Flip a form's active flag locally
pub fn store_toggle_form(store: &FormsStore, form_id: &str) {
    if let Some(form) = store.forms().write().iter_mut().find(|f| f.id.as_deref() == Some(form_id)) {
        form.is_active = !form.is_active;
    }
}

/// Search and status changes go back to page 1; a new sort keeps the page
pub fn resets_page(old: &FormFilter, new: &FormFilter) -> bool {
    old.search != new.search || old.status != new.status
}

/// Apply a filter change
pub fn store_set_filter(store: &FormsStore, filter: FormFilter) {
    let reset = resets_page(&store.filter().read(), &filter);
    *store.filter().write() = filter;
    if reset {
        *store.page().write() = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{SortOrder, StatusFilter};

    #[test]
    fn test_filter_changes_that_reset_page() {
        let old = FormFilter::default();

        let searched = FormFilter { search: "survey".into(), ..old.clone() };
        assert!(resets_page(&old, &searched));

        let active = FormFilter { status: StatusFilter::Active, ..old.clone() };
        assert!(resets_page(&old, &active));

        let sorted = FormFilter { sort: SortOrder::NameAsc, ..old.clone() };
        assert!(!resets_page(&old, &sorted));
        assert!(!resets_page(&old, &old.clone()));
    }

    #[test]
    fn test_new_state_starts_on_first_page_loading() {
        let state = FormsState::new();
        assert_eq!(state.page, 1);
        assert!(state.loading);
        assert!(state.visible().is_empty());
    }
}
