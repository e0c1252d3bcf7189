//! UI Components
//!
//! Leptos components for the dashboard views.

mod dashboard_summary;
mod delete_confirm_button;
mod form_editor;
mod forms_list;
mod login_panel;
mod notification_bar;
mod option_list;
mod pagination;
mod question_card;
mod response_detail;
mod responses_list;
mod top_bar;

pub use dashboard_summary::DashboardSummary;
pub use delete_confirm_button::DeleteConfirmButton;
pub use form_editor::FormEditor;
pub use forms_list::FormsList;
pub use login_panel::LoginPanel;
pub use notification_bar::NotificationBar;
pub use option_list::OptionList;
pub use pagination::Pagination;
pub use question_card::QuestionCard;
pub use response_detail::ResponseDetail;
pub use responses_list::ResponsesList;
pub use top_bar::TopBar;
