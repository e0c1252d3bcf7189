//! Frontend Models
//!
//! Data structures matching the FlyForms API payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Question input kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Textarea,
    Number,
    Select,
    MultiSelect,
    Checkbox,
    Radio,
    Date,
    Time,
    File,
    Location,
    Email,
    Phone,
    Url,
    Rating,
    Slider,
}

impl QuestionType {
    pub const ALL: [QuestionType; 16] = [
        QuestionType::Text,
        QuestionType::Textarea,
        QuestionType::Number,
        QuestionType::Select,
        QuestionType::MultiSelect,
        QuestionType::Checkbox,
        QuestionType::Radio,
        QuestionType::Date,
        QuestionType::Time,
        QuestionType::File,
        QuestionType::Location,
        QuestionType::Email,
        QuestionType::Phone,
        QuestionType::Url,
        QuestionType::Rating,
        QuestionType::Slider,
    ];

    /// Types answered by picking from an option list
    pub fn has_options(self) -> bool {
        matches!(
            self,
            QuestionType::Select | QuestionType::MultiSelect | QuestionType::Checkbox | QuestionType::Radio
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
            QuestionType::Number => "number",
            QuestionType::Select => "select",
            QuestionType::MultiSelect => "multi_select",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Radio => "radio",
            QuestionType::Date => "date",
            QuestionType::Time => "time",
            QuestionType::File => "file",
            QuestionType::Location => "location",
            QuestionType::Email => "email",
            QuestionType::Phone => "phone",
            QuestionType::Url => "url",
            QuestionType::Rating => "rating",
            QuestionType::Slider => "slider",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Text => "Short text",
            QuestionType::Textarea => "Long text",
            QuestionType::Number => "Number",
            QuestionType::Select => "Dropdown",
            QuestionType::MultiSelect => "Multi select",
            QuestionType::Checkbox => "Checkboxes",
            QuestionType::Radio => "Multiple choice",
            QuestionType::Date => "Date",
            QuestionType::Time => "Time",
            QuestionType::File => "File upload",
            QuestionType::Location => "Location",
            QuestionType::Email => "Email",
            QuestionType::Phone => "Phone",
            QuestionType::Url => "Website",
            QuestionType::Rating => "Rating",
            QuestionType::Slider => "Slider",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Types with a `min_value`/`max_value` setting
    pub fn has_value_range(self) -> bool {
        matches!(self, QuestionType::Number | QuestionType::Rating | QuestionType::Slider)
    }

    /// Types with a `min_length`/`max_length` setting
    pub fn has_length_limits(self) -> bool {
        matches!(self, QuestionType::Text | QuestionType::Textarea)
    }

    pub fn has_placeholder(self) -> bool {
        matches!(
            self,
            QuestionType::Text
                | QuestionType::Textarea
                | QuestionType::Number
                | QuestionType::Email
                | QuestionType::Phone
                | QuestionType::Url
        )
    }

    /// Range a scale starts with when none is set
    pub fn default_range(self) -> Option<(i64, i64)> {
        match self {
            QuestionType::Rating => Some((1, 5)),
            QuestionType::Slider => Some((0, 10)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(default)]
    pub min_value: Option<i64>,
    #[serde(default)]
    pub max_value: Option<i64>,
    #[serde(default)]
    pub min_length: Option<i64>,
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Validation and conditional-logic fields the editor does not touch
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenContent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Form settings; fields the dashboard does not edit are carried through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default)]
    pub require_login: bool,
    #[serde(default)]
    pub limit_responses: Option<u32>,
    #[serde(default = "default_true")]
    pub allow_multiple_submissions: bool,
    #[serde(default = "default_true")]
    pub analytics_enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            require_login: false,
            limit_responses: None,
            allow_multiple_submissions: true,
            analytics_enabled: true,
            extra: serde_json::Map::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_end_screen() -> serde_json::Value {
    serde_json::json!({ "title": "Thank you!", "description": "Your response has been recorded." })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub start_screen: ScreenContent,
    /// Static screen or conditional list; not edited here
    #[serde(default = "default_end_screen")]
    pub end_screen: serde_json::Value,
    #[serde(default)]
    pub settings: FormSettings,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing)]
    pub response_count: u32,
    #[serde(default, with = "timestamp::option", skip_serializing)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option", skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Form {
    pub fn new(title: &str) -> Self {
        Self {
            id: None,
            user_id: None,
            title: title.to_string(),
            description: None,
            questions: Vec::new(),
            start_screen: ScreenContent {
                title: title.to_string(),
                description: None,
            },
            end_screen: default_end_screen(),
            settings: FormSettings::default(),
            is_active: true,
            response_count: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

/// One submitted response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(alias = "_id")]
    pub id: String,
    pub form_id: String,
    #[serde(default)]
    pub answers: HashMap<String, serde_json::Value>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_spam: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Timestamps arrive as naive UTC ISO-8601; RFC 3339 with an offset is accepted too.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
    }

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
            Ok(Option::<String>::deserialize(d)?.as_deref().and_then(super::parse))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_from_backend_json() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "user_id": "u1",
            "title": "Feedback",
            "start_screen": {"title": "Hi"},
            "end_screen": {"title": "Bye"},
            "questions": [
                {"id": "q1", "type": "multi_select", "title": "Pick", "required": true,
                 "options": [{"id": "o1", "value": "1", "label": "One"}]}
            ],
            "settings": {"require_login": false, "spam_prevention_level": "medium"},
            "created_at": "2024-03-01T10:20:30.123456"
        }"#;
        let form: Form = serde_json::from_str(json).unwrap();
        assert_eq!(form.id.as_deref(), Some("65f0c0ffee"));
        assert_eq!(form.user_id.as_deref(), Some("u1"));
        assert_eq!(form.questions[0].question_type, QuestionType::MultiSelect);
        assert!(form.is_active);
        assert_eq!(form.settings.extra["spam_prevention_level"], "medium");
        assert_eq!(form.created_at.unwrap().format("%Y-%m-%d").to_string(), "2024-03-01");
    }

    #[test]
    fn test_form_payload_keeps_settings_and_end_screen() {
        let mut form = Form::new("Survey");
        form.settings.extra.insert("custom_domain".into(), "x.example".into());
        form.response_count = 9;

        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("response_count").is_none());
        assert_eq!(value["settings"]["custom_domain"], "x.example");
        assert_eq!(value["end_screen"]["title"], "Thank you!");
        assert_eq!(value["start_screen"]["title"], "Survey");
    }

    #[test]
    fn test_submission_timestamps() {
        let naive = r#"{"id": "s1", "form_id": "f", "answers": {"q": "x"}, "created_at": "2024-05-06T07:08:09"}"#;
        let s: Submission = serde_json::from_str(naive).unwrap();
        assert_eq!(s.created_at.format("%H:%M").to_string(), "07:08");

        let offset = r#"{"_id": "s2", "form_id": "f", "created_at": "2024-05-06T07:08:09+02:00"}"#;
        let s: Submission = serde_json::from_str(offset).unwrap();
        assert_eq!(s.id, "s2");
        assert_eq!(s.created_at.format("%H:%M").to_string(), "05:08");

        let bad = r#"{"id": "s3", "form_id": "f", "created_at": "yesterday"}"#;
        assert!(serde_json::from_str::<Submission>(bad).is_err());
    }

    #[test]
    fn test_question_type_names() {
        for t in QuestionType::ALL {
            assert_eq!(QuestionType::parse(t.as_str()), Some(t));
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!(QuestionType::Radio.has_options());
        assert!(!QuestionType::Email.has_options());
        assert!(QuestionType::Rating.has_value_range());
        assert!(!QuestionType::Rating.has_placeholder());
        assert!(QuestionType::Textarea.has_length_limits());
        assert_eq!(QuestionType::Slider.default_range(), Some((0, 10)));
        assert_eq!(QuestionType::Number.default_range(), None);
    }

    #[test]
    fn test_question_keeps_unedited_fields() {
        let json = r#"{"id": "q1", "type": "text", "title": "Name",
            "validation_regex": "^[a-z]+$", "conditional_logic": [{"question_id": "q0"}]}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.extra["validation_regex"], "^[a-z]+$");

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["conditional_logic"][0]["question_id"], "q0");
        assert_eq!(back["type"], "text");
    }
}
