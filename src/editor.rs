//! Form Editor State
//!
//! The form being edited, owned by the editor view and mutated only
//! through these methods.

use leptos_reorder::apply_order;
use thiserror::Error;

use crate::models::{Form, Question, QuestionOption, QuestionType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a form title")]
    MissingTitle,

    #[error("Please add at least one question")]
    NoQuestions,

    #[error("Question {0} needs a title")]
    UntitledQuestion(usize),

    #[error("Question {0} needs at least one option")]
    MissingOptions(usize),

    #[error("Question {0} has an option without a label")]
    BlankOption(usize),

    #[error("Question {0} has a minimum above its maximum")]
    InvalidRange(usize),
}

/// Number typed into a settings field; blank or unparsable clears the setting
pub fn parse_limit(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn inverted(min: Option<i64>, max: Option<i64>) -> bool {
    matches!((min, max), (Some(min), Some(max)) if min > max)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    pub form: Form,
    seq: u64,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::from_form(Form::new("Untitled form"))
    }

    pub fn from_form(form: Form) -> Self {
        Self { form, seq: 0 }
    }

    fn id_taken(&self, id: &str) -> bool {
        self.form.questions.iter().any(|q| {
            q.id == id || q.options.iter().flatten().any(|o| o.id == id)
        })
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            self.seq += 1;
            let id = format!("{}-{}", prefix, self.seq);
            if !self.id_taken(&id) {
                return id;
            }
        }
    }

    fn new_option(&mut self, label: &str) -> QuestionOption {
        let id = self.fresh_id("opt");
        QuestionOption {
            value: id.clone(),
            id,
            label: label.to_string(),
            image_url: None,
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.form.questions.iter().find(|q| q.id == id)
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.form.questions.iter_mut().find(|q| q.id == id)
    }

    /// Append a short-text question and return its id
    pub fn add_question(&mut self) -> String {
        let id = self.fresh_id("q");
        self.form.questions.push(Question {
            id: id.clone(),
            question_type: QuestionType::Text,
            title: String::new(),
            description: None,
            required: false,
            options: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            placeholder: None,
            extra: Default::default(),
        });
        id
    }

    /// Copy a question right after the original, with fresh question and option ids.
    /// Returns the copy's id.
    pub fn duplicate_question(&mut self, id: &str) -> Option<String> {
        let index = self.form.questions.iter().position(|q| q.id == id)?;
        let mut copy = self.form.questions[index].clone();
        copy.id = self.fresh_id("q");
        copy.title = format!("{} (Copy)", copy.title);
        if let Some(options) = copy.options.as_mut() {
            for option in options.iter_mut() {
                option.id = self.fresh_id("opt");
            }
        }
        let copy_id = copy.id.clone();
        self.form.questions.insert(index + 1, copy);
        Some(copy_id)
    }

    pub fn remove_question(&mut self, id: &str) {
        self.form.questions.retain(|q| q.id != id);
    }

    /// Change a question's type; choice types start with two options
    pub fn set_question_type(&mut self, id: &str, question_type: QuestionType) {
        let needs_seed = question_type.has_options()
            && self
                .question(id)
                .is_some_and(|q| q.options.as_ref().map_or(true, |o| o.is_empty()));
        let seed = if needs_seed {
            Some(vec![self.new_option("Option 1"), self.new_option("Option 2")])
        } else {
            None
        };
        if let Some(q) = self.question_mut(id) {
            q.question_type = question_type;
            if seed.is_some() {
                q.options = seed;
            }
            if let Some((min, max)) = question_type.default_range() {
                q.min_value.get_or_insert(min);
                q.max_value.get_or_insert(max);
            }
        }
    }

    pub fn add_option(&mut self, question_id: &str) {
        let Some(count) = self.question(question_id).map(|q| q.options.as_ref().map_or(0, Vec::len)) else {
            return;
        };
        let option = self.new_option(&format!("Option {}", count + 1));
        if let Some(q) = self.question_mut(question_id) {
            q.options.get_or_insert_with(Vec::new).push(option);
        }
    }

    /// Remove an option; refused (returns false) for the last one left
    pub fn remove_option(&mut self, question_id: &str, option_id: &str) -> bool {
        let Some(options) = self.question_mut(question_id).and_then(|q| q.options.as_mut()) else {
            return false;
        };
        if options.len() <= 1 || !options.iter().any(|o| o.id == option_id) {
            return false;
        }
        options.retain(|o| o.id != option_id);
        true
    }

    pub fn reorder_questions(&mut self, order: &[usize]) -> bool {
        apply_order(&mut self.form.questions, order)
    }

    pub fn reorder_options(&mut self, question_id: &str, order: &[usize]) -> bool {
        self.question_mut(question_id)
            .and_then(|q| q.options.as_mut())
            .is_some_and(|options| apply_order(options, order))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.form.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.form.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }
        for (i, q) in self.form.questions.iter().enumerate() {
            let n = i + 1;
            if q.title.trim().is_empty() {
                return Err(ValidationError::UntitledQuestion(n));
            }
            if q.question_type.has_options() {
                let options = q.options.as_deref().unwrap_or_default();
                if options.is_empty() {
                    return Err(ValidationError::MissingOptions(n));
                }
                if options.iter().any(|o| o.label.trim().is_empty()) {
                    return Err(ValidationError::BlankOption(n));
                }
            }
            let t = q.question_type;
            if (t.has_value_range() && inverted(q.min_value, q.max_value))
                || (t.has_length_limits() && inverted(q.min_length, q.max_length))
            {
                return Err(ValidationError::InvalidRange(n));
            }
        }
        Ok(())
    }

    /// Validated payload for `POST/PUT /forms`
    pub fn to_payload(&self) -> Result<Form, ValidationError> {
        self.validate()?;
        let mut form = self.form.clone();
        if form.start_screen.title.trim().is_empty() {
            form.start_screen.title = form.title.clone();
        }
        for q in form.questions.iter_mut() {
            let t = q.question_type;
            if !t.has_options() {
                q.options = None;
            }
            if !t.has_value_range() {
                q.min_value = None;
                q.max_value = None;
            }
            if !t.has_length_limits() {
                q.min_length = None;
                q.max_length = None;
            }
            if !t.has_placeholder() {
                q.placeholder = None;
            }
        }
        Ok(form)
    }
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_questions(titles: &[&str]) -> FormDraft {
        let mut d = FormDraft::new();
        for t in titles {
            let id = d.add_question();
            d.question_mut(&id).unwrap().title = t.to_string();
        }
        d
    }

    fn question_titles(d: &FormDraft) -> Vec<&str> {
        d.form.questions.iter().map(|q| q.title.as_str()).collect()
    }

    #[test]
    fn test_add_question_ids_are_unique() {
        let mut d = draft_with_questions(&["a", "b"]);
        d.form.questions[0].id = "q-3".into();
        let id = d.add_question();
        assert_ne!(id, "q-3");
        let mut ids: Vec<_> = d.form.questions.iter().map(|q| q.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_choice_type_seeds_two_options_once() {
        let mut d = draft_with_questions(&["Color?"]);
        let id = d.form.questions[0].id.clone();

        d.set_question_type(&id, QuestionType::Radio);
        let labels: Vec<_> = d.question(&id).unwrap().options.iter().flatten().map(|o| o.label.clone()).collect();
        assert_eq!(labels, vec!["Option 1", "Option 2"]);

        d.add_option(&id);
        d.set_question_type(&id, QuestionType::Checkbox);
        assert_eq!(d.question(&id).unwrap().options.as_ref().unwrap().len(), 3);
        assert_eq!(d.question(&id).unwrap().options.as_ref().unwrap()[2].label, "Option 3");
    }

    #[test]
    fn test_last_option_cannot_be_removed() {
        let mut d = draft_with_questions(&["Pick"]);
        let id = d.form.questions[0].id.clone();
        d.set_question_type(&id, QuestionType::Select);
        let opts: Vec<String> = d.question(&id).unwrap().options.iter().flatten().map(|o| o.id.clone()).collect();

        assert!(d.remove_option(&id, &opts[0]));
        assert!(!d.remove_option(&id, &opts[1]));
        assert!(!d.remove_option(&id, "missing"));
        assert_eq!(d.question(&id).unwrap().options.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_reorder_questions_and_options() {
        let mut d = draft_with_questions(&["A", "B", "C"]);
        assert!(d.reorder_questions(&[1, 0, 2]));
        assert_eq!(question_titles(&d), vec!["B", "A", "C"]);
        assert!(!d.reorder_questions(&[0, 1]));
        assert_eq!(question_titles(&d), vec!["B", "A", "C"]);

        let id = d.form.questions[0].id.clone();
        d.set_question_type(&id, QuestionType::Radio);
        d.add_option(&id);
        assert!(d.reorder_options(&id, &[0, 2, 1]));
        let labels: Vec<_> = d.question(&id).unwrap().options.iter().flatten().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Option 1", "Option 3", "Option 2"]);
        assert!(!d.reorder_options("nope", &[0]));
    }

    #[test]
    fn test_validation() {
        let mut d = FormDraft::new();
        d.form.title = "  ".into();
        assert_eq!(d.validate(), Err(ValidationError::MissingTitle));

        d.form.title = "Survey".into();
        assert_eq!(d.validate(), Err(ValidationError::NoQuestions));

        let a = d.add_question();
        let b = d.add_question();
        d.question_mut(&a).unwrap().title = "Name".into();
        assert_eq!(d.validate(), Err(ValidationError::UntitledQuestion(2)));

        d.question_mut(&b).unwrap().title = "Pick".into();
        d.set_question_type(&b, QuestionType::Select);
        d.question_mut(&b).unwrap().options.as_mut().unwrap()[1].label = "".into();
        assert_eq!(d.validate(), Err(ValidationError::BlankOption(2)));

        d.question_mut(&b).unwrap().options = Some(Vec::new());
        assert_eq!(d.validate(), Err(ValidationError::MissingOptions(2)));
        assert_eq!(ValidationError::MissingOptions(2).to_string(), "Question 2 needs at least one option");

        d.add_option(&b);
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_payload_drops_stale_options_and_fills_start_screen() {
        let mut d = draft_with_questions(&["Q"]);
        d.form.title = "Event signup".into();
        d.form.start_screen.title.clear();
        let id = d.form.questions[0].id.clone();
        d.set_question_type(&id, QuestionType::Radio);
        d.set_question_type(&id, QuestionType::Email);

        let form = d.to_payload().unwrap();
        assert_eq!(form.start_screen.title, "Event signup");
        assert!(form.questions[0].options.is_none());
        // the draft keeps them in case the type is switched back
        assert!(d.question(&id).unwrap().options.is_some());
    }

    #[test]
    fn test_duplicate_question_gets_fresh_ids() {
        let mut d = draft_with_questions(&["Color?", "Why?"]);
        let id = d.form.questions[0].id.clone();
        d.set_question_type(&id, QuestionType::Radio);
        d.question_mut(&id).unwrap().required = true;

        let copy_id = d.duplicate_question(&id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(question_titles(&d), vec!["Color?", "Color? (Copy)", "Why?"]);

        let original = d.question(&id).unwrap().clone();
        let copy = d.question(&copy_id).unwrap();
        assert!(copy.required);
        assert_eq!(copy.question_type, QuestionType::Radio);
        let (a, b) = (original.options.unwrap(), copy.options.clone().unwrap());
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_ne!(x.id, y.id);
            assert_eq!(x.value, y.value);
            assert_eq!(x.label, y.label);
        }
        assert_eq!(d.duplicate_question("missing"), None);
    }

    #[test]
    fn test_scale_types_seed_a_range() {
        let mut d = draft_with_questions(&["Score"]);
        let id = d.form.questions[0].id.clone();
        d.set_question_type(&id, QuestionType::Rating);
        let q = d.question(&id).unwrap();
        assert_eq!((q.min_value, q.max_value), (Some(1), Some(5)));

        // an existing range survives a switch between scale types
        d.question_mut(&id).unwrap().max_value = Some(7);
        d.set_question_type(&id, QuestionType::Slider);
        let q = d.question(&id).unwrap();
        assert_eq!((q.min_value, q.max_value), (Some(1), Some(7)));
    }

    #[test]
    fn test_inverted_limits_fail_validation() {
        let mut d = draft_with_questions(&["Age", "Bio"]);
        d.form.title = "Profile".into();
        let age = d.form.questions[0].id.clone();
        let bio = d.form.questions[1].id.clone();
        d.set_question_type(&age, QuestionType::Number);
        d.question_mut(&age).unwrap().min_value = Some(120);
        d.question_mut(&age).unwrap().max_value = Some(18);
        assert_eq!(d.validate(), Err(ValidationError::InvalidRange(1)));

        d.question_mut(&age).unwrap().max_value = None;
        d.question_mut(&bio).unwrap().min_length = Some(50);
        d.question_mut(&bio).unwrap().max_length = Some(10);
        assert_eq!(d.validate(), Err(ValidationError::InvalidRange(2)));

        // limits of a type that has none are ignored and dropped from the payload
        d.set_question_type(&bio, QuestionType::Email);
        assert_eq!(d.validate(), Ok(()));
        assert_eq!(d.to_payload().unwrap().questions[1].min_length, None);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(" 42 "), Some(42));
        assert_eq!(parse_limit("-3"), Some(-3));
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("ten"), None);
    }
}
