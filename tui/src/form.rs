//! Two-field task form with client-side validation.
//!
//! Backs both the create form and the edit form. Validation runs before
//! any network call: a form with an empty (or whitespace-only) title or
//! description never produces a request, it shows a message next to the
//! offending field instead.

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

#[derive(Debug)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub focus: Field,
    pub title_error: Option<&'static str>,
    pub description_error: Option<&'static str>,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            focus: Field::Title,
            title_error: None,
            description_error: None,
        }
    }

    /// Pre-fill with an existing task's fields (edit mode).
    pub fn prefill(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Self::new()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        };
    }

    pub fn push(&mut self, c: char) {
        match self.focus {
            Field::Title => self.title.push(c),
            Field::Description => self.description.push(c),
        }
    }

    pub fn pop(&mut self) {
        match self.focus {
            Field::Title => self.title.pop(),
            Field::Description => self.description.pop(),
        };
    }

    /// Check both fields, record per-field messages, and report whether the
    /// form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.title_error = if self.title.trim().is_empty() {
            Some(TITLE_REQUIRED)
        } else {
            None
        };
        self.description_error = if self.description.trim().is_empty() {
            Some(DESCRIPTION_REQUIRED)
        } else {
            None
        };
        self.title_error.is_none() && self.description_error.is_none()
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}
