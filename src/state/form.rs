//! Form editing state types.
//!
//! This module contains the create/edit entry form: its fields, which one has
//! focus, the submitting flag, and the required-field checks run before
//! anything is sent.

use super::StateError;
use crate::tracker::{Entry, EntryDraft, Status};
use chrono::NaiveDate;
use tui_textarea::TextArea;

/// Date input format accepted by the form.
///
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Specifying the form fields in navigation order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Name,
    Date,
    Description,
    Status,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Date,
        FormField::Description,
        FormField::Status,
    ];

    /// Return the field after this one, wrapping around.
    ///
    pub fn next(self) -> FormField {
        let index = FormField::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FormField::ORDER[(index + 1) % FormField::ORDER.len()]
    }

    /// Return the field before this one, wrapping around.
    ///
    pub fn previous(self) -> FormField {
        let index = FormField::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        FormField::ORDER[(index + FormField::ORDER.len() - 1) % FormField::ORDER.len()]
    }

    /// Return the on-screen label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Full Name",
            FormField::Date => "Date of Entry",
            FormField::Description => "Task Description",
            FormField::Status => "Performance Status",
        }
    }
}

/// Houses input for one create or edit form.
///
pub struct EntryForm {
    name: String,
    date: String,
    description: TextArea<'static>,
    status: Status,
    focus: FormField,
    submitting: bool,
    initializing: bool,
    error: Option<String>,
}

impl Default for EntryForm {
    fn default() -> Self {
        EntryForm {
            name: String::new(),
            date: String::new(),
            description: TextArea::default(),
            status: Status::default(),
            focus: FormField::Name,
            submitting: false,
            initializing: false,
            error: None,
        }
    }
}

impl EntryForm {
    /// Return an empty form waiting for its target entry to load.
    ///
    pub fn initializing() -> Self {
        EntryForm {
            initializing: true,
            ..EntryForm::default()
        }
    }

    /// Fill every field from an existing entry and stop initializing.
    ///
    pub fn fill_from(&mut self, entry: &Entry) -> &mut Self {
        self.name = entry.employee_name.to_owned();
        self.date = entry.date.format(DATE_FORMAT).to_string();
        self.description = TextArea::new(
            entry
                .task_description
                .lines()
                .map(str::to_owned)
                .collect(),
        );
        self.status = entry.status;
        self.initializing = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn description_textarea(&mut self) -> &mut TextArea<'static> {
        &mut self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) -> &mut Self {
        self.submitting = submitting;
        self
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Move focus to the next field.
    ///
    pub fn focus_next(&mut self) -> &mut Self {
        self.focus = self.focus.next();
        self
    }

    /// Move focus to the previous field.
    ///
    pub fn focus_previous(&mut self) -> &mut Self {
        self.focus = self.focus.previous();
        self
    }

    /// Type a character into the focused text field. The status select
    /// ignores typing.
    ///
    pub fn push_char(&mut self, c: char) -> &mut Self {
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Date => self.date.push(c),
            FormField::Description => {
                self.description.insert_char(c);
            }
            FormField::Status => {}
        }
        self.error = None;
        self
    }

    /// Break the description onto a new line.
    ///
    pub fn new_line(&mut self) -> &mut Self {
        if self.focus == FormField::Description {
            self.description.insert_newline();
        }
        self
    }

    /// Delete the last character of the focused field.
    ///
    pub fn pop_char(&mut self) -> &mut Self {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Description => {
                self.description.delete_char();
            }
            FormField::Status => {}
        }
        self
    }

    /// Select the next status.
    ///
    pub fn next_status(&mut self) -> &mut Self {
        self.status = self.status.next();
        self
    }

    /// Select the previous status.
    ///
    pub fn previous_status(&mut self) -> &mut Self {
        self.status = self.status.previous();
        self
    }

    /// Check required fields and build the payload, recording the first
    /// problem found on the form.
    ///
    pub fn validate(&mut self) -> Result<EntryDraft, StateError> {
        let result = self.check();
        self.error = result.as_ref().err().map(|e| e.to_string());
        result
    }

    fn check(&self) -> Result<EntryDraft, StateError> {
        if self.name.trim().is_empty() {
            return Err(required(FormField::Name));
        }
        if self.date.trim().is_empty() {
            return Err(required(FormField::Date));
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            StateError::Validation(format!("{} must be YYYY-MM-DD", FormField::Date.label()))
        })?;
        let description = self.description();
        if description.trim().is_empty() {
            return Err(required(FormField::Description));
        }
        Ok(EntryDraft {
            employee_name: self.name.to_owned(),
            date,
            task_description: description,
            status: self.status,
        })
    }
}

fn required(field: FormField) -> StateError {
    StateError::Validation(format!("{} is required", field.label()))
}
