//! Contact form with client-side validation
//!
//! Nothing is transmitted anywhere: a valid submission waits out a simulated
//! send, then the form resets.

use crate::constants::{FORM_SEND_MS, MAX_FIELD_INPUT_LENGTH, MAX_MESSAGE_INPUT_LENGTH};
use crate::scheduler::TimerService;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Subject => 2,
            Field::Message => 3,
        }
    }

    fn max_len(&self) -> usize {
        match self {
            Field::Message => MAX_MESSAGE_INPUT_LENGTH,
            _ => MAX_FIELD_INPUT_LENGTH,
        }
    }
}

/// Check one field's (untrimmed) value
pub fn validate_field(field: Field, value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    let chars = value.chars().count();

    match field {
        Field::Name if chars < 2 => Err("Name must be at least 2 characters long"),
        Field::Email if !EMAIL_RE.is_match(value) => Err("Please enter a valid email address"),
        Field::Subject if chars < 5 => Err("Subject must be at least 5 characters long"),
        Field::Message if chars < 10 => Err("Message must be at least 10 characters long"),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTask {
    SendComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Sending,
    /// A send is already in flight
    Busy,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: [FieldState; 4],
    focused: Field,
    state: FormState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        ContactForm {
            fields: Default::default(),
            focused: Field::Name,
            state: FormState::Editing,
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[field.index()]
    }

    pub fn focused(&self) -> Field {
        self.focused
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Type a character into the focused field; editing clears its error
    pub fn input(&mut self, c: char) {
        if self.state == FormState::Sending {
            return;
        }
        let field = self.focused;
        let state = &mut self.fields[field.index()];
        if state.value.chars().count() < field.max_len() {
            state.value.push(c);
        }
        state.error = None;
    }

    pub fn backspace(&mut self) {
        if self.state == FormState::Sending {
            return;
        }
        let state = &mut self.fields[self.focused.index()];
        state.value.pop();
        state.error = None;
    }

    /// Move focus to the next field, validating the one being left
    pub fn focus_next(&mut self) {
        let next = Field::ALL[(self.focused.index() + 1) % Field::ALL.len()];
        self.focus(next);
    }

    pub fn focus_previous(&mut self) {
        let len = Field::ALL.len();
        let previous = Field::ALL[(self.focused.index() + len - 1) % len];
        self.focus(previous);
    }

    pub fn focus(&mut self, field: Field) {
        if field != self.focused {
            self.blur();
            self.focused = field;
        }
    }

    fn blur(&mut self) {
        self.validate(self.focused);
    }

    fn validate(&mut self, field: Field) -> bool {
        let state = &mut self.fields[field.index()];
        match validate_field(field, &state.value) {
            Ok(()) => {
                state.error = None;
                true
            }
            Err(message) => {
                state.error = Some(message);
                false
            }
        }
    }

    /// Validate everything and start the simulated send if all fields pass
    pub fn submit<T>(&mut self, timers: &mut impl TimerService<T>) -> SubmitOutcome
    where
        T: From<ContactTask>,
    {
        if self.state == FormState::Sending {
            return SubmitOutcome::Busy;
        }

        // Validate every field so each one shows its own error
        let valid = Field::ALL
            .iter()
            .fold(true, |valid, field| self.validate(*field) && valid);

        if !valid {
            tracing::debug!("Contact form rejected: validation errors");
            return SubmitOutcome::Invalid;
        }

        tracing::info!(
            "Contact form submitted: subject='{}'",
            self.field(Field::Subject).value.trim()
        );
        self.state = FormState::Sending;
        timers.set_timeout(FORM_SEND_MS, ContactTask::SendComplete.into());
        SubmitOutcome::Sending
    }

    /// Finish the simulated send. Returns true when the form was reset.
    pub fn handle(&mut self, task: ContactTask) -> bool {
        match task {
            ContactTask::SendComplete if self.state == FormState::Sending => {
                *self = ContactForm::new();
                true
            }
            ContactTask::SendComplete => false,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }
}
