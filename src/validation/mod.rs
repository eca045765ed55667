//! Model state and entity validation
//!
//! A [`ModelState`] collects problems found while binding or patching a
//! resource. Handlers check [`ModelState::is_valid`] and answer 400 with the
//! collected messages when it is not.

use std::collections::BTreeMap;

/// Field keyed validation messages for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Implemented by resources that have rules beyond what deserialization checks.
pub trait Validate {
    fn validate(&self, state: &mut ModelState);
}

/// Record an error under `key` if `value` is blank or longer than `max` characters.
pub fn require_text(state: &mut ModelState, key: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        state.add_error(key, format!("The {} field is required.", key));
    } else {
        check_length(state, key, value, max);
    }
}

/// Record an error under `key` if `value` is longer than `max` characters.
pub fn check_length(state: &mut ModelState, key: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        state.add_error(
            key,
            format!("The field {} must be a string with a maximum length of {}.", key, max),
        );
    }
}
