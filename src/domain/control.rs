//! Bound form-control state shared by the field widgets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Validation errors keyed by validator name (e.g. `required`)
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldStatus {
    #[default]
    Valid,
    Invalid,
    Disabled,
}

/// A single bound value plus its validation and interaction flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldControl<T> {
    value: Option<T>,
    errors: Option<FieldErrors>,
    required: bool,
    touched: bool,
    disabled: bool,
}

impl<T> Default for FieldControl<T> {
    fn default() -> Self {
        Self {
            value: None,
            errors: None,
            required: false,
            touched: false,
            disabled: false,
        }
    }
}

impl<T: Clone + PartialEq> FieldControl<T> {
    pub fn new(value: Option<T>) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self.validate();
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Writes the value and re-runs validation.
    /// Returns whether the stored value actually changed.
    pub fn set_value(&mut self, value: Option<T>) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.validate();
        true
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    /// Overrides the current errors, as done when mirroring another control.
    pub fn set_errors(&mut self, errors: Option<FieldErrors>) {
        self.errors = errors.filter(|e| !e.is_empty());
    }

    pub fn status(&self) -> FieldStatus {
        if self.disabled {
            FieldStatus::Disabled
        } else if self.errors.is_some() {
            FieldStatus::Invalid
        } else {
            FieldStatus::Valid
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn validate(&mut self) {
        if self.required && self.value.is_none() {
            let mut errors = FieldErrors::new();
            errors.insert("required".to_string(), "This field is required".to_string());
            self.errors = Some(errors);
        } else {
            self.errors = None;
        }
    }
}
