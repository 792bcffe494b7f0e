//! Field-level checks applied to request payloads before they reach the
//! service layer.

use crate::models::{CreatePersonalityRequest, UpdatePersonalityRequest};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

pub const NAME_LENGTH: RangeInclusive<usize> = 1..=100;
pub const HISTORY_LENGTH: RangeInclusive<usize> = 10..=5000;

/// Lowercase field name -> human readable violation.
pub type FieldErrors = BTreeMap<String, String>;

pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Collects at most one violation per field; the first one recorded wins.
#[derive(Default, Debug)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.reject(field, format!("the {} field is required", field.to_lowercase()));
        }
        self
    }

    /// Character count (not bytes) must fall inside `bounds`.
    pub fn length(&mut self, field: &str, value: &str, bounds: RangeInclusive<usize>) -> &mut Self {
        let count = value.chars().count();
        if count < *bounds.start() {
            self.reject(
                field,
                format!(
                    "the {} field must be at least {} characters long",
                    field.to_lowercase(),
                    bounds.start()
                ),
            );
        } else if count > *bounds.end() {
            self.reject(
                field,
                format!(
                    "the {} field must be at most {} characters long",
                    field.to_lowercase(),
                    bounds.end()
                ),
            );
        }
        self
    }

    /// Like [`Validator::length`], but skipped entirely for empty values.
    pub fn optional_length(
        &mut self,
        field: &str,
        value: Option<&str>,
        bounds: RangeInclusive<usize>,
    ) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.length(field, value, bounds),
            _ => self,
        }
    }

    fn reject(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_lowercase()).or_insert(message);
    }

    pub fn finish(&mut self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

impl Validate for CreatePersonalityRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("name", &self.name)
            .length("name", &self.name, NAME_LENGTH)
            .required("history", &self.history)
            .length("history", &self.history, HISTORY_LENGTH)
            .finish()
    }
}

impl Validate for UpdatePersonalityRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .optional_length("name", self.name.as_deref(), NAME_LENGTH)
            .optional_length("history", self.history.as_deref(), HISTORY_LENGTH)
            .finish()
    }
}
