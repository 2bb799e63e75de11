//! Validation contract for submitted form data.
//!
//! Every draft type implements [`Validate`]. Rules are accumulated with the
//! [`Rules`] builder so a single submission reports every failing field at once;
//! the form renders the messages next to their inputs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-F]{6}$").expect("hex color pattern is valid"));

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("identifier pattern is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

static TIME_OF_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time of day pattern is valid")
});

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Only absolute http(s) URLs are accepted.
pub fn is_url(value: &str) -> bool {
    value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.contains(char::is_whitespace))
}

/// A single failed constraint, attached to the form field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All constraint failures of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

/// Schema check run on a draft before it is committed to a collection.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulating rule checker.
#[derive(Debug, Default)]
pub struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(field, message);
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, !value.trim().is_empty(), "Este campo es obligatorio")
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors
                .push(field, format!("Máximo {max} caracteres"));
        }
        self
    }

    pub fn hex_color(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            field,
            HEX_COLOR_RE.is_match(value),
            "Color inválido, use el formato #RRGGBB en mayúsculas",
        )
    }

    pub fn identifier(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            field,
            IDENTIFIER_RE.is_match(value),
            "Use minúsculas, números y guiones bajos, comenzando por una letra",
        )
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, is_email(value), "Correo electrónico inválido")
    }

    pub fn url(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, is_url(value), "Debe comenzar con http:// o https://")
    }

    pub fn time_of_day(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, TIME_OF_DAY_RE.is_match(value), "Use el formato HH:MM")
    }

    pub fn pattern(&mut self, field: &str, value: &str, re: &Regex, message: &str) -> &mut Self {
        self.check(field, re.is_match(value), message)
    }

    pub fn in_range(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min || value > max {
            self.errors
                .push(field, format!("Debe estar entre {min} y {max}"));
        }
        self
    }

    pub fn merge(&mut self, other: ValidationErrors) -> &mut Self {
        self.errors.extend(other);
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        std::mem::take(&mut self.errors).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_requires_uppercase_six_digits() {
        assert!(Rules::new().hex_color("color", "#3B82F6").finish().is_ok());
        assert!(Rules::new().hex_color("color", "#3b82f6").finish().is_err());
        assert!(Rules::new().hex_color("color", "blue").finish().is_err());
        assert!(Rules::new().hex_color("color", "#3B82F").finish().is_err());
    }

    #[test]
    fn errors_accumulate_per_field() {
        let errors = Rules::new()
            .required("name", "   ")
            .in_range("port", 70000, 1, 65535)
            .time_of_day("time", "24:00")
            .finish()
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_field("name"), Some("Este campo es obligatorio"));
        assert!(errors.for_field("port").is_some());
        assert!(errors.for_field("missing").is_none());
    }

    #[test]
    fn identifier_rejects_leading_digit_and_caps() {
        assert!(Rules::new().identifier("key", "first_name").finish().is_ok());
        assert!(Rules::new().identifier("key", "1name").finish().is_err());
        assert!(Rules::new().identifier("key", "FirstName").finish().is_err());
    }

    #[test]
    fn email_and_url_shapes() {
        assert!(is_email("ana@example.com"));
        assert!(!is_email("ana@example"));
        assert!(is_url("https://crm.example.com/unsubscribe"));
        assert!(!is_url("https://"));
        assert!(!is_url("ftp://files"));
    }

    #[test]
    fn display_lists_all_failures() {
        let errors = Rules::new()
            .required("a", "")
            .max_len("b", "abcdef", 3)
            .finish()
            .unwrap_err();
        let text = errors.to_string();
        assert!(text.contains("a: Este campo es obligatorio"));
        assert!(text.contains("b: Máximo 3 caracteres"));
    }
}
