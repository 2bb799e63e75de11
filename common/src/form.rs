//! Form surface shared by every entity editor.
//!
//! A submitted form is a flat `name -> text` map ([`FormData`]). Drafts are built
//! from it through a [`FormReader`], which coerces numbers, enums, references and
//! dates while collecting coercion failures as field errors. Rendering is driven by
//! [`FieldSpec`] (inputs) and [`ColumnSpec`] (table columns) descriptors.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::choice::{Choice, SelectOption};
use crate::model::record::RecordId;
use crate::validation::{Validate, ValidationErrors};

/// Format produced by `<input type="datetime-local">`.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Flat key/value payload of a submitted form. Unchecked checkboxes are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Records a checkbox the way a browser would: present when checked.
    pub fn set_flag(&mut self, name: &str, checked: bool) {
        if checked {
            self.insert(name, "on");
        } else {
            self.values.remove(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Coerces [`FormData`] into typed values, remembering what failed.
pub struct FormReader<'a> {
    form: &'a FormData,
    errors: ValidationErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a FormData) -> Self {
        Self {
            form,
            errors: ValidationErrors::new(),
        }
    }

    /// Trimmed text, empty when the field is absent.
    pub fn text(&self, name: &str) -> String {
        self.form.get(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// Text kept verbatim (code areas keep their indentation).
    pub fn raw(&self, name: &str) -> String {
        self.form.get(name).unwrap_or_default().to_string()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|s| !s.is_empty())
    }

    pub fn checkbox(&self, name: &str) -> bool {
        matches!(self.form.get(name), Some("on" | "true" | "1"))
    }

    /// A required number. Missing or unparsable input records an error.
    pub fn number<N: FromStr + Default>(&mut self, name: &str) -> N {
        match self.optional_number(name) {
            Some(n) => n,
            None => {
                if self.text(name).is_empty() && self.errors.for_field(name).is_none() {
                    self.errors.push(name, "Este campo es obligatorio");
                }
                N::default()
            }
        }
    }

    pub fn optional_number<N: FromStr>(&mut self, name: &str) -> Option<N> {
        let raw = self.text(name);
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<N>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.errors.push(name, format!("\"{raw}\" no es un número válido"));
                None
            }
        }
    }

    /// One of the enum's keys; falls back to `fallback` and records an error otherwise.
    pub fn choice<C: Choice>(&mut self, name: &str, fallback: C) -> C {
        let raw = self.text(name);
        match C::from_str(&raw) {
            Ok(choice) => choice,
            Err(_) => {
                self.errors.push(name, "Seleccione una opción válida");
                fallback
            }
        }
    }

    /// A cross-collection reference; the empty option means "none".
    pub fn reference(&self, name: &str) -> Option<RecordId> {
        self.optional_text(name).map(RecordId::new)
    }

    pub fn optional_datetime(&mut self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.optional_text(name)?;
        match NaiveDateTime::parse_from_str(&raw, DATETIME_INPUT_FORMAT) {
            Ok(naive) => Some(naive.and_utc()),
            Err(_) => {
                self.errors.push(name, "Fecha y hora inválidas");
                None
            }
        }
    }

    pub fn datetime(&mut self, name: &str) -> DateTime<Utc> {
        match self.optional_datetime(name) {
            Some(value) => value,
            None => {
                if self.errors.for_field(name).is_none() {
                    self.errors.push(name, "Este campo es obligatorio");
                }
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }

    /// Comma separated list, blanks dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.text(name)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// One entry per non-blank line.
    pub fn lines(&self, name: &str) -> Vec<String> {
        self.raw(name)
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.push(name, message);
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// Partial record built from a submitted form.
pub trait FromForm: Sized {
    fn from_form(reader: &mut FormReader<'_>) -> Self;

    /// Inverse direction, used to pre-fill the edit form.
    fn to_form(&self) -> FormData;
}

/// Coerces then validates. Coercion messages win over rule messages for the same field.
pub fn parse_draft<D: FromForm + Validate>(form: &FormData) -> Result<D, ValidationErrors> {
    let mut reader = FormReader::new(form);
    let draft = D::from_form(&mut reader);
    let mut errors = reader.into_errors();

    if let Err(rule_errors) = draft.validate() {
        for error in rule_errors.iter() {
            if errors.for_field(&error.field).is_none() {
                errors.push(&error.field, error.message.clone());
            }
        }
    }

    errors.into_result().map(|()| draft)
}

/// Formats an instant for a `datetime-local` input.
pub fn datetime_input(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_INPUT_FORMAT).to_string()
}

/// Kind of input rendered for a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Text,
    TextArea { rows: u32 },
    /// Monospace area for HTML or SQL.
    Code { rows: u32 },
    Number { min: Option<i64>, max: Option<i64> },
    Checkbox,
    Color,
    DateTime,
    Time,
    Select(Vec<SelectOption>),
    /// Dropdown over the records of a sibling collection.
    Reference { collection: &'static str, optional: bool },
}

/// Descriptor of one form input.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            required: false,
            placeholder: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Text)
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Checkbox)
    }

    pub fn select<C: Choice>(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, InputKind::Select(C::options())).required()
    }

    pub fn reference(name: &'static str, label: &'static str, collection: &'static str) -> Self {
        Self::new(
            name,
            label,
            InputKind::Reference {
                collection,
                optional: false,
            },
        )
        .required()
    }

    pub fn optional_reference(
        name: &'static str,
        label: &'static str,
        collection: &'static str,
    ) -> Self {
        Self::new(
            name,
            label,
            InputKind::Reference {
                collection,
                optional: true,
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Descriptor of one list/table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub header: &'static str,
    pub sortable: bool,
}

impl ColumnSpec {
    pub const fn sortable(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: true,
        }
    }

    pub const fn plain(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            sortable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::FieldType;
    use crate::validation::Rules;

    #[derive(Debug)]
    struct Probe {
        name: String,
        port: i64,
        kind: FieldType,
    }

    impl FromForm for Probe {
        fn from_form(reader: &mut FormReader<'_>) -> Self {
            Probe {
                name: reader.text("name"),
                port: reader.number("port"),
                kind: reader.choice("kind", FieldType::Text),
            }
        }

        fn to_form(&self) -> FormData {
            FormData::new()
                .with("name", &self.name)
                .with("port", self.port.to_string())
                .with("kind", self.kind.key())
        }
    }

    impl Validate for Probe {
        fn validate(&self) -> Result<(), ValidationErrors> {
            Rules::new()
                .required("name", &self.name)
                .in_range("port", self.port, 1, 65535)
                .finish()
        }
    }

    #[test]
    fn coercion_errors_take_precedence() {
        let form = FormData::new()
            .with("name", "")
            .with("port", "eighty")
            .with("kind", "number");
        let errors = parse_draft::<Probe>(&form).unwrap_err();

        assert_eq!(errors.for_field("port"), Some("\"eighty\" no es un número válido"));
        assert_eq!(errors.for_field("name"), Some("Este campo es obligatorio"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn valid_form_yields_draft() {
        let form = FormData::new()
            .with("name", "  primary ")
            .with("port", "5432")
            .with("kind", "date");
        let probe = parse_draft::<Probe>(&form).unwrap();

        assert_eq!(probe.name, "primary");
        assert_eq!(probe.port, 5432);
        assert_eq!(probe.kind, FieldType::Date);
        assert_eq!(probe.to_form().get("kind"), Some("date"));
    }

    #[test]
    fn unknown_choice_is_reported() {
        let form = FormData::new().with("name", "x").with("port", "1").with("kind", "blob");
        let errors = parse_draft::<Probe>(&form).unwrap_err();
        assert!(errors.for_field("kind").is_some());
    }

    #[test]
    fn readers_for_lists_flags_and_dates() {
        let mut form = FormData::new()
            .with("tags", "vip, , nuevo ")
            .with("when", "2024-06-01T08:30");
        form.set_flag("ssl", true);
        let mut reader = FormReader::new(&form);

        assert_eq!(reader.list("tags"), vec!["vip", "nuevo"]);
        assert!(reader.checkbox("ssl"));
        assert!(!reader.checkbox("missing"));
        let when = reader.datetime("when");
        assert_eq!(datetime_input(&when), "2024-06-01T08:30");
        assert!(reader.into_errors().is_empty());
    }
}
