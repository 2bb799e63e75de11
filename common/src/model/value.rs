//! Typed dynamic values for custom fields, template variables and settings maps.
//!
//! A value is always tagged with its kind, so consumers match exhaustively instead
//! of guessing what an untyped payload holds.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use crate::validation::{is_email, is_url};

/// Declared type of a dynamic field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    Select,
    Email,
    Url,
}

impl Choice for FieldType {
    fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Texto",
            FieldType::Number => "Número",
            FieldType::Boolean => "Sí/No",
            FieldType::Date => "Fecha",
            FieldType::Select => "Selección",
            FieldType::Email => "Correo",
            FieldType::Url => "URL",
        }
    }
}

/// A value of one of the primitive kinds, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    Choice(String),
    Email(String),
    Url(String),
}

impl FieldValue {
    /// Coerces raw form text into the value shape required by `field_type`.
    pub fn parse(field_type: FieldType, raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        match field_type {
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldType::Number => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| format!("\"{raw}\" no es un número válido")),
            FieldType::Boolean => parse_bool(raw)
                .map(FieldValue::Boolean)
                .ok_or_else(|| format!("\"{raw}\" no es un valor sí/no válido")),
            FieldType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| format!("\"{raw}\" no es una fecha AAAA-MM-DD")),
            FieldType::Select => Ok(FieldValue::Choice(raw.to_string())),
            FieldType::Email => {
                if is_email(raw) {
                    Ok(FieldValue::Email(raw.to_string()))
                } else {
                    Err(format!("\"{raw}\" no es un correo válido"))
                }
            }
            FieldType::Url => {
                if is_url(raw) {
                    Ok(FieldValue::Url(raw.to_string()))
                } else {
                    Err(format!("\"{raw}\" debe comenzar con http:// o https://"))
                }
            }
        }
    }

    /// Guesses the kind of an untyped settings entry: boolean, then number, else text.
    ///
    /// Only numbers written in their canonical form are inferred as numbers, so
    /// `0755` or `1e3` stay text and read back exactly as typed.
    pub fn infer(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(flag) = parse_bool(raw) {
            return FieldValue::Boolean(flag);
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() && n.to_string() == raw => FieldValue::Number(n),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    /// Whether the tag agrees with the declared field type.
    pub fn matches(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (FieldValue::Text(_), FieldType::Text)
                | (FieldValue::Number(_), FieldType::Number)
                | (FieldValue::Boolean(_), FieldType::Boolean)
                | (FieldValue::Date(_), FieldType::Date)
                | (FieldValue::Choice(_), FieldType::Select)
                | (FieldValue::Email(_), FieldType::Email)
                | (FieldValue::Url(_), FieldType::Url)
        )
    }

    /// Raw text suitable for pre-filling a form input.
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Boolean(flag) => flag.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) | FieldValue::Email(s) | FieldValue::Url(s) => {
                f.write_str(s)
            }
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Boolean(true) => f.write_str("Sí"),
            FieldValue::Boolean(false) => f.write_str("No"),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "sí" | "si" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_follows_declared_type() {
        assert_eq!(FieldValue::parse(FieldType::Number, " 42.5 "), Ok(FieldValue::Number(42.5)));
        assert_eq!(FieldValue::parse(FieldType::Boolean, "Sí"), Ok(FieldValue::Boolean(true)));
        assert!(FieldValue::parse(FieldType::Number, "abc").is_err());
        assert!(FieldValue::parse(FieldType::Email, "nobody").is_err());
        assert!(FieldValue::parse(FieldType::Url, "ftp://x").is_err());
        assert_eq!(
            FieldValue::parse(FieldType::Date, "2024-02-29"),
            Ok(FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
    }

    #[test]
    fn infer_prefers_bool_then_number() {
        assert_eq!(FieldValue::infer("true"), FieldValue::Boolean(true));
        assert_eq!(FieldValue::infer("9000"), FieldValue::Number(9000.0));
        assert_eq!(FieldValue::infer("eu-west-1"), FieldValue::Text("eu-west-1".into()));
        assert_eq!(FieldValue::infer("-2.5"), FieldValue::Number(-2.5));
    }

    #[test]
    fn infer_keeps_non_canonical_numbers_as_typed() {
        for raw in ["0755", "1e3", "+5", "5.0"] {
            let value = FieldValue::infer(raw);
            assert_eq!(value, FieldValue::Text(raw.into()));
            assert_eq!(value.to_input(), raw);
        }
    }

    #[test]
    fn matches_checks_tag_against_type() {
        assert!(FieldValue::Choice("a".into()).matches(FieldType::Select));
        assert!(!FieldValue::Text("a".into()).matches(FieldType::Select));
    }

    #[test]
    fn tagged_serialization() {
        let json = serde_json::to_value(FieldValue::Number(3.0)).unwrap();
        assert_eq!(json["kind"], "number");
        assert_eq!(json["value"], 3.0);
    }
}
