use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// One entry of a select/dropdown input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A small closed enum offered to the user as a dropdown.
///
/// The wire/form key comes from `strum` (`snake_case`); the label is the
/// human-facing text shown in tables and selects.
pub trait Choice:
    Copy + PartialEq + IntoEnumIterator + FromStr + Into<&'static str> + 'static
{
    fn label(&self) -> &'static str;

    fn key(self) -> &'static str {
        self.into()
    }

    fn options() -> Vec<SelectOption> {
        Self::iter()
            .map(|choice| SelectOption {
                value: choice.key(),
                label: choice.label(),
            })
            .collect()
    }
}
