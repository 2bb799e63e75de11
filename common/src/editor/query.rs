//! View-level search, sort and status filtering.
//!
//! The query never touches the underlying collection; [`ListQuery::apply`]
//! returns a freshly ordered list of borrows on every call.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn key(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }

    fn admits(self, active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
        }
    }
}

/// Comparable projection of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => collate(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Date(a), SortValue::Date(b)) => {
                a.timestamp_millis().cmp(&b.timestamp_millis())
            }
            _ => Ordering::Equal,
        }
    }
}

/// User-chosen search/sort/filter state of one editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    pub needle: String,
    pub sort: Option<SortSpec>,
    pub status: StatusFilter,
}

impl ListQuery {
    /// Sorting by the current key flips the direction, a new key starts ascending.
    pub fn sort_by(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortSpec {
                key: current.key,
                direction: current.direction.flipped(),
            },
            _ => SortSpec {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    pub fn apply<'a, T: Entity>(&self, records: &'a [T]) -> Vec<&'a T> {
        let needle = fold(self.needle.trim());
        let mut view: Vec<&T> = records
            .iter()
            .filter(|record| self.status.admits(record.is_active()))
            .filter(|record| {
                needle.is_empty()
                    || record
                        .search_text()
                        .iter()
                        .any(|text| fold(text).contains(&needle))
            })
            .collect();

        if let Some(sort) = &self.sort {
            view.sort_by(|a, b| {
                let ordering = match (sort_value(*a, &sort.key), sort_value(*b, &sort.key)) {
                    (Some(x), Some(y)) => x.compare(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        view
    }
}

fn sort_value<T: Entity>(record: &T, key: &str) -> Option<SortValue> {
    match key {
        "createdAt" => Some(SortValue::Date(record.meta().created_at)),
        "updatedAt" => Some(SortValue::Date(record.meta().updated_at)),
        _ => record.sort_value(key),
    }
}

/// Case and accent folding used for search and text ordering.
fn fold(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collation_ignores_case_and_accents() {
        assert_eq!(collate("árbol", "Arbol"), Ordering::Greater);
        assert_eq!(collate("avión", "Avion"), Ordering::Greater);
        assert_eq!(collate("Éxito", "examen"), Ordering::Greater);
        assert_eq!(collate("beta", "Álamo"), Ordering::Greater);
    }

    #[test]
    fn sort_by_same_key_flips_direction() {
        let mut query = ListQuery::default();
        query.sort_by("name");
        assert_eq!(query.direction_of("name"), Some(SortDirection::Ascending));
        query.sort_by("name");
        assert_eq!(query.direction_of("name"), Some(SortDirection::Descending));
        query.sort_by("createdAt");
        assert_eq!(query.direction_of("name"), None);
        assert_eq!(query.direction_of("createdAt"), Some(SortDirection::Ascending));
    }

    #[test]
    fn status_filter_keys_round_trip() {
        for filter in [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive] {
            assert_eq!(StatusFilter::from_key(filter.key()), filter);
        }
    }
}
