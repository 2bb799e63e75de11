use std::collections::BTreeMap;

use crate::model::record::RecordId;

/// A record of a sibling collection that can be picked in a reference dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefOption {
    pub id: RecordId,
    pub label: String,
}

/// Labels of records other collections may point at, keyed by collection name.
///
/// Lookups never fail: a dangling id simply has no label and the caller shows
/// its fallback text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    by_collection: BTreeMap<&'static str, Vec<RefOption>>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, collection: &'static str, options: Vec<RefOption>) -> Self {
        self.by_collection.insert(collection, options);
        self
    }

    pub fn options(&self, collection: &str) -> &[RefOption] {
        self.by_collection
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn label(&self, collection: &str, id: &RecordId) -> Option<&str> {
        self.options(collection)
            .iter()
            .find(|option| &option.id == id)
            .map(|option| option.label.as_str())
    }

    /// Label of an optional reference: `none` when unset, `unknown` when dangling.
    pub fn describe(
        &self,
        collection: &str,
        id: Option<&RecordId>,
        none: &str,
        unknown: &str,
    ) -> String {
        match id {
            None => none.to_string(),
            Some(id) => self.label(collection, id).unwrap_or(unknown).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dangling_reference_falls_back() {
        let refs = References::new().with(
            "connections",
            vec![RefOption {
                id: RecordId::new("c1"),
                label: "Producción".into(),
            }],
        );

        assert_eq!(refs.label("connections", &RecordId::new("c1")), Some("Producción"));
        assert_eq!(
            refs.describe("connections", Some(&RecordId::new("gone")), "-", "Conexión desconocida"),
            "Conexión desconocida"
        );
        assert_eq!(refs.describe("connections", None, "Ninguna", "?"), "Ninguna");
        assert!(refs.options("schemas").is_empty());
    }
}
