use std::fmt::Debug;

use crate::editor::query::SortValue;
use crate::editor::references::References;
use crate::form::{ColumnSpec, FieldSpec, FormData, FromForm};
use crate::model::record::{RecordId, RecordMeta};
use crate::validation::Validate;

/// Last-modified column every editor table appends after the entity's own columns.
pub const UPDATED_AT_COLUMN: ColumnSpec = ColumnSpec::sortable("updatedAt", "Actualizado");

/// Type descriptor of a record managed by a [`CollectionEditor`](super::CollectionEditor).
///
/// Implementors describe their form inputs, table columns and draft conversions;
/// the editor supplies everything else (ids, timestamps, list/sort/filter,
/// confirmation, upward publication).
pub trait Entity: Clone + PartialEq + Debug + 'static {
    /// Partial record produced by the form.
    type Draft: FromForm + Validate + Clone + Debug;

    /// Singular noun used in titles and messages ("plantilla").
    const LABEL: &'static str;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> &RecordId {
        &self.meta().id
    }

    /// Name shown in confirmations and reference dropdowns.
    fn display_name(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Flips the active flag, or advances a status cycle.
    ///
    /// Returns `false` when nothing changed (terminal status).
    fn toggle_active(&mut self) -> bool;

    fn status_label(&self) -> &'static str {
        if self.is_active() { "Activo" } else { "Inactivo" }
    }

    /// Textual fields matched by the search box.
    fn search_text(&self) -> Vec<&str>;

    /// Value compared when sorting by `key`. `createdAt`/`updatedAt` are handled
    /// by the editor.
    fn sort_value(&self, key: &str) -> Option<SortValue>;

    /// Builds a new record; defaulted sub-objects are filled here.
    fn from_draft(draft: Self::Draft, meta: RecordMeta) -> Self;

    /// Overwrites the editable fields. Must leave `meta` alone.
    fn apply_draft(&mut self, draft: Self::Draft);

    fn to_draft(&self) -> Self::Draft;

    /// Values a create dialog opens with.
    fn blank_form() -> FormData {
        let mut form = FormData::new();
        form.set_flag("is_active", true);
        form
    }

    fn form_fields() -> Vec<FieldSpec>;

    /// Entity-specific columns. [`UPDATED_AT_COLUMN`] is added by the table.
    fn columns() -> Vec<ColumnSpec>;

    /// Rendered text of one column. Dangling references fall back to a label.
    fn cell(&self, key: &str, refs: &References) -> String;
}
