//! Generic collection editor.
//!
//! One [`CollectionEditor`] manages one named collection of an aggregate
//! configuration: create/edit through a form, toggle, two-step delete, and a
//! derived search/sort/filter view. All mutations are synchronous and local;
//! after a successful mutation the owner publishes the new collection upward
//! with [`CollectionEditor::publish`].
//!
//! Submodules
//! - `entity`: the [`Entity`] type descriptor implemented by every record type.
//! - `collection`: the ordered, id-unique [`Collection`].
//! - `lens`: [`Lens`] naming one collection inside an aggregate.
//! - `query`: view-level search/sort/filter.
//! - `references`: labels for cross-collection ids.

mod collection;
mod entity;
mod lens;
mod query;
mod references;

use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

pub use collection::{Collection, CollectionStats};
pub use entity::{Entity, UPDATED_AT_COLUMN};
pub use lens::Lens;
pub use query::{ListQuery, SortDirection, SortSpec, SortValue, StatusFilter};
pub use references::{RefOption, References};

use crate::form::{FormData, FromForm, parse_draft};
use crate::model::record::{Clock, RecordId, RecordMeta, SystemClock};
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("no form is open")]
    FormClosed,
}

/// Whether the modal form is shown, and for which record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(RecordId),
}

pub struct CollectionEditor<T: Entity> {
    collection: Collection<T>,
    form: FormMode,
    errors: ValidationErrors,
    pending_delete: Option<RecordId>,
    pub query: ListQuery,
    clock: Arc<dyn Clock>,
}

impl<T: Entity> CollectionEditor<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self::with_clock(collection, Arc::new(SystemClock))
    }

    pub fn with_clock(collection: Collection<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection,
            form: FormMode::Closed,
            errors: ValidationErrors::new(),
            pending_delete: None,
            query: ListQuery::default(),
            clock,
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Filtered and sorted view for rendering. Never mutates the collection.
    pub fn list(&self) -> Vec<&T> {
        self.query.apply(self.collection.as_slice())
    }

    pub fn form_mode(&self) -> &FormMode {
        &self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form != FormMode::Closed
    }

    /// Record currently loaded in the edit form.
    pub fn editing(&self) -> Option<&T> {
        match &self.form {
            FormMode::Editing(id) => self.collection.get(id),
            _ => None,
        }
    }

    /// Values the open dialog starts from: the record being edited, or the
    /// entity's blank form.
    pub fn form_values(&self) -> FormData {
        match self.editing() {
            Some(record) => record.to_draft().to_form(),
            None => T::blank_form(),
        }
    }

    /// Field errors of the last rejected submission.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn open_create(&mut self) {
        self.form = FormMode::Creating;
        self.errors = ValidationErrors::new();
    }

    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        if !self.collection.contains(id) {
            return false;
        }
        self.form = FormMode::Editing(id.clone());
        self.errors = ValidationErrors::new();
        true
    }

    pub fn close_form(&mut self) {
        self.form = FormMode::Closed;
        self.errors = ValidationErrors::new();
    }

    /// Coerces and validates the form, then creates or updates depending on the
    /// form mode. On failure the form stays open and the errors are kept.
    pub fn submit(&mut self, form: &FormData) -> Result<RecordId, EditorError> {
        let result = match self.form.clone() {
            FormMode::Closed => Err(EditorError::FormClosed),
            FormMode::Creating => parse_draft::<T::Draft>(form)
                .map_err(EditorError::from)
                .and_then(|draft| self.create(draft)),
            FormMode::Editing(id) => parse_draft::<T::Draft>(form)
                .map_err(EditorError::from)
                .and_then(|draft| self.update(&id, draft)),
        };

        match &result {
            Ok(_) => self.close_form(),
            Err(EditorError::Invalid(errors)) => self.errors = errors.clone(),
            Err(_) => {}
        }
        result
    }

    pub fn create(&mut self, draft: T::Draft) -> Result<RecordId, EditorError> {
        self.check(&draft)?;

        let mut id = RecordId::generate();
        while self.collection.contains(&id) {
            id = RecordId::generate();
        }
        let meta = RecordMeta::new(id.clone(), self.clock.now());
        self.collection.push(T::from_draft(draft, meta));

        debug!("created {} {}", T::LABEL, id);
        Ok(id)
    }

    /// Merges the draft over the record in place; id, creation time and position
    /// are preserved and the update time advances.
    pub fn update(&mut self, id: &RecordId, draft: T::Draft) -> Result<RecordId, EditorError> {
        self.check(&draft)?;

        let now = self.clock.now();
        let record = self
            .collection
            .get_mut(id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        record.apply_draft(draft);
        record.meta_mut().touch(now);

        debug!("updated {} {}", T::LABEL, id);
        Ok(id.clone())
    }

    /// Returns `false` when the record is unknown or its status is terminal.
    pub fn toggle_active(&mut self, id: &RecordId) -> bool {
        let now = self.clock.now();
        let Some(record) = self.collection.get_mut(id) else {
            return false;
        };
        if !record.toggle_active() {
            return false;
        }
        record.meta_mut().touch(now);
        debug!("toggled {} {} -> {}", T::LABEL, id, record.status_label());
        true
    }

    /// Unconditional delete. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let removed = self.collection.remove(id);
        if removed {
            debug!("removed {} {}", T::LABEL, id);
            if matches!(&self.form, FormMode::Editing(editing) if editing == id) {
                self.close_form();
            }
        }
        removed
    }

    /// First step of a delete: remember the record awaiting confirmation.
    pub fn request_remove(&mut self, id: &RecordId) -> bool {
        if self.collection.contains(id) {
            self.pending_delete = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn pending_delete(&self) -> Option<&T> {
        self.pending_delete
            .as_ref()
            .and_then(|id| self.collection.get(id))
    }

    pub fn confirm_remove(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    pub fn cancel_remove(&mut self) {
        self.pending_delete = None;
    }

    /// Adopts a collection pushed down by the owner, dropping UI state that
    /// points at records that no longer exist.
    pub fn sync(&mut self, collection: Collection<T>) {
        self.collection = collection;
        if let FormMode::Editing(id) = &self.form {
            if !self.collection.contains(id) {
                self.close_form();
            }
        }
        if let Some(id) = &self.pending_delete {
            if !self.collection.contains(id) {
                self.pending_delete = None;
            }
        }
    }

    /// New aggregate equal to `config` except for this editor's collection.
    pub fn publish<C: Clone>(&self, lens: &Lens<C, T>, config: &C) -> C {
        lens.replace(config, self.collection.clone())
    }

    fn check(&self, draft: &T::Draft) -> Result<(), EditorError> {
        draft.validate().map_err(|errors| {
            warn!("rejected {} submission: {}", T::LABEL, errors);
            EditorError::Invalid(errors)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::email::{CategoryDraft, TemplateCategory};
    use crate::model::record::ManualClock;

    fn category_form(name: &str, color: &str) -> FormData {
        let mut form = FormData::new()
            .with("name", name)
            .with("color", color)
            .with("description", "");
        form.set_flag("is_active", true);
        form
    }

    fn editor() -> (CollectionEditor<TemplateCategory>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (CollectionEditor::with_clock(Collection::new(), clock.clone()), clock)
    }

    #[test]
    fn submit_without_open_form_is_rejected() {
        let (mut editor, _) = editor();
        assert_eq!(
            editor.submit(&category_form("Welcome", "#3B82F6")),
            Err(EditorError::FormClosed)
        );
        assert!(editor.collection().is_empty());
    }

    #[test]
    fn create_appends_with_fresh_identity() {
        let (mut editor, _) = editor();
        editor.open_create();
        let id = editor.submit(&category_form("Welcome", "#3B82F6")).unwrap();

        let created = editor.collection().get(&id).unwrap();
        assert_eq!(created.name, "Welcome");
        assert_eq!(created.color, "#3B82F6");
        assert!(created.is_active);
        assert_eq!(created.meta.created_at, created.meta.updated_at);
        assert!(!editor.is_form_open());
    }

    #[test]
    fn invalid_submission_keeps_form_open_with_errors() {
        let (mut editor, _) = editor();
        editor.open_create();
        let result = editor.submit(&category_form("Welcome", "blue"));

        assert!(matches!(result, Err(EditorError::Invalid(_))));
        assert!(editor.collection().is_empty());
        assert_eq!(editor.form_mode(), &FormMode::Creating);
        assert!(editor.errors().for_field("color").is_some());

        editor.close_form();
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn edit_merges_and_keeps_position() {
        let (mut editor, clock) = editor();
        editor.open_create();
        let first = editor.submit(&category_form("Alpha", "#111111")).unwrap();
        editor.open_create();
        editor.submit(&category_form("Beta", "#222222")).unwrap();

        let before = editor.collection().get(&first).unwrap().clone();
        clock.advance_secs(5);
        assert!(editor.open_edit(&first));
        editor.submit(&category_form("Alpha 2", "#333333")).unwrap();

        let after = editor.collection().as_slice()[0].clone();
        assert_eq!(after.meta.id, first);
        assert_eq!(after.name, "Alpha 2");
        assert_eq!(after.meta.created_at, before.meta.created_at);
        assert!(after.meta.updated_at > before.meta.updated_at);
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let (mut editor, _) = editor();
        let draft = CategoryDraft::new("Ghost", "#000000");
        assert_eq!(
            editor.update(&RecordId::new("nope"), draft),
            Err(EditorError::NotFound(RecordId::new("nope")))
        );
    }

    #[test]
    fn two_step_delete() {
        let (mut editor, _) = editor();
        editor.open_create();
        let id = editor.submit(&category_form("Gone", "#ABCDEF")).unwrap();

        assert!(editor.request_remove(&id));
        assert_eq!(editor.pending_delete().map(|c| c.name.as_str()), Some("Gone"));
        editor.cancel_remove();
        assert!(!editor.confirm_remove());
        assert_eq!(editor.collection().len(), 1);

        editor.request_remove(&id);
        assert!(editor.confirm_remove());
        assert!(editor.collection().is_empty());
        assert!(!editor.remove(&id));
        assert!(!editor.request_remove(&id));
    }

    #[test]
    fn toggle_flips_flag_and_refreshes_timestamp() {
        let (mut editor, clock) = editor();
        editor.open_create();
        let id = editor.submit(&category_form("Promo", "#ABCDEF")).unwrap();
        let before = editor.collection().get(&id).unwrap().meta.updated_at;

        clock.advance_secs(1);
        assert!(editor.toggle_active(&id));
        let toggled = editor.collection().get(&id).unwrap();
        assert!(!toggled.is_active);
        assert!(toggled.meta.updated_at > before);

        assert!(editor.toggle_active(&id));
        assert!(editor.collection().get(&id).unwrap().is_active);
        assert!(!editor.toggle_active(&RecordId::new("missing")));
    }

    #[test]
    fn sync_drops_stale_ui_state() {
        let (mut editor, _) = editor();
        editor.open_create();
        let id = editor.submit(&category_form("Soon gone", "#ABCDEF")).unwrap();
        editor.open_edit(&id);
        editor.request_remove(&id);

        editor.sync(Collection::new());
        assert!(!editor.is_form_open());
        assert!(editor.pending_delete().is_none());
    }
}
