//! Component state for the collection editor.

use std::marker::PhantomData;

use admin_common::editor::{CollectionEditor, Entity};
use admin_common::shell::Aggregate;
use yew::prelude::*;

use super::props::CollectionEditorProps;

/// Main state container for the `CollectionEditorComponent`.
///
/// Fields are `pub` because they are accessed by `view`, `update` and the dialogs.
pub struct CollectionEditorComponent<C: Aggregate, T: Entity> {
    /// Collection copy, form mode, field errors, pending delete and list query.
    pub editor: CollectionEditor<T>,

    /// The `<form>` inside the create/edit dialog; read on submit.
    pub form_ref: NodeRef,

    _config: PhantomData<C>,
}

impl<C: Aggregate, T: Entity> CollectionEditorComponent<C, T> {
    pub fn new(props: &CollectionEditorProps<C, T>) -> Self {
        Self {
            editor: CollectionEditor::new(props.lens.view(&props.config).clone()),
            form_ref: NodeRef::default(),
            _config: PhantomData,
        }
    }
}
