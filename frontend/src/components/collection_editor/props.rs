//! Defines the properties for the `CollectionEditorComponent`.
//!
//! The editor never owns the aggregate: it receives the whole configuration, a
//! lens naming the collection it edits, and a callback to hand back the next
//! configuration after each successful mutation.

use admin_common::editor::{Entity, Lens};
use admin_common::shell::Aggregate;
use yew::prelude::*;

/// Properties for the `CollectionEditorComponent`.
#[derive(Properties, PartialEq)]
pub struct CollectionEditorProps<C: Aggregate, T: Entity> {
    /// Current aggregate. Also the source of reference labels for cells and
    /// dropdowns that point into sibling collections.
    pub config: C,

    /// Which collection of `config` this editor manages.
    pub lens: Lens<C, T>,

    /// Receives `lens.replace(&config, next_collection)` after every create,
    /// update, toggle and confirmed delete. Never called for rejected input.
    pub on_change: Callback<C>,
}
