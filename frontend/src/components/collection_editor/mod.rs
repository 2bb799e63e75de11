//! Generic collection editor: one Yew component that lists, filters, creates,
//! edits, toggles and deletes the records of any [`Entity`] collection held by an
//! aggregate configuration.
//!
//! Responsibilities
//! - Own a [`CollectionEditor`](admin_common::editor::CollectionEditor) seeded
//!   from `props.lens.view(&props.config)`.
//! - Publish every successful mutation upward through `on_change` with the whole
//!   aggregate rebuilt by the lens, so sibling collections pass through untouched.
//! - Adopt whatever collection the parent pushes back down (`changed`).
//!
//! Nothing here talks to a server; persistence belongs to whoever owns `on_change`.

use admin_common::editor::Entity;
use admin_common::shell::Aggregate;
use yew::prelude::*;

mod dialogs;
mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use helpers::show_toast;
pub use messages::Msg;
pub use props::CollectionEditorProps;
pub use state::CollectionEditorComponent;

impl<C: Aggregate, T: Entity> Component for CollectionEditorComponent<C, T> {
    type Message = Msg;
    type Properties = CollectionEditorProps<C, T>;

    fn create(ctx: &Context<Self>) -> Self {
        CollectionEditorComponent::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        let incoming = props.lens.view(&props.config);
        if self.editor.collection() != incoming {
            self.editor.sync(incoming.clone());
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
