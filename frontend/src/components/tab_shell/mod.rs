//! Tab shell: the page frame shared by every tabbed admin screen.
//!
//! A shell owns one aggregate configuration through [`ShellState`]: it loads
//! the screen's fixtures once on first render, shows the stat cards and the tab
//! strip, and renders the editor of the selected tab. Editors report a whole new
//! aggregate, which replaces the old one wholesale.

use admin_common::shell::{Aggregate, Fixtures};
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::TabShell;

/// An aggregate that knows which editor renders each of its tabs.
pub trait ShellPage: Aggregate + Fixtures {
    /// Body of the tab `tab`. `on_change` receives the next full configuration.
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html;
}

impl<C: ShellPage> Component for TabShell<C> {
    type Message = Msg<C>;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        TabShell::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            update::load(ctx);
        }
    }
}
