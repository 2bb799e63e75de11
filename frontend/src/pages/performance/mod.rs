//! Performance monitoring page.
//!
//! Counts rows in the monitored CRM tables through the backend and derives size
//! and cache estimates from them. When every count fails the page switches to
//! simulated numbers and says so in a banner. Counts can be refreshed by hand
//! or on a user-chosen interval.

use yew::prelude::*;

mod counter;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::PerformancePage;

impl Component for PerformancePage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        PerformancePage::new()
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
            update::collect(ctx, self);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // Cancels the auto-refresh timer.
        self.refresh_handle.take();
    }
}
