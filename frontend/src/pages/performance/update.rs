//! Update function for the performance page.
//!
//! The auto-refresh timer is rebuilt from the policy after every policy change:
//! the old `Interval` is dropped first, which cancels it, so at most one timer
//! is ever live.

use admin_common::bootstrap::load_metrics;
use admin_common::model::record::{Clock, SystemClock};
use gloo_timers::callback::Interval;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::counter::HttpRecordCounter;
use super::messages::Msg;
use super::state::PerformancePage;
use crate::components::collection_editor::show_toast;

pub fn update(page: &mut PerformancePage, ctx: &Context<PerformancePage>, msg: Msg) -> bool {
    match msg {
        Msg::Refresh => {
            if page.loading {
                return false;
            }
            page.loading = true;
            collect(ctx, page);
            true
        }
        Msg::Loaded(snapshot) => {
            if !snapshot.is_live() && page.snapshot.as_ref().is_some_and(|s| s.is_live()) {
                show_toast("El servidor dejó de responder. Se muestran datos simulados.");
            }
            page.snapshot = Some(snapshot);
            page.loading = false;
            true
        }
        Msg::ToggleAutoRefresh(enabled) => {
            page.console.refresh.enabled = enabled;
            reschedule(page, ctx);
            true
        }
        Msg::SetInterval(secs) => match page.console.refresh.set_interval(secs) {
            Ok(()) => {
                reschedule(page, ctx);
                true
            }
            Err(errors) => {
                gloo_console::warn!(errors.to_string());
                show_toast("Intervalo no soportado.");
                false
            }
        },
    }
}

/// Counts every monitored table and reports the snapshot back to the page.
pub fn collect(ctx: &Context<PerformancePage>, page: &PerformancePage) {
    let link = ctx.link().clone();
    let console = page.console.clone();
    spawn_local(async move {
        let counter = HttpRecordCounter::new(console.clone());
        let tables = console.tables();
        let snapshot = load_metrics(&counter, &tables, js_sys::Math::random, SystemClock.now()).await;
        link.send_message(Msg::Loaded(snapshot));
    });
}

fn reschedule(page: &mut PerformancePage, ctx: &Context<PerformancePage>) {
    page.refresh_handle = None;
    if let Some(millis) = page.console.refresh.active_interval() {
        let link = ctx.link().clone();
        page.refresh_handle = Some(Interval::new(millis, move || link.send_message(Msg::Refresh)));
    }
}
