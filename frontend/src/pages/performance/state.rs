//! State of the performance page.

use admin_common::config::ConsoleConfig;
use admin_common::model::metrics::MetricsSnapshot;
use gloo_timers::callback::Interval;

pub struct PerformancePage {
    /// API base, monitored tables and the auto-refresh policy.
    pub console: ConsoleConfig,

    /// Last collected metrics; `None` until the first load settles.
    pub snapshot: Option<MetricsSnapshot>,

    /// A collection is in flight. Refresh ticks are skipped meanwhile.
    pub loading: bool,

    /// Live auto-refresh timer. Dropping it cancels the timer.
    pub refresh_handle: Option<Interval>,

    /// Guard so the first load runs once.
    pub loaded: bool,
}

impl PerformancePage {
    pub fn new() -> Self {
        Self {
            console: ConsoleConfig::default(),
            snapshot: None,
            loading: true,
            refresh_handle: None,
            loaded: false,
        }
    }
}
