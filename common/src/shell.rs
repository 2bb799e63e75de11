//! Tab shell state.
//!
//! A screen owns one aggregate configuration (a fixed set of named collections),
//! shows stat cards derived from it and mounts the editor of the selected tab.
//! Editors hand back a whole new aggregate which replaces the old one as is.

use chrono::{DateTime, Utc};
use log::debug;

use crate::editor::{Collection, Entity, References};
use crate::model::record::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    /// Also the collection name the tab edits.
    pub id: &'static str,
    pub label: &'static str,
}

impl TabSpec {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub detail: Option<String>,
}

impl StatCard {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
            detail: None,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// "total" with "n activos" underneath.
    pub fn for_collection<T: Entity>(label: &'static str, collection: &Collection<T>) -> Self {
        let stats = collection.stats();
        Self::new(label, stats.total).detail(format!("{} activos", stats.active))
    }
}

/// Fixed-shape configuration owned by one screen.
pub trait Aggregate: Clone + PartialEq + Default + 'static {
    const TITLE: &'static str;

    fn tabs() -> Vec<TabSpec>;

    /// Derived purely from the configuration and the current instant.
    fn stats(&self, now: DateTime<Utc>) -> Vec<StatCard>;

    /// Labels of every collection other records may point at.
    fn references(&self) -> References;
}

/// Sample data a screen starts from.
pub trait Fixtures: Sized {
    fn fixtures(clock: &dyn Clock) -> Self;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellState<C: Aggregate> {
    config: C,
    selected_tab: &'static str,
    loading: bool,
}

impl<C: Aggregate> Default for ShellState<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Aggregate> ShellState<C> {
    /// Empty configuration, first tab selected, loading until populated.
    pub fn new() -> Self {
        Self {
            config: C::default(),
            selected_tab: C::tabs().first().map(|tab| tab.id).unwrap_or_default(),
            loading: true,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn selected_tab(&self) -> &'static str {
        self.selected_tab
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn finish_loading(&mut self, config: C) {
        self.config = config;
        self.loading = false;
        debug!("{} loaded", C::TITLE);
    }

    /// Wholesale replacement; the editor already built the full shape.
    pub fn on_configuration_change(&mut self, config: C) {
        self.config = config;
    }

    /// Unknown tab ids are ignored. Collection data is untouched either way.
    pub fn select_tab(&mut self, id: &str) -> bool {
        match C::tabs().into_iter().find(|tab| tab.id == id) {
            Some(tab) => {
                self.selected_tab = tab.id;
                true
            }
            None => false,
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Vec<StatCard> {
        self.config.stats(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::ManualClock;
    use crate::screens::backup::BackupConfig;

    #[test]
    fn starts_loading_on_first_tab() {
        let shell = ShellState::<BackupConfig>::new();
        assert!(shell.is_loading());
        assert_eq!(shell.selected_tab(), "schedules");
        assert_eq!(shell.config(), &BackupConfig::default());
    }

    #[test]
    fn tab_switch_keeps_configuration() {
        let clock = ManualClock::default();
        let mut shell = ShellState::<BackupConfig>::new();
        shell.finish_loading(BackupConfig::fixtures(&clock));
        let before = shell.config().clone();

        assert!(shell.select_tab("destinations"));
        assert!(!shell.select_tab("nowhere"));
        assert_eq!(shell.selected_tab(), "destinations");
        assert_eq!(shell.config(), &before);
        assert!(!shell.is_loading());
    }

    #[test]
    fn stat_card_for_collection() {
        let clock = ManualClock::default();
        let config = BackupConfig::fixtures(&clock);
        let card = StatCard::for_collection("Destinos", &config.destinations);
        assert_eq!(card.value, config.destinations.len().to_string());
        assert!(card.detail.unwrap().ends_with("activos"));
    }
}
