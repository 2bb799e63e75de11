//! Maintenance mode: scheduled windows and user-facing notices.

use admin_common::model::maintenance::{MaintenanceNotice, MaintenanceWindow};
use admin_common::screens::maintenance::{MaintenanceConfig, NOTICES, WINDOWS};
use yew::prelude::*;

use crate::components::collection_editor::CollectionEditorComponent;
use crate::components::tab_shell::{ShellPage, TabShell};

pub type MaintenancePage = TabShell<MaintenanceConfig>;

type WindowEditor = CollectionEditorComponent<MaintenanceConfig, MaintenanceWindow>;
type NoticeEditor = CollectionEditorComponent<MaintenanceConfig, MaintenanceNotice>;

impl ShellPage for MaintenanceConfig {
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html {
        let config = config.clone();
        match tab {
            tab if tab == WINDOWS.name => html! { <WindowEditor {config} lens={WINDOWS} {on_change} /> },
            tab if tab == NOTICES.name => html! { <NoticeEditor {config} lens={NOTICES} {on_change} /> },
            _ => html! {},
        }
    }
}
