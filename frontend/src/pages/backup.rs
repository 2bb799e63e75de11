//! Backup configuration: schedules and destinations.

use admin_common::model::backup::{BackupDestination, BackupSchedule};
use admin_common::screens::backup::{BackupConfig, DESTINATIONS, SCHEDULES};
use yew::prelude::*;

use crate::components::collection_editor::CollectionEditorComponent;
use crate::components::tab_shell::{ShellPage, TabShell};

pub type BackupPage = TabShell<BackupConfig>;

type ScheduleEditor = CollectionEditorComponent<BackupConfig, BackupSchedule>;
type DestinationEditor = CollectionEditorComponent<BackupConfig, BackupDestination>;

impl ShellPage for BackupConfig {
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html {
        let config = config.clone();
        match tab {
            tab if tab == SCHEDULES.name => html! { <ScheduleEditor {config} lens={SCHEDULES} {on_change} /> },
            tab if tab == DESTINATIONS.name => html! { <DestinationEditor {config} lens={DESTINATIONS} {on_change} /> },
            _ => html! {},
        }
    }
}
