//! Custom field management: field definitions and their groups.

use admin_common::model::custom_field::{CustomField, FieldGroup};
use admin_common::screens::custom_fields::{CustomFieldConfig, FIELDS, GROUPS};
use yew::prelude::*;

use crate::components::collection_editor::CollectionEditorComponent;
use crate::components::tab_shell::{ShellPage, TabShell};

pub type CustomFieldsPage = TabShell<CustomFieldConfig>;

type FieldEditor = CollectionEditorComponent<CustomFieldConfig, CustomField>;
type GroupEditor = CollectionEditorComponent<CustomFieldConfig, FieldGroup>;

impl ShellPage for CustomFieldConfig {
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html {
        let config = config.clone();
        match tab {
            tab if tab == FIELDS.name => html! { <FieldEditor {config} lens={FIELDS} {on_change} /> },
            tab if tab == GROUPS.name => html! { <GroupEditor {config} lens={GROUPS} {on_change} /> },
            _ => html! {},
        }
    }
}
