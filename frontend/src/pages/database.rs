//! Database administration: connections, saved queries, schemas, tables and migrations.

use admin_common::model::database::{DbConnection, DbSchema, DbTable, Migration, SavedQuery};
use admin_common::screens::database::{DatabaseAdminConfig, CONNECTIONS, MIGRATIONS, QUERIES, SCHEMAS, TABLES};
use yew::prelude::*;

use crate::components::collection_editor::CollectionEditorComponent;
use crate::components::tab_shell::{ShellPage, TabShell};

pub type DatabaseAdminPage = TabShell<DatabaseAdminConfig>;

type ConnectionEditor = CollectionEditorComponent<DatabaseAdminConfig, DbConnection>;
type QueryEditor = CollectionEditorComponent<DatabaseAdminConfig, SavedQuery>;
type SchemaEditor = CollectionEditorComponent<DatabaseAdminConfig, DbSchema>;
type TableEditor = CollectionEditorComponent<DatabaseAdminConfig, DbTable>;
type MigrationEditor = CollectionEditorComponent<DatabaseAdminConfig, Migration>;

impl ShellPage for DatabaseAdminConfig {
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html {
        let config = config.clone();
        match tab {
            tab if tab == CONNECTIONS.name => html! { <ConnectionEditor {config} lens={CONNECTIONS} {on_change} /> },
            tab if tab == QUERIES.name => html! { <QueryEditor {config} lens={QUERIES} {on_change} /> },
            tab if tab == SCHEMAS.name => html! { <SchemaEditor {config} lens={SCHEMAS} {on_change} /> },
            tab if tab == TABLES.name => html! { <TableEditor {config} lens={TABLES} {on_change} /> },
            tab if tab == MIGRATIONS.name => html! { <MigrationEditor {config} lens={MIGRATIONS} {on_change} /> },
            _ => html! {},
        }
    }
}
