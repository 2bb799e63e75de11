//! Email template management: templates, categories, variables and campaigns.

use admin_common::model::email::{Campaign, EmailTemplate, TemplateCategory, TemplateVariable};
use admin_common::screens::email::{EmailTemplateConfig, CAMPAIGNS, CATEGORIES, TEMPLATES, VARIABLES};
use yew::prelude::*;

use crate::components::collection_editor::CollectionEditorComponent;
use crate::components::tab_shell::{ShellPage, TabShell};

pub type EmailTemplatesPage = TabShell<EmailTemplateConfig>;

type TemplateEditor = CollectionEditorComponent<EmailTemplateConfig, EmailTemplate>;
type CategoryEditor = CollectionEditorComponent<EmailTemplateConfig, TemplateCategory>;
type VariableEditor = CollectionEditorComponent<EmailTemplateConfig, TemplateVariable>;
type CampaignEditor = CollectionEditorComponent<EmailTemplateConfig, Campaign>;

impl ShellPage for EmailTemplateConfig {
    fn panel(tab: &str, config: &Self, on_change: Callback<Self>) -> Html {
        let config = config.clone();
        match tab {
            tab if tab == TEMPLATES.name => html! { <TemplateEditor {config} lens={TEMPLATES} {on_change} /> },
            tab if tab == CATEGORIES.name => html! { <CategoryEditor {config} lens={CATEGORIES} {on_change} /> },
            tab if tab == VARIABLES.name => html! { <VariableEditor {config} lens={VARIABLES} {on_change} /> },
            tab if tab == CAMPAIGNS.name => html! { <CampaignEditor {config} lens={CAMPAIGNS} {on_change} /> },
            _ => html! {},
        }
    }
}
