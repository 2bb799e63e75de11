//! View rendering for the tab shell: title, stat cards, tab strip and the
//! selected tab's editor.

use admin_common::model::record::{Clock, SystemClock};
use admin_common::shell::StatCard;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TabShell;
use super::ShellPage;
use crate::workspace_grid::WorkspaceGrid;

pub fn view<C: ShellPage>(shell: &TabShell<C>, ctx: &Context<TabShell<C>>) -> Html {
    let link = ctx.link();
    let state = &shell.shell;

    if state.is_loading() {
        return html! {
            <div class="tab-shell">
                <h1>{ C::TITLE }</h1>
                <div class="loading" aria-busy="true">{ "Cargando…" }</div>
            </div>
        };
    }

    let stats = state.stats(SystemClock.now());
    html! {
        <div class="tab-shell">
            <h1>{ C::TITLE }</h1>
            <WorkspaceGrid columns={stats.len()} class="stat-grid">
                { for stats.iter().map(stat_card) }
            </WorkspaceGrid>
            { build_tab_strip(shell, link) }
            <div class="tab-panel" role="tabpanel">
                { C::panel(state.selected_tab(), state.config(), link.callback(Msg::ConfigurationChanged)) }
            </div>
        </div>
    }
}

fn build_tab_strip<C: ShellPage>(shell: &TabShell<C>, link: &Scope<TabShell<C>>) -> Html {
    let selected = shell.shell.selected_tab();
    html! {
        <nav class="tab-bar" role="tablist">
            {
                for C::tabs().into_iter().map(|tab| {
                    let id = tab.id;
                    html! {
                        <button
                            type="button"
                            role="tab"
                            aria-selected={(id == selected).to_string()}
                            class={classes!("tab-btn", (id == selected).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SelectTab(id))}
                        >
                            { tab.label }
                        </button>
                    }
                })
            }
        </nav>
    }
}

fn stat_card(card: &StatCard) -> Html {
    html! {
        <div class="stat-card">
            <span class="stat-label">{ card.label }</span>
            <strong class="stat-value">{ card.value.clone() }</strong>
            {
                match &card.detail {
                    Some(detail) => html! { <span class="stat-detail">{ detail.clone() }</span> },
                    None => html! {},
                }
            }
        </div>
    }
}
