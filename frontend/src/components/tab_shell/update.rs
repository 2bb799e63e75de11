use admin_common::bootstrap::load_fixtures;
use admin_common::model::record::SystemClock;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::TabShell;
use super::ShellPage;

pub fn update<C: ShellPage>(shell: &mut TabShell<C>, _ctx: &Context<TabShell<C>>, msg: Msg<C>) -> bool {
    match msg {
        Msg::Loaded(config) => {
            shell.shell.finish_loading(config);
            true
        }
        Msg::SelectTab(id) => shell.shell.select_tab(id),
        Msg::ConfigurationChanged(config) => {
            // Persistence would hook in here; the console keeps edits in memory.
            shell.shell.on_configuration_change(config);
            true
        }
    }
}

/// Populates the shell from the screen's fixtures.
pub fn load<C: ShellPage>(ctx: &Context<TabShell<C>>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let config = load_fixtures::<C>(&SystemClock).await;
        link.send_message(Msg::Loaded(config));
    });
}
