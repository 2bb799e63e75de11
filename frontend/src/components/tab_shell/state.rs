use admin_common::shell::ShellState;

use super::ShellPage;

pub struct TabShell<C: ShellPage> {
    /// Configuration, selected tab and loading flag.
    pub shell: ShellState<C>,

    /// Guard so the fixture load runs once.
    pub loaded: bool,
}

impl<C: ShellPage> TabShell<C> {
    pub fn new() -> Self {
        Self {
            shell: ShellState::new(),
            loaded: false,
        }
    }
}
