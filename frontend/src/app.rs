//! Console root: a side menu and the selected screen.
//!
//! The selected screen lives in component state; there is no router. Each screen
//! mounts fresh when selected and loads its own data.

use yew::{classes, html, Component, Context, Html};

use crate::pages::backup::BackupPage;
use crate::pages::custom_fields::CustomFieldsPage;
use crate::pages::database::DatabaseAdminPage;
use crate::pages::email::EmailTemplatesPage;
use crate::pages::maintenance::MaintenancePage;
use crate::pages::performance::PerformancePage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    EmailTemplates,
    CustomFields,
    Database,
    Maintenance,
    Backup,
    Performance,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::EmailTemplates,
        Screen::CustomFields,
        Screen::Database,
        Screen::Maintenance,
        Screen::Backup,
        Screen::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::EmailTemplates => "Plantillas de correo",
            Screen::CustomFields => "Campos personalizados",
            Screen::Database => "Base de datos",
            Screen::Maintenance => "Mantenimiento",
            Screen::Backup => "Copias de seguridad",
            Screen::Performance => "Rendimiento",
        }
    }
}

pub struct App {
    screen: Screen,
}

impl Component for App {
    type Message = Screen;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            screen: Screen::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, screen: Screen) -> bool {
        let changed = self.screen != screen;
        self.screen = screen;
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="console">
                <nav class="console-menu">
                    {
                        for Screen::ALL.into_iter().map(|screen| html! {
                            <button
                                type="button"
                                class={classes!("menu-item", (screen == self.screen).then_some("active"))}
                                onclick={link.callback(move |_| screen)}
                            >
                                { screen.label() }
                            </button>
                        })
                    }
                </nav>
                <main class="console-main">
                    {
                        match self.screen {
                            Screen::EmailTemplates => html! { <EmailTemplatesPage /> },
                            Screen::CustomFields => html! { <CustomFieldsPage /> },
                            Screen::Database => html! { <DatabaseAdminPage /> },
                            Screen::Maintenance => html! { <MaintenancePage /> },
                            Screen::Backup => html! { <BackupPage /> },
                            Screen::Performance => html! { <PerformancePage /> },
                        }
                    }
                </main>
            </div>
        }
    }
}
