use chrono::{DateTime, Duration, Utc};

use super::fixture_meta;
use crate::editor::{Collection, Lens, References};
use crate::model::maintenance::{MaintenanceNotice, MaintenanceWindow, Severity};
use crate::model::record::Clock;
use crate::shell::{Aggregate, Fixtures, StatCard, TabSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaintenanceConfig {
    pub windows: Collection<MaintenanceWindow>,
    pub notices: Collection<MaintenanceNotice>,
}

pub const WINDOWS: Lens<MaintenanceConfig, MaintenanceWindow> =
    lens!(MaintenanceConfig, windows: MaintenanceWindow);
pub const NOTICES: Lens<MaintenanceConfig, MaintenanceNotice> =
    lens!(MaintenanceConfig, notices: MaintenanceNotice);

impl MaintenanceConfig {
    /// The active window covering `now`, if the site is in maintenance.
    pub fn window_in_effect(&self, now: DateTime<Utc>) -> Option<&MaintenanceWindow> {
        self.windows.iter().find(|w| w.is_in_effect(now))
    }

    pub fn next_window(&self, now: DateTime<Utc>) -> Option<&MaintenanceWindow> {
        self.windows
            .iter()
            .filter(|w| w.is_upcoming(now))
            .min_by_key(|w| w.starts_at)
    }
}

impl Aggregate for MaintenanceConfig {
    const TITLE: &'static str = "Modo mantenimiento";

    fn tabs() -> Vec<TabSpec> {
        vec![
            TabSpec::new(WINDOWS.name, "Ventanas"),
            TabSpec::new(NOTICES.name, "Avisos"),
        ]
    }

    fn stats(&self, now: DateTime<Utc>) -> Vec<StatCard> {
        let mode = match self.window_in_effect(now) {
            Some(window) => StatCard::new("Modo mantenimiento", "Activo").detail(format!(
                "hasta {}",
                window.ends_at.format("%Y-%m-%d %H:%M")
            )),
            None => StatCard::new("Modo mantenimiento", "Inactivo"),
        };
        let next = match self.next_window(now) {
            Some(window) => StatCard::new("Próxima ventana", window.starts_at.format("%Y-%m-%d %H:%M"))
                .detail(window.title.clone()),
            None => StatCard::new("Próxima ventana", "—"),
        };
        let critical = self
            .notices
            .iter()
            .filter(|n| n.is_active && n.severity == Severity::Critical)
            .count();
        vec![
            mode,
            next,
            StatCard::for_collection("Ventanas", &self.windows),
            StatCard::for_collection("Avisos", &self.notices).detail(format!("{critical} críticos visibles")),
        ]
    }

    fn references(&self) -> References {
        References::new()
    }
}

impl Fixtures for MaintenanceConfig {
    fn fixtures(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let windows = vec![
            MaintenanceWindow {
                meta: fixture_meta("win-upgrade", now),
                title: "Actualización de base de datos".into(),
                message: "El CRM no estará disponible durante la actualización.".into(),
                starts_at: now + Duration::days(3),
                ends_at: now + Duration::days(3) + Duration::hours(2),
                allow_admin_access: true,
                is_active: true,
            },
            MaintenanceWindow {
                meta: fixture_meta("win-past", now),
                title: "Migración de servidores".into(),
                message: "Trasladamos la plataforma a nuevos servidores.".into(),
                starts_at: now - Duration::days(30),
                ends_at: now - Duration::days(30) + Duration::hours(4),
                allow_admin_access: false,
                is_active: false,
            },
        ];

        let notices = vec![
            MaintenanceNotice {
                meta: fixture_meta("ntc-upgrade", now),
                title: "Mantenimiento programado".into(),
                body: "El próximo sábado el CRM estará en mantenimiento durante dos horas.".into(),
                severity: Severity::Warning,
                is_active: true,
            },
            MaintenanceNotice {
                meta: fixture_meta("ntc-imports", now),
                title: "Importaciones lentas".into(),
                body: "Las importaciones de contactos pueden tardar más de lo habitual.".into(),
                severity: Severity::Info,
                is_active: false,
            },
        ];

        Self {
            windows: Collection::from_records(windows),
            notices: Collection::from_records(notices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::ManualClock;

    #[test]
    fn maintenance_mode_follows_active_windows() {
        let clock = ManualClock::default();
        let config = MaintenanceConfig::fixtures(&clock);
        let now = clock.now();

        assert!(config.window_in_effect(now).is_none());
        assert_eq!(config.stats(now)[0].value, "Inactivo");

        let during = now + Duration::days(3) + Duration::minutes(30);
        assert_eq!(config.stats(during)[0].value, "Activo");
        assert!(config.next_window(during).is_none());
    }

    #[test]
    fn next_window_is_the_earliest_upcoming() {
        let clock = ManualClock::default();
        let config = MaintenanceConfig::fixtures(&clock);
        let next = config.next_window(clock.now()).unwrap();
        assert_eq!(next.title, "Actualización de base de datos");
    }
}
