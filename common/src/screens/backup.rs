use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::fixture_meta;
use crate::editor::{Collection, Lens, References};
use crate::model::backup::{BackupDestination, BackupSchedule, DestinationKind, Frequency};
use crate::model::record::{Clock, RecordId};
use crate::model::value::FieldValue;
use crate::shell::{Aggregate, Fixtures, StatCard, TabSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackupConfig {
    pub schedules: Collection<BackupSchedule>,
    pub destinations: Collection<BackupDestination>,
}

pub const SCHEDULES: Lens<BackupConfig, BackupSchedule> = lens!(BackupConfig, schedules: BackupSchedule);
pub const DESTINATIONS: Lens<BackupConfig, BackupDestination> =
    lens!(BackupConfig, destinations: BackupDestination);

impl Aggregate for BackupConfig {
    const TITLE: &'static str = "Copias de seguridad";

    fn tabs() -> Vec<TabSpec> {
        vec![
            TabSpec::new(SCHEDULES.name, "Programaciones"),
            TabSpec::new(DESTINATIONS.name, "Destinos"),
        ]
    }

    fn stats(&self, _now: DateTime<Utc>) -> Vec<StatCard> {
        let longest = self
            .schedules
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.retention_days)
            .max()
            .map(|days| format!("{days} días"))
            .unwrap_or_else(|| "—".to_string());
        vec![
            StatCard::for_collection("Programaciones", &self.schedules),
            StatCard::for_collection("Destinos", &self.destinations),
            StatCard::new("Retención máxima", longest),
        ]
    }

    fn references(&self) -> References {
        References::new().with(DESTINATIONS.name, self.destinations.ref_options())
    }
}

impl Fixtures for BackupConfig {
    fn fixtures(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let destinations = vec![
            BackupDestination {
                meta: fixture_meta("dst-s3", now),
                name: "Archivo S3".into(),
                kind: DestinationKind::S3,
                location: "s3://crm-backups/prod".into(),
                settings: BTreeMap::from([
                    ("region".to_string(), FieldValue::Text("eu-west-1".into())),
                    ("encrypt".to_string(), FieldValue::Boolean(true)),
                ]),
                is_active: true,
            },
            BackupDestination {
                meta: fixture_meta("dst-local", now),
                name: "Disco del servidor".into(),
                kind: DestinationKind::Local,
                location: "/var/backups/crm".into(),
                settings: BTreeMap::new(),
                is_active: true,
            },
        ];

        let schedules = vec![
            BackupSchedule {
                meta: fixture_meta("sch-nightly", now),
                name: "Copia nocturna".into(),
                frequency: Frequency::Daily,
                time_of_day: "02:00".into(),
                retention_days: 30,
                destination_id: RecordId::new("dst-s3"),
                include_attachments: true,
                is_active: true,
            },
            BackupSchedule {
                meta: fixture_meta("sch-hourly", now),
                name: "Incremental por hora".into(),
                frequency: Frequency::Hourly,
                time_of_day: "00:15".into(),
                retention_days: 2,
                destination_id: RecordId::new("dst-local"),
                include_attachments: false,
                is_active: true,
            },
            BackupSchedule {
                meta: fixture_meta("sch-monthly", now),
                name: "Archivo mensual".into(),
                frequency: Frequency::Monthly,
                time_of_day: "03:30".into(),
                retention_days: 365,
                destination_id: RecordId::new("dst-s3"),
                include_attachments: true,
                is_active: false,
            },
        ];

        Self {
            schedules: Collection::from_records(schedules),
            destinations: Collection::from_records(destinations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::ManualClock;

    #[test]
    fn retention_stat_ignores_inactive_schedules() {
        let config = BackupConfig::fixtures(&ManualClock::default());
        let stats = config.stats(Utc::now());
        assert_eq!(stats[2].value, "30 días");
    }
}
