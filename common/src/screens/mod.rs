//! Aggregate configurations of the five tabbed admin screens.
//!
//! Each screen module defines its aggregate struct, one [`Lens`](crate::editor::Lens)
//! constant per collection (named after the tab that edits it), the shell stat
//! cards and the fixture data loaded on mount.

use chrono::{DateTime, Utc};

use crate::model::record::{RecordId, RecordMeta};

/// `Lens` over a named field of an aggregate, built from plain fn items.
macro_rules! lens {
    ($config:ty, $field:ident: $entity:ty) => {
        $crate::editor::Lens::<$config, $entity> {
            name: stringify!($field),
            get: {
                fn get(config: &$config) -> &$crate::editor::Collection<$entity> {
                    &config.$field
                }
                get
            },
            set: {
                fn set(config: &mut $config, collection: $crate::editor::Collection<$entity>) {
                    config.$field = collection;
                }
                set
            },
        }
    };
}

pub mod backup;
pub mod custom_fields;
pub mod database;
pub mod email;
pub mod maintenance;

/// Identity block for a fixture record with a stable id.
fn fixture_meta(id: &str, now: DateTime<Utc>) -> RecordMeta {
    RecordMeta::new(RecordId::new(id), now)
}

#[cfg(test)]
mod tests {
    use crate::editor::{Entity, UPDATED_AT_COLUMN};
    use crate::model::backup::{BackupDestination, BackupSchedule};
    use crate::model::custom_field::{CustomField, FieldGroup};
    use crate::model::database::{DbConnection, DbSchema, DbTable, Migration, SavedQuery};
    use crate::model::email::{Campaign, EmailTemplate, TemplateCategory, TemplateVariable};
    use crate::model::maintenance::{MaintenanceNotice, MaintenanceWindow};

    fn owns_updated_at<T: Entity>() -> bool {
        T::columns().iter().any(|c| c.key == UPDATED_AT_COLUMN.key)
    }

    #[test]
    fn last_modified_column_is_left_to_the_table() {
        let duplicated = [
            ("EmailTemplate", owns_updated_at::<EmailTemplate>()),
            ("TemplateCategory", owns_updated_at::<TemplateCategory>()),
            ("TemplateVariable", owns_updated_at::<TemplateVariable>()),
            ("Campaign", owns_updated_at::<Campaign>()),
            ("CustomField", owns_updated_at::<CustomField>()),
            ("FieldGroup", owns_updated_at::<FieldGroup>()),
            ("DbConnection", owns_updated_at::<DbConnection>()),
            ("SavedQuery", owns_updated_at::<SavedQuery>()),
            ("DbSchema", owns_updated_at::<DbSchema>()),
            ("DbTable", owns_updated_at::<DbTable>()),
            ("Migration", owns_updated_at::<Migration>()),
            ("MaintenanceWindow", owns_updated_at::<MaintenanceWindow>()),
            ("MaintenanceNotice", owns_updated_at::<MaintenanceNotice>()),
            ("BackupSchedule", owns_updated_at::<BackupSchedule>()),
            ("BackupDestination", owns_updated_at::<BackupDestination>()),
        ];
        let offenders: Vec<_> = duplicated.iter().filter(|(_, dup)| *dup).map(|(name, _)| *name).collect();
        assert!(offenders.is_empty(), "columns repeat updatedAt: {offenders:?}");
    }
}
