use chrono::{DateTime, Utc};

use super::fixture_meta;
use crate::editor::{Collection, Lens, References};
use crate::model::custom_field::{CustomField, EntityKind, FieldGroup};
use crate::model::record::{Clock, RecordId};
use crate::model::value::{FieldType, FieldValue};
use crate::shell::{Aggregate, Fixtures, StatCard, TabSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomFieldConfig {
    pub fields: Collection<CustomField>,
    pub groups: Collection<FieldGroup>,
}

pub const FIELDS: Lens<CustomFieldConfig, CustomField> = lens!(CustomFieldConfig, fields: CustomField);
pub const GROUPS: Lens<CustomFieldConfig, FieldGroup> = lens!(CustomFieldConfig, groups: FieldGroup);

impl Aggregate for CustomFieldConfig {
    const TITLE: &'static str = "Campos personalizados";

    fn tabs() -> Vec<TabSpec> {
        vec![
            TabSpec::new(FIELDS.name, "Campos"),
            TabSpec::new(GROUPS.name, "Grupos"),
        ]
    }

    fn stats(&self, _now: DateTime<Utc>) -> Vec<StatCard> {
        let required = self.fields.iter().filter(|f| f.required).count();
        let mut kinds: Vec<EntityKind> = Vec::new();
        for field in self.fields.iter() {
            if !kinds.contains(&field.entity) {
                kinds.push(field.entity);
            }
        }
        let entities = kinds.len();
        vec![
            StatCard::for_collection("Campos", &self.fields),
            StatCard::new("Obligatorios", required),
            StatCard::new("Entidades", entities).detail("con campos propios"),
            StatCard::for_collection("Grupos", &self.groups),
        ]
    }

    fn references(&self) -> References {
        References::new().with(GROUPS.name, self.groups.ref_options())
    }
}

impl Fixtures for CustomFieldConfig {
    fn fixtures(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let groups = vec![
            FieldGroup {
                meta: fixture_meta("grp-commercial", now),
                name: "Datos comerciales".into(),
                description: Some("Información de ventas".into()),
                position: 0,
                is_active: true,
            },
            FieldGroup {
                meta: fixture_meta("grp-support", now),
                name: "Soporte".into(),
                description: None,
                position: 1,
                is_active: true,
            },
        ];

        let fields = vec![
            CustomField {
                meta: fixture_meta("fld-industry", now),
                name: "industry".into(),
                label: "Sector".into(),
                entity: EntityKind::Company,
                field_type: FieldType::Select,
                options: vec!["Tecnología".into(), "Salud".into(), "Educación".into()],
                default_value: Some(FieldValue::Choice("Tecnología".into())),
                required: true,
                group_id: Some(RecordId::new("grp-commercial")),
                is_active: true,
            },
            CustomField {
                meta: fixture_meta("fld-renewal", now),
                name: "renewal_date".into(),
                label: "Fecha de renovación".into(),
                entity: EntityKind::Deal,
                field_type: FieldType::Date,
                options: Vec::new(),
                default_value: None,
                required: false,
                group_id: Some(RecordId::new("grp-commercial")),
                is_active: true,
            },
            CustomField {
                meta: fixture_meta("fld-linkedin", now),
                name: "linkedin_url".into(),
                label: "Perfil de LinkedIn".into(),
                entity: EntityKind::Contact,
                field_type: FieldType::Url,
                options: Vec::new(),
                default_value: None,
                required: false,
                group_id: None,
                is_active: true,
            },
            CustomField {
                meta: fixture_meta("fld-vip", now),
                name: "vip_support".into(),
                label: "Soporte VIP".into(),
                entity: EntityKind::Contact,
                field_type: FieldType::Boolean,
                options: Vec::new(),
                default_value: Some(FieldValue::Boolean(false)),
                required: false,
                group_id: Some(RecordId::new("grp-support")),
                is_active: false,
            },
        ];

        Self {
            fields: Collection::from_records(fields),
            groups: Collection::from_records(groups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::ManualClock;

    #[test]
    fn stats_summarise_fields() {
        let config = CustomFieldConfig::fixtures(&ManualClock::default());
        let stats = config.stats(Utc::now());
        assert_eq!(stats[0].value, "4");
        assert_eq!(stats[1].value, "1");
        assert_eq!(stats[2].value, "3");
    }

    #[test]
    fn groups_are_referenceable() {
        let config = CustomFieldConfig::fixtures(&ManualClock::default());
        let refs = config.references();
        assert_eq!(
            refs.label("groups", &RecordId::new("grp-support")),
            Some("Soporte")
        );
    }
}
