//! Records of the backup/restore configuration screen.
//!
//! Schedules and destinations are descriptions only; no backup job runs from here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use super::record::{RecordId, RecordMeta};
use super::value::FieldValue;
use crate::editor::{Entity, References, SortValue};
use crate::form::{ColumnSpec, FieldSpec, FormData, FormReader, FromForm, InputKind};
use crate::validation::{Rules, Validate, ValidationErrors};

pub const MAX_RETENTION_DAYS: i64 = 3650;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Frequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Choice for Frequency {
    fn label(&self) -> &'static str {
        match self {
            Frequency::Hourly => "Cada hora",
            Frequency::Daily => "Diaria",
            Frequency::Weekly => "Semanal",
            Frequency::Monthly => "Mensual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSchedule {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub frequency: Frequency,
    /// `HH:MM`, UTC.
    pub time_of_day: String,
    pub retention_days: u16,
    pub destination_id: RecordId,
    pub include_attachments: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub name: String,
    pub frequency: Frequency,
    pub time_of_day: String,
    pub retention_days: i64,
    pub destination_id: Option<RecordId>,
    pub include_attachments: bool,
    pub is_active: bool,
}

impl Validate for ScheduleDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .max_len("name", &self.name, 80)
            .time_of_day("time_of_day", &self.time_of_day)
            .in_range("retention_days", self.retention_days, 1, MAX_RETENTION_DAYS)
            .check(
                "destination_id",
                self.destination_id.is_some(),
                "Seleccione un destino",
            )
            .finish()
    }
}

impl FromForm for ScheduleDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            frequency: reader.choice("frequency", Frequency::Daily),
            time_of_day: reader.text("time_of_day"),
            retention_days: reader.number("retention_days"),
            destination_id: reader.reference("destination_id"),
            include_attachments: reader.checkbox("include_attachments"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("frequency", self.frequency.key())
            .with("time_of_day", &self.time_of_day)
            .with("retention_days", self.retention_days.to_string())
            .with(
                "destination_id",
                self.destination_id.as_ref().map(RecordId::to_string).unwrap_or_default(),
            );
        form.set_flag("include_attachments", self.include_attachments);
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for BackupSchedule {
    type Draft = ScheduleDraft;
    const LABEL: &'static str = "programación";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        true
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "time_of_day" => Some(SortValue::text(&self.time_of_day)),
            "retention_days" => Some(SortValue::Number(f64::from(self.retention_days))),
            _ => None,
        }
    }

    fn from_draft(draft: ScheduleDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            frequency: draft.frequency,
            time_of_day: draft.time_of_day,
            retention_days: u16::try_from(draft.retention_days).unwrap_or(1),
            destination_id: draft.destination_id.unwrap_or_else(|| RecordId::new("")),
            include_attachments: draft.include_attachments,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: ScheduleDraft) {
        self.name = draft.name;
        self.frequency = draft.frequency;
        self.time_of_day = draft.time_of_day;
        self.retention_days = u16::try_from(draft.retention_days).unwrap_or(self.retention_days);
        if let Some(destination_id) = draft.destination_id {
            self.destination_id = destination_id;
        }
        self.include_attachments = draft.include_attachments;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            name: self.name.clone(),
            frequency: self.frequency,
            time_of_day: self.time_of_day.clone(),
            retention_days: i64::from(self.retention_days),
            destination_id: Some(self.destination_id.clone()),
            include_attachments: self.include_attachments,
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::select::<Frequency>("frequency", "Frecuencia"),
            FieldSpec::new("time_of_day", "Hora (UTC)", InputKind::Time).required(),
            FieldSpec::new(
                "retention_days",
                "Retención (días)",
                InputKind::Number {
                    min: Some(1),
                    max: Some(MAX_RETENTION_DAYS),
                },
            )
            .required(),
            FieldSpec::reference("destination_id", "Destino", "destinations"),
            FieldSpec::checkbox("include_attachments", "Incluir adjuntos"),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("frequency", "Frecuencia"),
            ColumnSpec::sortable("time_of_day", "Hora"),
            ColumnSpec::sortable("retention_days", "Retención"),
            ColumnSpec::plain("destination", "Destino"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "frequency" => self.frequency.label().to_string(),
            "time_of_day" => self.time_of_day.clone(),
            "retention_days" => format!("{} días", self.retention_days),
            "destination" => refs.describe(
                "destinations",
                Some(&self.destination_id),
                "—",
                "Destino desconocido",
            ),
            _ => String::new(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DestinationKind {
    #[default]
    Local,
    S3,
    Sftp,
}

impl Choice for DestinationKind {
    fn label(&self) -> &'static str {
        match self {
            DestinationKind::Local => "Disco local",
            DestinationKind::S3 => "Amazon S3",
            DestinationKind::Sftp => "SFTP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDestination {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub kind: DestinationKind,
    pub location: String,
    pub settings: BTreeMap<String, FieldValue>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationDraft {
    pub name: String,
    pub kind: DestinationKind,
    pub location: String,
    pub settings: BTreeMap<String, FieldValue>,
    pub is_active: bool,
}

/// Parses `key=value` lines into a typed settings map.
fn parse_settings(reader: &mut FormReader<'_>, name: &str) -> BTreeMap<String, FieldValue> {
    let mut settings = BTreeMap::new();
    for line in reader.lines(name) {
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                settings.insert(key.trim().to_string(), FieldValue::infer(value));
            }
            _ => reader.error(name, format!("Línea inválida \"{line}\", use clave=valor")),
        }
    }
    settings
}

fn settings_input(settings: &BTreeMap<String, FieldValue>) -> String {
    settings
        .iter()
        .map(|(key, value)| format!("{key}={}", value.to_input()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Validate for DestinationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 80)
            .required("location", &self.location);
        if self.kind == DestinationKind::S3 {
            rules.check(
                "location",
                self.location.starts_with("s3://"),
                "Una ubicación S3 debe comenzar con s3://",
            );
        }
        rules.finish()
    }
}

impl FromForm for DestinationDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            kind: reader.choice("kind", DestinationKind::Local),
            location: reader.text("location"),
            settings: parse_settings(reader, "settings"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("kind", self.kind.key())
            .with("location", &self.location)
            .with("settings", settings_input(&self.settings));
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for BackupDestination {
    type Draft = DestinationDraft;
    const LABEL: &'static str = "destino";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        true
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "kind" => Some(SortValue::text(self.kind.label())),
            _ => None,
        }
    }

    fn from_draft(draft: DestinationDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            kind: draft.kind,
            location: draft.location,
            settings: draft.settings,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: DestinationDraft) {
        self.name = draft.name;
        self.kind = draft.kind;
        self.location = draft.location;
        self.settings = draft.settings;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> DestinationDraft {
        DestinationDraft {
            name: self.name.clone(),
            kind: self.kind,
            location: self.location.clone(),
            settings: self.settings.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::select::<DestinationKind>("kind", "Tipo"),
            FieldSpec::text("location", "Ubicación").required().placeholder("s3://crm-backups/prod"),
            FieldSpec::new("settings", "Ajustes (clave=valor)", InputKind::TextArea { rows: 4 })
                .placeholder("region=eu-west-1"),
            FieldSpec::checkbox("is_active", "Activo"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::sortable("kind", "Tipo"),
            ColumnSpec::plain("location", "Ubicación"),
            ColumnSpec::plain("settings", "Ajustes"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "kind" => self.kind.label().to_string(),
            "location" => self.location.clone(),
            "settings" => self.settings.len().to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::parse_draft;

    #[test]
    fn settings_lines_become_typed_values() {
        let form = FormData::new()
            .with("name", "Archivo")
            .with("kind", "s3")
            .with("location", "s3://crm-backups")
            .with("settings", "region = eu-west-1\nencrypt=true\nparts=8\n\n");
        let draft = parse_draft::<DestinationDraft>(&form).unwrap();

        assert_eq!(draft.settings["region"], FieldValue::Text("eu-west-1".into()));
        assert_eq!(draft.settings["encrypt"], FieldValue::Boolean(true));
        assert_eq!(draft.settings["parts"], FieldValue::Number(8.0));
        assert!(draft.to_form().get("settings").unwrap().contains("encrypt=true"));
    }

    #[test]
    fn zero_padded_settings_read_back_unchanged() {
        let form = FormData::new()
            .with("name", "Servidor")
            .with("kind", "sftp")
            .with("location", "sftp://backup.local/crm")
            .with("settings", "mode=0755\nport=22");
        let draft = parse_draft::<DestinationDraft>(&form).unwrap();

        assert_eq!(draft.settings["mode"], FieldValue::Text("0755".into()));
        assert_eq!(draft.settings["port"], FieldValue::Number(22.0));
        assert_eq!(draft.to_form().get("settings"), Some("mode=0755\nport=22"));
    }

    #[test]
    fn settings_line_without_separator_is_an_error() {
        let form = FormData::new()
            .with("name", "Local")
            .with("kind", "local")
            .with("location", "/var/backups")
            .with("settings", "compress");
        let errors = parse_draft::<DestinationDraft>(&form).unwrap_err();
        assert!(errors.for_field("settings").is_some());
    }

    #[test]
    fn schedule_bounds() {
        let form = FormData::new()
            .with("name", "Nocturna")
            .with("frequency", "daily")
            .with("time_of_day", "25:00")
            .with("retention_days", "0")
            .with("destination_id", "d1");
        let errors = parse_draft::<ScheduleDraft>(&form).unwrap_err();
        assert!(errors.for_field("time_of_day").is_some());
        assert_eq!(errors.for_field("retention_days"), Some("Debe estar entre 1 y 3650"));
        assert!(errors.for_field("destination_id").is_none());
    }
}
