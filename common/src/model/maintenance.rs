//! Records of the maintenance-mode control screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use super::record::RecordMeta;
use crate::editor::{Entity, References, SortValue};
use crate::form::{datetime_input, ColumnSpec, FieldSpec, FormData, FormReader, FromForm, InputKind};
use crate::validation::{Rules, Validate, ValidationErrors};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Planned downtime during which the CRM shows a maintenance page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub message: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub allow_admin_access: bool,
    pub is_active: bool,
}

impl MaintenanceWindow {
    /// Half-open: the window covers `[starts_at, ends_at)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.starts_at <= at && at < self.ends_at
    }

    /// Active and covering `now`.
    pub fn is_in_effect(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.contains(now)
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.starts_at > now
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowDraft {
    pub title: String,
    pub message: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub allow_admin_access: bool,
    pub is_active: bool,
}

impl Validate for WindowDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("title", &self.title)
            .max_len("title", &self.title, 120)
            .required("message", &self.message)
            .check(
                "ends_at",
                self.ends_at > self.starts_at,
                "La hora de fin debe ser posterior al inicio",
            )
            .finish()
    }
}

impl FromForm for WindowDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            title: reader.text("title"),
            message: reader.text("message"),
            starts_at: reader.datetime("starts_at"),
            ends_at: reader.datetime("ends_at"),
            allow_admin_access: reader.checkbox("allow_admin_access"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("title", &self.title)
            .with("message", &self.message)
            .with("starts_at", datetime_input(&self.starts_at))
            .with("ends_at", datetime_input(&self.ends_at));
        form.set_flag("allow_admin_access", self.allow_admin_access);
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for MaintenanceWindow {
    type Draft = WindowDraft;
    const LABEL: &'static str = "ventana";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        true
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "title" => Some(SortValue::text(&self.title)),
            "starts_at" => Some(SortValue::Date(self.starts_at)),
            "ends_at" => Some(SortValue::Date(self.ends_at)),
            _ => None,
        }
    }

    fn from_draft(draft: WindowDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            title: draft.title,
            message: draft.message,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            allow_admin_access: draft.allow_admin_access,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: WindowDraft) {
        self.title = draft.title;
        self.message = draft.message;
        self.starts_at = draft.starts_at;
        self.ends_at = draft.ends_at;
        self.allow_admin_access = draft.allow_admin_access;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> WindowDraft {
        WindowDraft {
            title: self.title.clone(),
            message: self.message.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            allow_admin_access: self.allow_admin_access,
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("title", "Título").required(),
            FieldSpec::new("message", "Mensaje para los usuarios", InputKind::TextArea { rows: 3 })
                .required(),
            FieldSpec::new("starts_at", "Inicio (UTC)", InputKind::DateTime).required(),
            FieldSpec::new("ends_at", "Fin (UTC)", InputKind::DateTime).required(),
            FieldSpec::checkbox("allow_admin_access", "Permitir acceso a administradores"),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("title", "Título"),
            ColumnSpec::sortable("starts_at", "Inicio"),
            ColumnSpec::sortable("ends_at", "Fin"),
            ColumnSpec::plain("allow_admin_access", "Acceso admin"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "title" => self.title.clone(),
            "starts_at" => self.starts_at.format(DISPLAY_FORMAT).to_string(),
            "ends_at" => self.ends_at.format(DISPLAY_FORMAT).to_string(),
            "allow_admin_access" => if self.allow_admin_access { "Sí" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl Choice for Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Información",
            Severity::Warning => "Advertencia",
            Severity::Critical => "Crítico",
        }
    }
}

/// Banner shown to users independently of any maintenance window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceNotice {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeDraft {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub is_active: bool,
}

impl Validate for NoticeDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("title", &self.title)
            .max_len("title", &self.title, 120)
            .required("body", &self.body)
            .max_len("body", &self.body, 1000)
            .finish()
    }
}

impl FromForm for NoticeDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            title: reader.text("title"),
            body: reader.text("body"),
            severity: reader.choice("severity", Severity::Info),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("title", &self.title)
            .with("body", &self.body)
            .with("severity", self.severity.key());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for MaintenanceNotice {
    type Draft = NoticeDraft;
    const LABEL: &'static str = "aviso";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        true
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.body.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "title" => Some(SortValue::text(&self.title)),
            "severity" => Some(SortValue::Number(self.severity as u8 as f64)),
            _ => None,
        }
    }

    fn from_draft(draft: NoticeDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            title: draft.title,
            body: draft.body,
            severity: draft.severity,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: NoticeDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.severity = draft.severity;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> NoticeDraft {
        NoticeDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            severity: self.severity,
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("title", "Título").required(),
            FieldSpec::new("body", "Texto", InputKind::TextArea { rows: 4 }).required(),
            FieldSpec::select::<Severity>("severity", "Gravedad"),
            FieldSpec::checkbox("is_active", "Visible"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("title", "Título"),
            ColumnSpec::sortable("severity", "Gravedad"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "title" => self.title.clone(),
            "severity" => self.severity.label().to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::parse_draft;
    use crate::model::record::RecordId;
    use chrono::{Duration, TimeZone};

    fn window_form(starts: &str, ends: &str) -> FormData {
        let mut form = FormData::new()
            .with("title", "Actualización")
            .with("message", "Volvemos pronto")
            .with("starts_at", starts)
            .with("ends_at", ends);
        form.set_flag("is_active", true);
        form
    }

    #[test]
    fn window_must_end_after_it_starts() {
        let errors =
            parse_draft::<WindowDraft>(&window_form("2024-06-01T10:00", "2024-06-01T10:00")).unwrap_err();
        assert!(errors.for_field("ends_at").is_some());
    }

    #[test]
    fn malformed_datetime_reports_coercion_error_only() {
        let errors = parse_draft::<WindowDraft>(&window_form("mañana", "2024-06-01T10:00")).unwrap_err();
        assert_eq!(errors.for_field("starts_at"), Some("Fecha y hora inválidas"));
    }

    #[test]
    fn in_effect_only_when_active_and_covering_now() {
        let draft =
            parse_draft::<WindowDraft>(&window_form("2024-06-01T10:00", "2024-06-01T12:00")).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let mut window = MaintenanceWindow::from_draft(draft, RecordMeta::new(RecordId::new("w1"), start));

        assert!(window.is_in_effect(start));
        assert!(window.is_in_effect(start + Duration::minutes(119)));
        assert!(!window.is_in_effect(start + Duration::hours(2)));
        assert!(window.is_upcoming(start - Duration::minutes(1)));

        window.toggle_active();
        assert!(!window.is_in_effect(start + Duration::minutes(30)));
    }
}
