//! Records of the email template management screen: templates, categories,
//! template variables and campaigns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use super::record::{RecordId, RecordMeta};
use super::value::{FieldType, FieldValue};
use crate::editor::{Entity, References, SortValue};
use crate::form::{datetime_input, ColumnSpec, FieldSpec, FormData, FormReader, FromForm, InputKind};
use crate::validation::{Rules, Validate, ValidationErrors};

pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Layout {
    #[default]
    SingleColumn,
    TwoColumn,
    Newsletter,
}

impl Choice for Layout {
    fn label(&self) -> &'static str {
        match self {
            Layout::SingleColumn => "Una columna",
            Layout::TwoColumn => "Dos columnas",
            Layout::Newsletter => "Boletín",
        }
    }
}

/// Visual settings of a template. Defaulted when a template is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyling {
    pub layout: Layout,
    pub primary_color: String,
    pub font_family: String,
}

impl Default for TemplateStyling {
    fn default() -> Self {
        Self {
            layout: Layout::SingleColumn,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub subject: String,
    pub category_id: Option<RecordId>,
    pub html_body: String,
    pub text_body: Option<String>,
    pub styling: TemplateStyling,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub name: String,
    pub subject: String,
    pub category_id: Option<RecordId>,
    pub html_body: String,
    pub text_body: Option<String>,
    /// Only set when the form carries styling inputs.
    pub primary_color: Option<String>,
    pub layout: Option<Layout>,
    pub is_active: bool,
}

impl Validate for TemplateDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .required("subject", &self.subject)
            .max_len("subject", &self.subject, 200)
            .required("html_body", &self.html_body);
        if let Some(color) = &self.primary_color {
            rules.hex_color("primary_color", color);
        }
        rules.finish()
    }
}

impl FromForm for TemplateDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            subject: reader.text("subject"),
            category_id: reader.reference("category_id"),
            html_body: reader.raw("html_body"),
            text_body: reader.optional_text("text_body"),
            primary_color: reader.optional_text("primary_color"),
            layout: reader
                .optional_text("layout")
                .map(|_| reader.choice("layout", Layout::SingleColumn)),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("subject", &self.subject)
            .with("category_id", self.category_id.as_ref().map(RecordId::to_string).unwrap_or_default())
            .with("html_body", &self.html_body)
            .with("text_body", self.text_body.clone().unwrap_or_default())
            .with("primary_color", self.primary_color.clone().unwrap_or_default())
            .with("layout", self.layout.unwrap_or_default().key());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for EmailTemplate {
    type Draft = TemplateDraft;
    const LABEL: &'static str = "plantilla";

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
        vec![self.name.as_str(), self.subject.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "subject" => Some(SortValue::text(&self.subject)),
            _ => None,
        }
    }

    fn from_draft(draft: TemplateDraft, meta: RecordMeta) -> Self {
        let mut styling = TemplateStyling::default();
        if let Some(color) = draft.primary_color {
            styling.primary_color = color;
        }
        if let Some(layout) = draft.layout {
            styling.layout = layout;
        }
        Self {
            meta,
            name: draft.name,
            subject: draft.subject,
            category_id: draft.category_id,
            html_body: draft.html_body,
            text_body: draft.text_body,
            styling,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: TemplateDraft) {
        self.name = draft.name;
        self.subject = draft.subject;
        self.category_id = draft.category_id;
        self.html_body = draft.html_body;
        self.text_body = draft.text_body;
        if let Some(color) = draft.primary_color {
            self.styling.primary_color = color;
        }
        if let Some(layout) = draft.layout {
            self.styling.layout = layout;
        }
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            subject: self.subject.clone(),
            category_id: self.category_id.clone(),
            html_body: self.html_body.clone(),
            text_body: self.text_body.clone(),
            primary_color: Some(self.styling.primary_color.clone()),
            layout: Some(self.styling.layout),
            is_active: self.is_active,
        }
    }

    fn blank_form() -> FormData {
        let styling = TemplateStyling::default();
        let mut form = FormData::new()
            .with("layout", styling.layout.key())
            .with("primary_color", styling.primary_color);
        form.set_flag("is_active", true);
        form
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::text("subject", "Asunto").required(),
            FieldSpec::optional_reference("category_id", "Categoría", "categories"),
            FieldSpec::select::<Layout>("layout", "Diseño"),
            FieldSpec::new("primary_color", "Color principal", InputKind::Color),
            FieldSpec::new("html_body", "Contenido HTML", InputKind::Code { rows: 12 }).required(),
            FieldSpec::new("text_body", "Versión texto plano", InputKind::TextArea { rows: 4 }),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::sortable("subject", "Asunto"),
            ColumnSpec::plain("category", "Categoría"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "subject" => self.subject.clone(),
            "category" => refs.describe(
                "categories",
                self.category_id.as_ref(),
                "Sin categoría",
                "Desconocida",
            ),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCategory {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub is_active: bool,
}

impl CategoryDraft {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            color: color.to_string(),
            is_active: true,
        }
    }
}

impl Validate for CategoryDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .max_len("name", &self.name, 60)
            .hex_color("color", &self.color)
            .finish()
    }
}

impl FromForm for CategoryDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            description: reader.optional_text("description"),
            color: reader.text("color"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("description", self.description.clone().unwrap_or_default())
            .with("color", &self.color);
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for TemplateCategory {
    type Draft = CategoryDraft;
    const LABEL: &'static str = "categoría";

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
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            _ => None,
        }
    }

    fn from_draft(draft: CategoryDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            description: draft.description,
            color: draft.color,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: CategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.color = draft.color;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            is_active: self.is_active,
        }
    }

    fn blank_form() -> FormData {
        CategoryDraft::new("", DEFAULT_PRIMARY_COLOR).to_form()
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 3 }),
            FieldSpec::new("color", "Color", InputKind::Color)
                .required()
                .placeholder(DEFAULT_PRIMARY_COLOR),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("color", "Color"),
            ColumnSpec::plain("description", "Descripción"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "color" => self.color.clone(),
            "description" => self.description.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

/// Merge variable offered inside template bodies, e.g. `{{first_name}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub key: String,
    pub label: String,
    pub value_type: FieldType,
    pub default_value: Option<FieldValue>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl TemplateVariable {
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDraft {
    pub key: String,
    pub label: String,
    pub value_type: FieldType,
    pub default_value: Option<FieldValue>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Validate for VariableDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("key", &self.key)
            .identifier("key", &self.key)
            .max_len("key", &self.key, 64)
            .required("label", &self.label);
        if let Some(value) = &self.default_value {
            rules.check(
                "default_value",
                value.matches(self.value_type),
                "El valor por defecto no coincide con el tipo",
            );
        }
        rules.finish()
    }
}

impl FromForm for VariableDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        let value_type = reader.choice("value_type", FieldType::Text);
        let default_value = reader.optional_text("default_value").and_then(|raw| {
            FieldValue::parse(value_type, &raw)
                .map_err(|message| reader.error("default_value", message))
                .ok()
        });
        Self {
            key: reader.text("key"),
            label: reader.text("label"),
            value_type,
            default_value,
            description: reader.optional_text("description"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("key", &self.key)
            .with("label", &self.label)
            .with("value_type", self.value_type.key())
            .with(
                "default_value",
                self.default_value.as_ref().map(FieldValue::to_input).unwrap_or_default(),
            )
            .with("description", self.description.clone().unwrap_or_default());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for TemplateVariable {
    type Draft = VariableDraft;
    const LABEL: &'static str = "variable";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn display_name(&self) -> &str {
        &self.label
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        true
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.key.as_str(), self.label.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "key" => Some(SortValue::text(&self.key)),
            "label" => Some(SortValue::text(&self.label)),
            _ => None,
        }
    }

    fn from_draft(draft: VariableDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            key: draft.key,
            label: draft.label,
            value_type: draft.value_type,
            default_value: draft.default_value,
            description: draft.description,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: VariableDraft) {
        self.key = draft.key;
        self.label = draft.label;
        self.value_type = draft.value_type;
        self.default_value = draft.default_value;
        self.description = draft.description;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> VariableDraft {
        VariableDraft {
            key: self.key.clone(),
            label: self.label.clone(),
            value_type: self.value_type,
            default_value: self.default_value.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("key", "Clave").required().placeholder("first_name"),
            FieldSpec::text("label", "Etiqueta").required(),
            FieldSpec::select::<FieldType>("value_type", "Tipo"),
            FieldSpec::text("default_value", "Valor por defecto"),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 2 }),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("key", "Variable"),
            ColumnSpec::sortable("label", "Etiqueta"),
            ColumnSpec::plain("value_type", "Tipo"),
            ColumnSpec::plain("default_value", "Por defecto"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "key" => self.placeholder(),
            "label" => self.label.clone(),
            "value_type" => self.value_type.label().to_string(),
            "default_value" => self
                .default_value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "—".to_string()),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    /// Status-cycle table used by the toggle action. `None` marks a terminal status.
    pub fn next(self) -> Option<CampaignStatus> {
        match self {
            CampaignStatus::Draft => Some(CampaignStatus::Scheduled),
            CampaignStatus::Scheduled => Some(CampaignStatus::Active),
            CampaignStatus::Active => Some(CampaignStatus::Paused),
            CampaignStatus::Paused => Some(CampaignStatus::Active),
            CampaignStatus::Completed => None,
        }
    }
}

impl Choice for CampaignStatus {
    fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Borrador",
            CampaignStatus::Scheduled => "Programada",
            CampaignStatus::Active => "Activa",
            CampaignStatus::Paused => "Pausada",
            CampaignStatus::Completed => "Finalizada",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Segment {
    #[default]
    AllContacts,
    Customers,
    Leads,
    Inactive,
}

impl Choice for Segment {
    fn label(&self) -> &'static str {
        match self {
            Segment::AllContacts => "Todos los contactos",
            Segment::Customers => "Clientes",
            Segment::Leads => "Prospectos",
            Segment::Inactive => "Contactos inactivos",
        }
    }
}

/// Who receives a campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientFilter {
    pub segment: Segment,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub template_id: RecordId,
    pub audience: RecipientFilter,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub template_id: Option<RecordId>,
    pub audience: RecipientFilter,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
}

impl Validate for CampaignDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .max_len("name", &self.name, 120)
            .check(
                "template_id",
                self.template_id.is_some(),
                "Seleccione una plantilla",
            )
            .check(
                "scheduled_at",
                self.status != CampaignStatus::Scheduled || self.scheduled_at.is_some(),
                "Una campaña programada necesita fecha de envío",
            )
            .finish()
    }
}

impl FromForm for CampaignDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            template_id: reader.reference("template_id"),
            audience: RecipientFilter {
                segment: reader.choice("segment", Segment::AllContacts),
                tags: reader.list("tags"),
            },
            scheduled_at: reader.optional_datetime("scheduled_at"),
            status: reader.choice("status", CampaignStatus::Draft),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("name", &self.name)
            .with("template_id", self.template_id.as_ref().map(RecordId::to_string).unwrap_or_default())
            .with("segment", self.audience.segment.key())
            .with("tags", self.audience.tags.join(", "))
            .with("scheduled_at", self.scheduled_at.as_ref().map(datetime_input).unwrap_or_default())
            .with("status", self.status.key())
    }
}

impl Entity for Campaign {
    type Draft = CampaignDraft;
    const LABEL: &'static str = "campaña";

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
        self.status == CampaignStatus::Active
    }

    fn toggle_active(&mut self) -> bool {
        match self.status.next() {
            Some(next) => {
                self.status = next;
                true
            }
            None => false,
        }
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.audience.tags.iter().map(String::as_str));
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "scheduled_at" => self.scheduled_at.map(SortValue::Date),
            _ => None,
        }
    }

    fn from_draft(draft: CampaignDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            template_id: draft.template_id.unwrap_or_else(|| RecordId::new("")),
            audience: draft.audience,
            scheduled_at: draft.scheduled_at,
            status: draft.status,
        }
    }

    fn apply_draft(&mut self, draft: CampaignDraft) {
        self.name = draft.name;
        if let Some(template_id) = draft.template_id {
            self.template_id = template_id;
        }
        self.audience = draft.audience;
        self.scheduled_at = draft.scheduled_at;
        self.status = draft.status;
    }

    fn to_draft(&self) -> CampaignDraft {
        CampaignDraft {
            name: self.name.clone(),
            template_id: Some(self.template_id.clone()),
            audience: self.audience.clone(),
            scheduled_at: self.scheduled_at,
            status: self.status,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::reference("template_id", "Plantilla", "templates"),
            FieldSpec::select::<Segment>("segment", "Segmento"),
            FieldSpec::text("tags", "Etiquetas").placeholder("vip, newsletter"),
            FieldSpec::new("scheduled_at", "Fecha de envío", InputKind::DateTime),
            FieldSpec::select::<CampaignStatus>("status", "Estado"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("template", "Plantilla"),
            ColumnSpec::plain("segment", "Segmento"),
            ColumnSpec::sortable("scheduled_at", "Envío"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "template" => refs.describe(
                "templates",
                Some(&self.template_id),
                "—",
                "Plantilla desconocida",
            ),
            "segment" => self.audience.segment.label().to_string(),
            "scheduled_at" => self
                .scheduled_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "Sin programar".to_string()),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Collection, CollectionEditor};
    use crate::form::parse_draft;
    use strum::IntoEnumIterator;

    #[test]
    fn campaign_cycle_is_total() {
        for status in CampaignStatus::iter() {
            match status.next() {
                Some(next) => assert_ne!(next, CampaignStatus::Draft),
                None => assert_eq!(status, CampaignStatus::Completed),
            }
        }
        assert_eq!(CampaignStatus::Paused.next(), Some(CampaignStatus::Active));
    }

    #[test]
    fn variable_default_must_parse_as_declared_type() {
        let form = FormData::new()
            .with("key", "order_total")
            .with("label", "Total")
            .with("value_type", "number")
            .with("default_value", "twelve");
        let errors = parse_draft::<VariableDraft>(&form).unwrap_err();
        assert!(errors.for_field("default_value").is_some());

        let form = form.with("default_value", "12.5");
        let draft = parse_draft::<VariableDraft>(&form).unwrap();
        assert_eq!(draft.default_value, Some(FieldValue::Number(12.5)));
    }

    #[test]
    fn template_gets_default_styling_when_form_has_none() {
        let form = FormData::new()
            .with("name", "Bienvenida")
            .with("subject", "Hola {{first_name}}")
            .with("html_body", "<p>Hola</p>");
        let draft = parse_draft::<TemplateDraft>(&form).unwrap();
        let meta = RecordMeta::new(RecordId::new("t1"), Utc::now());
        let template = EmailTemplate::from_draft(draft, meta);

        assert_eq!(template.styling, TemplateStyling::default());
        assert_eq!(template.category_id, None);
    }

    #[test]
    fn create_dialog_keeps_default_template_color() {
        let mut editor = CollectionEditor::<EmailTemplate>::new(Collection::new());
        editor.open_create();
        let form = editor
            .form_values()
            .with("name", "Bienvenida")
            .with("subject", "Hola")
            .with("html_body", "<p>Hola</p>");
        assert_eq!(form.get("primary_color"), Some(DEFAULT_PRIMARY_COLOR));

        let id = editor.submit(&form).unwrap();
        let created = editor.collection().get(&id).unwrap();
        assert_eq!(created.styling, TemplateStyling::default());
        assert!(created.is_active);
    }

    #[test]
    fn create_dialog_starts_categories_on_default_color() {
        let form = TemplateCategory::blank_form();
        assert_eq!(form.get("color"), Some(DEFAULT_PRIMARY_COLOR));
        assert_eq!(form.get("name"), Some(""));
        assert!(parse_draft::<CategoryDraft>(&form.with("name", "Ventas")).is_ok());
    }

    #[test]
    fn template_rejects_lowercase_color() {
        let form = FormData::new()
            .with("name", "x")
            .with("subject", "y")
            .with("html_body", "<p/>")
            .with("primary_color", "#ffffff");
        let errors = parse_draft::<TemplateDraft>(&form).unwrap_err();
        assert!(errors.for_field("primary_color").is_some());
    }

    #[test]
    fn scheduled_campaign_needs_a_date() {
        let form = FormData::new()
            .with("name", "Lanzamiento")
            .with("template_id", "t1")
            .with("segment", "customers")
            .with("status", "scheduled");
        let errors = parse_draft::<CampaignDraft>(&form).unwrap_err();
        assert!(errors.for_field("scheduled_at").is_some());
    }

    #[test]
    fn dangling_template_reference_renders_fallback() {
        let meta = RecordMeta::new(RecordId::new("c1"), Utc::now());
        let campaign = Campaign {
            meta,
            name: "Promo".into(),
            template_id: RecordId::new("missing"),
            audience: RecipientFilter::default(),
            scheduled_at: None,
            status: CampaignStatus::Draft,
        };
        assert_eq!(campaign.cell("template", &References::new()), "Plantilla desconocida");
    }
}
