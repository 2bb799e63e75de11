//! Records of the custom field management screen.

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use super::record::{RecordId, RecordMeta};
use super::value::{FieldType, FieldValue};
use crate::editor::{Entity, References, SortValue};
use crate::form::{ColumnSpec, FieldSpec, FormData, FormReader, FromForm, InputKind};
use crate::validation::{Rules, Validate, ValidationErrors};

/// CRM object a custom field is attached to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Contact,
    Company,
    Deal,
    Lead,
}

impl Choice for EntityKind {
    fn label(&self) -> &'static str {
        match self {
            EntityKind::Contact => "Contacto",
            EntityKind::Company => "Empresa",
            EntityKind::Deal => "Negocio",
            EntityKind::Lead => "Prospecto",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub label: String,
    pub entity: EntityKind,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub default_value: Option<FieldValue>,
    pub required: bool,
    pub group_id: Option<RecordId>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldDraft {
    pub name: String,
    pub label: String,
    pub entity: EntityKind,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub default_value: Option<FieldValue>,
    pub required: bool,
    pub group_id: Option<RecordId>,
    pub is_active: bool,
}

impl Validate for CustomFieldDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .identifier("name", &self.name)
            .max_len("name", &self.name, 64)
            .required("label", &self.label)
            .max_len("label", &self.label, 100);

        if self.field_type == FieldType::Select {
            rules.check(
                "options",
                !self.options.is_empty(),
                "Una lista de selección necesita al menos una opción",
            );
        }

        match &self.default_value {
            Some(FieldValue::Choice(choice)) if self.field_type == FieldType::Select => {
                rules.check(
                    "default_value",
                    self.options.contains(choice),
                    "El valor por defecto debe ser una de las opciones",
                );
            }
            Some(value) => {
                rules.check(
                    "default_value",
                    value.matches(self.field_type),
                    "El valor por defecto no coincide con el tipo",
                );
            }
            None => {}
        }
        rules.finish()
    }
}

impl FromForm for CustomFieldDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        let field_type = reader.choice("field_type", FieldType::Text);
        let default_value = reader.optional_text("default_value").and_then(|raw| {
            FieldValue::parse(field_type, &raw)
                .map_err(|message| reader.error("default_value", message))
                .ok()
        });
        Self {
            name: reader.text("name"),
            label: reader.text("label"),
            entity: reader.choice("entity", EntityKind::Contact),
            field_type,
            options: reader.lines("options"),
            default_value,
            required: reader.checkbox("required"),
            group_id: reader.reference("group_id"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("label", &self.label)
            .with("entity", self.entity.key())
            .with("field_type", self.field_type.key())
            .with("options", self.options.join("\n"))
            .with(
                "default_value",
                self.default_value.as_ref().map(FieldValue::to_input).unwrap_or_default(),
            )
            .with("group_id", self.group_id.as_ref().map(RecordId::to_string).unwrap_or_default());
        form.set_flag("required", self.required);
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for CustomField {
    type Draft = CustomFieldDraft;
    const LABEL: &'static str = "campo";

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
        vec![self.name.as_str(), self.label.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "label" => Some(SortValue::text(&self.label)),
            "entity" => Some(SortValue::text(self.entity.label())),
            _ => None,
        }
    }

    fn from_draft(draft: CustomFieldDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            label: draft.label,
            entity: draft.entity,
            field_type: draft.field_type,
            options: draft.options,
            default_value: draft.default_value,
            required: draft.required,
            group_id: draft.group_id,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: CustomFieldDraft) {
        self.name = draft.name;
        self.label = draft.label;
        self.entity = draft.entity;
        self.field_type = draft.field_type;
        self.options = draft.options;
        self.default_value = draft.default_value;
        self.required = draft.required;
        self.group_id = draft.group_id;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> CustomFieldDraft {
        CustomFieldDraft {
            name: self.name.clone(),
            label: self.label.clone(),
            entity: self.entity,
            field_type: self.field_type,
            options: self.options.clone(),
            default_value: self.default_value.clone(),
            required: self.required,
            group_id: self.group_id.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("label", "Etiqueta").required(),
            FieldSpec::text("name", "Nombre interno").required().placeholder("fecha_renovacion"),
            FieldSpec::select::<EntityKind>("entity", "Entidad"),
            FieldSpec::select::<FieldType>("field_type", "Tipo de campo"),
            FieldSpec::new("options", "Opciones (una por línea)", InputKind::TextArea { rows: 4 }),
            FieldSpec::text("default_value", "Valor por defecto"),
            FieldSpec::optional_reference("group_id", "Grupo", "groups"),
            FieldSpec::checkbox("required", "Obligatorio"),
            FieldSpec::checkbox("is_active", "Activo"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("label", "Etiqueta"),
            ColumnSpec::sortable("name", "Nombre interno"),
            ColumnSpec::sortable("entity", "Entidad"),
            ColumnSpec::plain("field_type", "Tipo"),
            ColumnSpec::plain("group", "Grupo"),
            ColumnSpec::plain("required", "Obligatorio"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "label" => self.label.clone(),
            "name" => self.name.clone(),
            "entity" => self.entity.label().to_string(),
            "field_type" => self.field_type.label().to_string(),
            "group" => refs.describe("groups", self.group_id.as_ref(), "Sin grupo", "Grupo desconocido"),
            "required" => if self.required { "Sí" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }
}

/// Visual grouping of custom fields on record pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub description: Option<String>,
    pub position: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroupDraft {
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
    pub is_active: bool,
}

impl Validate for FieldGroupDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .max_len("name", &self.name, 60)
            .in_range("position", self.position, 0, 999)
            .finish()
    }
}

impl FromForm for FieldGroupDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            description: reader.optional_text("description"),
            position: reader.optional_number("position").unwrap_or(0),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("description", self.description.clone().unwrap_or_default())
            .with("position", self.position.to_string());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for FieldGroup {
    type Draft = FieldGroupDraft;
    const LABEL: &'static str = "grupo";

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
            "position" => Some(SortValue::Number(f64::from(self.position))),
            _ => None,
        }
    }

    fn from_draft(draft: FieldGroupDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            description: draft.description,
            position: u32::try_from(draft.position).unwrap_or_default(),
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: FieldGroupDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.position = u32::try_from(draft.position).unwrap_or_default();
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> FieldGroupDraft {
        FieldGroupDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            position: i64::from(self.position),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 2 }),
            FieldSpec::new(
                "position",
                "Posición",
                InputKind::Number {
                    min: Some(0),
                    max: Some(999),
                },
            ),
            FieldSpec::checkbox("is_active", "Activo"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("position", "#"),
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("description", "Descripción"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "position" => self.position.to_string(),
            "name" => self.name.clone(),
            "description" => self.description.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::parse_draft;

    fn select_form(options: &str, default: &str) -> FormData {
        FormData::new()
            .with("name", "tier")
            .with("label", "Nivel")
            .with("entity", "company")
            .with("field_type", "select")
            .with("options", options)
            .with("default_value", default)
    }

    #[test]
    fn select_requires_options() {
        let errors = parse_draft::<CustomFieldDraft>(&select_form("", "")).unwrap_err();
        assert!(errors.for_field("options").is_some());
    }

    #[test]
    fn select_default_must_be_an_option() {
        let errors =
            parse_draft::<CustomFieldDraft>(&select_form("Oro\nPlata", "Bronce")).unwrap_err();
        assert!(errors.for_field("default_value").is_some());

        let draft = parse_draft::<CustomFieldDraft>(&select_form("Oro\nPlata", "Plata")).unwrap();
        assert_eq!(draft.options, vec!["Oro", "Plata"]);
        assert_eq!(draft.default_value, Some(FieldValue::Choice("Plata".into())));
        assert_eq!(draft.entity, EntityKind::Company);
    }

    #[test]
    fn group_position_is_bounded() {
        let form = FormData::new().with("name", "Facturación").with("position", "1000");
        let errors = parse_draft::<FieldGroupDraft>(&form).unwrap_err();
        assert!(errors.for_field("position").is_some());
    }
}
