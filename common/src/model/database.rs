//! Records of the database administration screen.
//!
//! These only describe connections, saved queries, schemas, tables and
//! migrations. Nothing here opens a connection or runs SQL.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use super::choice::Choice;
use super::record::{RecordId, RecordMeta};
use crate::editor::{Entity, References, SortValue};
use crate::form::{ColumnSpec, FieldSpec, FormData, FormReader, FromForm, InputKind};
use crate::validation::{Rules, Validate, ValidationErrors};

static MIGRATION_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,14}$").expect("migration version pattern is valid"));

fn reference_input(id: &Option<RecordId>) -> String {
    id.as_ref().map(RecordId::to_string).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DbEngine {
    #[default]
    #[serde(rename = "postgresql")]
    #[strum(serialize = "postgresql")]
    PostgreSql,
    #[serde(rename = "mysql")]
    #[strum(serialize = "mysql")]
    MySql,
    Sqlite,
    #[serde(rename = "sqlserver")]
    #[strum(serialize = "sqlserver")]
    SqlServer,
}

impl DbEngine {
    pub fn default_port(self) -> Option<u16> {
        match self {
            DbEngine::PostgreSql => Some(5432),
            DbEngine::MySql => Some(3306),
            DbEngine::SqlServer => Some(1433),
            DbEngine::Sqlite => None,
        }
    }

    /// File based engines have no host or port.
    pub fn is_embedded(self) -> bool {
        self == DbEngine::Sqlite
    }
}

impl Choice for DbEngine {
    fn label(&self) -> &'static str {
        match self {
            DbEngine::PostgreSql => "PostgreSQL",
            DbEngine::MySql => "MySQL",
            DbEngine::Sqlite => "SQLite",
            DbEngine::SqlServer => "SQL Server",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConnection {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub engine: DbEngine,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: String,
    pub username: Option<String>,
    pub ssl: bool,
    pub is_active: bool,
}

impl DbConnection {
    /// `engine://user@host:port/database`, without credentials beyond the user name.
    pub fn address(&self) -> String {
        if self.engine.is_embedded() {
            return format!("sqlite://{}", self.database);
        }
        let user = self
            .username
            .as_deref()
            .map(|u| format!("{u}@"))
            .unwrap_or_default();
        let host = self.host.as_deref().unwrap_or("localhost");
        let port = self
            .port
            .or(self.engine.default_port())
            .map(|p| format!(":{p}"))
            .unwrap_or_default();
        format!("{}://{user}{host}{port}/{}", self.engine.key(), self.database)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDraft {
    pub name: String,
    pub engine: DbEngine,
    pub host: String,
    /// Kept wide so out-of-range input reaches the range rule.
    pub port: Option<i64>,
    pub database: String,
    pub username: Option<String>,
    pub ssl: bool,
    pub is_active: bool,
}

impl ConnectionDraft {
    fn port(&self) -> Option<u16> {
        if self.engine.is_embedded() {
            return None;
        }
        self.port.and_then(|p| u16::try_from(p).ok())
    }
}

impl Validate for ConnectionDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 80)
            .required("database", &self.database);
        if !self.engine.is_embedded() {
            rules.required("host", &self.host);
            if let Some(port) = self.port {
                rules.in_range("port", port, 1, 65535);
            }
        }
        rules.finish()
    }
}

impl FromForm for ConnectionDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            engine: reader.choice("engine", DbEngine::PostgreSql),
            host: reader.text("host"),
            port: reader.optional_number("port"),
            database: reader.text("database"),
            username: reader.optional_text("username"),
            ssl: reader.checkbox("ssl"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("engine", self.engine.key())
            .with("host", &self.host)
            .with("port", self.port.map(|p| p.to_string()).unwrap_or_default())
            .with("database", &self.database)
            .with("username", self.username.clone().unwrap_or_default());
        form.set_flag("ssl", self.ssl);
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for DbConnection {
    type Draft = ConnectionDraft;
    const LABEL: &'static str = "conexión";

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
        let mut fields = vec![self.name.as_str(), self.database.as_str()];
        fields.extend(self.host.as_deref());
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "engine" => Some(SortValue::text(self.engine.label())),
            _ => None,
        }
    }

    fn from_draft(draft: ConnectionDraft, meta: RecordMeta) -> Self {
        let port = draft.port();
        Self {
            meta,
            name: draft.name,
            engine: draft.engine,
            host: Some(draft.host).filter(|h| !h.is_empty() && !draft.engine.is_embedded()),
            port,
            database: draft.database,
            username: draft.username,
            ssl: draft.ssl,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: ConnectionDraft) {
        let meta = self.meta.clone();
        *self = Self::from_draft(draft, meta);
    }

    fn to_draft(&self) -> ConnectionDraft {
        ConnectionDraft {
            name: self.name.clone(),
            engine: self.engine,
            host: self.host.clone().unwrap_or_default(),
            port: self.port.map(i64::from),
            database: self.database.clone(),
            username: self.username.clone(),
            ssl: self.ssl,
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::select::<DbEngine>("engine", "Motor"),
            FieldSpec::text("host", "Servidor").placeholder("db.interno.local"),
            FieldSpec::new(
                "port",
                "Puerto",
                InputKind::Number {
                    min: Some(1),
                    max: Some(65535),
                },
            ),
            FieldSpec::text("database", "Base de datos").required(),
            FieldSpec::text("username", "Usuario"),
            FieldSpec::checkbox("ssl", "Usar SSL"),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::sortable("engine", "Motor"),
            ColumnSpec::plain("address", "Dirección"),
            ColumnSpec::plain("ssl", "SSL"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "engine" => self.engine.label().to_string(),
            "address" => self.address(),
            "ssl" => if self.ssl { "Sí" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Saved queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub connection_id: RecordId,
    pub sql: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryDraft {
    pub name: String,
    pub connection_id: Option<RecordId>,
    pub sql: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Validate for QueryDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .max_len("name", &self.name, 100)
            .check(
                "connection_id",
                self.connection_id.is_some(),
                "Seleccione una conexión",
            )
            .required("sql", &self.sql)
            .finish()
    }
}

impl FromForm for QueryDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            connection_id: reader.reference("connection_id"),
            sql: reader.raw("sql"),
            description: reader.optional_text("description"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("connection_id", reference_input(&self.connection_id))
            .with("sql", &self.sql)
            .with("description", self.description.clone().unwrap_or_default());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for SavedQuery {
    type Draft = QueryDraft;
    const LABEL: &'static str = "consulta";

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
        let mut fields = vec![self.name.as_str(), self.sql.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            _ => None,
        }
    }

    fn from_draft(draft: QueryDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            connection_id: draft.connection_id.unwrap_or_else(|| RecordId::new("")),
            sql: draft.sql,
            description: draft.description,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: QueryDraft) {
        self.name = draft.name;
        if let Some(connection_id) = draft.connection_id {
            self.connection_id = connection_id;
        }
        self.sql = draft.sql;
        self.description = draft.description;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> QueryDraft {
        QueryDraft {
            name: self.name.clone(),
            connection_id: Some(self.connection_id.clone()),
            sql: self.sql.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::reference("connection_id", "Conexión", "connections"),
            FieldSpec::new("sql", "SQL", InputKind::Code { rows: 8 }).required(),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 2 }),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("connection", "Conexión"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "connection" => refs.describe(
                "connections",
                Some(&self.connection_id),
                "—",
                "Conexión desconocida",
            ),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Schemas and tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbSchema {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDraft {
    pub name: String,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Validate for SchemaDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .identifier("name", &self.name)
            .max_len("name", &self.name, 63)
            .finish()
    }
}

impl FromForm for SchemaDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            owner: reader.optional_text("owner"),
            description: reader.optional_text("description"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("owner", self.owner.clone().unwrap_or_default())
            .with("description", self.description.clone().unwrap_or_default());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for DbSchema {
    type Draft = SchemaDraft;
    const LABEL: &'static str = "esquema";

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
        fields.extend(self.owner.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::text(&self.name)),
            "owner" => self.owner.as_deref().map(SortValue::text),
            _ => None,
        }
    }

    fn from_draft(draft: SchemaDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            owner: draft.owner,
            description: draft.description,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: SchemaDraft) {
        self.name = draft.name;
        self.owner = draft.owner;
        self.description = draft.description;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> SchemaDraft {
        SchemaDraft {
            name: self.name.clone(),
            owner: self.owner.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required().placeholder("ventas"),
            FieldSpec::text("owner", "Propietario"),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 2 }),
            FieldSpec::checkbox("is_active", "Activo"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::sortable("owner", "Propietario"),
            ColumnSpec::plain("description", "Descripción"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "owner" => self.owner.clone().unwrap_or_default(),
            "description" => self.description.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTable {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub schema_id: RecordId,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDraft {
    pub name: String,
    pub schema_id: Option<RecordId>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Validate for TableDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .required("name", &self.name)
            .identifier("name", &self.name)
            .max_len("name", &self.name, 63)
            .check("schema_id", self.schema_id.is_some(), "Seleccione un esquema")
            .finish()
    }
}

impl FromForm for TableDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            name: reader.text("name"),
            schema_id: reader.reference("schema_id"),
            description: reader.optional_text("description"),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("name", &self.name)
            .with("schema_id", reference_input(&self.schema_id))
            .with("description", self.description.clone().unwrap_or_default());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for DbTable {
    type Draft = TableDraft;
    const LABEL: &'static str = "tabla";

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

    fn from_draft(draft: TableDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            name: draft.name,
            schema_id: draft.schema_id.unwrap_or_else(|| RecordId::new("")),
            description: draft.description,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: TableDraft) {
        self.name = draft.name;
        if let Some(schema_id) = draft.schema_id {
            self.schema_id = schema_id;
        }
        self.description = draft.description;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> TableDraft {
        TableDraft {
            name: self.name.clone(),
            schema_id: Some(self.schema_id.clone()),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Nombre").required().placeholder("contactos"),
            FieldSpec::reference("schema_id", "Esquema", "schemas"),
            FieldSpec::new("description", "Descripción", InputKind::TextArea { rows: 2 }),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("schema", "Esquema"),
            ColumnSpec::plain("description", "Descripción"),
        ]
    }

    fn cell(&self, key: &str, refs: &References) -> String {
        match key {
            "name" => self.name.clone(),
            "schema" => refs.describe(
                "schemas",
                Some(&self.schema_id),
                "—",
                "Esquema desconocido",
            ),
            "description" => self.description.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Migrations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Migration {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub version: String,
    pub name: String,
    pub up_sql: String,
    pub down_sql: Option<String>,
    pub is_active: bool,
}

impl Migration {
    pub fn is_reversible(&self) -> bool {
        self.down_sql.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationDraft {
    pub version: String,
    pub name: String,
    pub up_sql: String,
    pub down_sql: Option<String>,
    pub is_active: bool,
}

impl Validate for MigrationDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new()
            .pattern(
                "version",
                &self.version,
                &MIGRATION_VERSION_RE,
                "Use de 3 a 14 dígitos, p. ej. 20240601120000",
            )
            .required("name", &self.name)
            .max_len("name", &self.name, 120)
            .required("up_sql", &self.up_sql)
            .finish()
    }
}

impl FromForm for MigrationDraft {
    fn from_form(reader: &mut FormReader<'_>) -> Self {
        Self {
            version: reader.text("version"),
            name: reader.text("name"),
            up_sql: reader.raw("up_sql"),
            down_sql: Some(reader.raw("down_sql")).filter(|sql| !sql.trim().is_empty()),
            is_active: reader.checkbox("is_active"),
        }
    }

    fn to_form(&self) -> FormData {
        let mut form = FormData::new()
            .with("version", &self.version)
            .with("name", &self.name)
            .with("up_sql", &self.up_sql)
            .with("down_sql", self.down_sql.clone().unwrap_or_default());
        form.set_flag("is_active", self.is_active);
        form
    }
}

impl Entity for Migration {
    type Draft = MigrationDraft;
    const LABEL: &'static str = "migración";

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
        vec![self.version.as_str(), self.name.as_str()]
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            // Versions are digit strings of varying width; compare them numerically.
            "version" => self.version.parse::<f64>().ok().map(SortValue::Number),
            "name" => Some(SortValue::text(&self.name)),
            _ => None,
        }
    }

    fn from_draft(draft: MigrationDraft, meta: RecordMeta) -> Self {
        Self {
            meta,
            version: draft.version,
            name: draft.name,
            up_sql: draft.up_sql,
            down_sql: draft.down_sql,
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: MigrationDraft) {
        self.version = draft.version;
        self.name = draft.name;
        self.up_sql = draft.up_sql;
        self.down_sql = draft.down_sql;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> MigrationDraft {
        MigrationDraft {
            version: self.version.clone(),
            name: self.name.clone(),
            up_sql: self.up_sql.clone(),
            down_sql: self.down_sql.clone(),
            is_active: self.is_active,
        }
    }

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("version", "Versión").required().placeholder("20240601120000"),
            FieldSpec::text("name", "Nombre").required(),
            FieldSpec::new("up_sql", "SQL de aplicación", InputKind::Code { rows: 8 }).required(),
            FieldSpec::new("down_sql", "SQL de reversión", InputKind::Code { rows: 6 }),
            FieldSpec::checkbox("is_active", "Activa"),
        ]
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::sortable("version", "Versión"),
            ColumnSpec::sortable("name", "Nombre"),
            ColumnSpec::plain("reversible", "Reversible"),
        ]
    }

    fn cell(&self, key: &str, _refs: &References) -> String {
        match key {
            "version" => self.version.clone(),
            "name" => self.name.clone(),
            "reversible" => if self.is_reversible() { "Sí" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::parse_draft;
    use chrono::Utc;

    fn connection_form(engine: &str, host: &str, port: &str) -> FormData {
        FormData::new()
            .with("name", "Principal")
            .with("engine", engine)
            .with("host", host)
            .with("port", port)
            .with("database", "crm")
    }

    #[test]
    fn port_must_be_in_range() {
        let errors =
            parse_draft::<ConnectionDraft>(&connection_form("postgresql", "db", "70000")).unwrap_err();
        assert_eq!(errors.for_field("port"), Some("Debe estar entre 1 y 65535"));

        let errors =
            parse_draft::<ConnectionDraft>(&connection_form("mysql", "db", "abc")).unwrap_err();
        assert!(errors.for_field("port").is_some());
    }

    #[test]
    fn sqlite_needs_no_host_and_drops_port() {
        let draft = parse_draft::<ConnectionDraft>(&connection_form("sqlite", "", "5432")).unwrap();
        let meta = RecordMeta::new(RecordId::new("c1"), Utc::now());
        let connection = DbConnection::from_draft(draft, meta);

        assert_eq!(connection.host, None);
        assert_eq!(connection.port, None);
        assert_eq!(connection.address(), "sqlite://crm");
    }

    #[test]
    fn network_engines_need_a_host() {
        let errors =
            parse_draft::<ConnectionDraft>(&connection_form("sqlserver", "", "")).unwrap_err();
        assert!(errors.for_field("host").is_some());
    }

    #[test]
    fn address_falls_back_to_engine_port() {
        let draft = parse_draft::<ConnectionDraft>(
            &connection_form("postgresql", "db.local", "").with("username", "admin"),
        )
        .unwrap();
        let connection = DbConnection::from_draft(draft, RecordMeta::new(RecordId::new("c2"), Utc::now()));
        assert_eq!(connection.address(), "postgresql://admin@db.local:5432/crm");
    }

    #[test]
    fn migration_version_is_numeric() {
        let form = FormData::new()
            .with("version", "v1")
            .with("name", "Crear contactos")
            .with("up_sql", "CREATE TABLE contacts (id INTEGER PRIMARY KEY);");
        let errors = parse_draft::<MigrationDraft>(&form).unwrap_err();
        assert!(errors.for_field("version").is_some());

        let draft = parse_draft::<MigrationDraft>(&form.with("version", "001")).unwrap();
        assert_eq!(draft.down_sql, None);
    }

    #[test]
    fn query_without_connection_is_rejected() {
        let form = FormData::new().with("name", "Activos").with("sql", "SELECT 1");
        let errors = parse_draft::<QueryDraft>(&form).unwrap_err();
        assert_eq!(errors.for_field("connection_id"), Some("Seleccione una conexión"));
    }

    #[test]
    fn dangling_references_use_fallback_labels() {
        let now = Utc::now();
        let query = SavedQuery {
            meta: RecordMeta::new(RecordId::new("q1"), now),
            name: "Activos".into(),
            connection_id: RecordId::new("gone"),
            sql: "SELECT 1".into(),
            description: None,
            is_active: true,
        };
        let table = DbTable {
            meta: RecordMeta::new(RecordId::new("t1"), now),
            name: "contacts".into(),
            schema_id: RecordId::new("gone"),
            description: None,
            is_active: true,
        };
        let refs = References::new();
        assert_eq!(query.cell("connection", &refs), "Conexión desconocida");
        assert_eq!(table.cell("schema", &refs), "Esquema desconocido");
    }
}
