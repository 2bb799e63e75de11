use chrono::{DateTime, Utc};

use super::fixture_meta;
use crate::editor::{Collection, Lens, References};
use crate::model::database::{DbConnection, DbEngine, DbSchema, DbTable, Migration, SavedQuery};
use crate::model::record::{Clock, RecordId};
use crate::shell::{Aggregate, Fixtures, StatCard, TabSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseAdminConfig {
    pub connections: Collection<DbConnection>,
    pub queries: Collection<SavedQuery>,
    pub schemas: Collection<DbSchema>,
    pub tables: Collection<DbTable>,
    pub migrations: Collection<Migration>,
}

pub const CONNECTIONS: Lens<DatabaseAdminConfig, DbConnection> =
    lens!(DatabaseAdminConfig, connections: DbConnection);
pub const QUERIES: Lens<DatabaseAdminConfig, SavedQuery> =
    lens!(DatabaseAdminConfig, queries: SavedQuery);
pub const SCHEMAS: Lens<DatabaseAdminConfig, DbSchema> =
    lens!(DatabaseAdminConfig, schemas: DbSchema);
pub const TABLES: Lens<DatabaseAdminConfig, DbTable> = lens!(DatabaseAdminConfig, tables: DbTable);
pub const MIGRATIONS: Lens<DatabaseAdminConfig, Migration> =
    lens!(DatabaseAdminConfig, migrations: Migration);

impl Aggregate for DatabaseAdminConfig {
    const TITLE: &'static str = "Administración de base de datos";

    fn tabs() -> Vec<TabSpec> {
        vec![
            TabSpec::new(CONNECTIONS.name, "Conexiones"),
            TabSpec::new(QUERIES.name, "Consultas"),
            TabSpec::new(SCHEMAS.name, "Esquemas"),
            TabSpec::new(TABLES.name, "Tablas"),
            TabSpec::new(MIGRATIONS.name, "Migraciones"),
        ]
    }

    fn stats(&self, _now: DateTime<Utc>) -> Vec<StatCard> {
        let latest = self
            .migrations
            .iter()
            .filter_map(|m| m.version.parse::<u64>().ok().map(|v| (v, m.version.as_str())))
            .max_by_key(|(v, _)| *v)
            .map(|(_, version)| version.to_string())
            .unwrap_or_else(|| "—".to_string());
        vec![
            StatCard::for_collection("Conexiones", &self.connections),
            StatCard::for_collection("Consultas guardadas", &self.queries),
            StatCard::new("Tablas", self.tables.len())
                .detail(format!("en {} esquemas", self.schemas.len())),
            StatCard::new("Última migración", latest)
                .detail(format!("{} registradas", self.migrations.len())),
        ]
    }

    fn references(&self) -> References {
        References::new()
            .with(CONNECTIONS.name, self.connections.ref_options())
            .with(SCHEMAS.name, self.schemas.ref_options())
    }
}

impl Fixtures for DatabaseAdminConfig {
    fn fixtures(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let connections = vec![
            DbConnection {
                meta: fixture_meta("conn-primary", now),
                name: "Producción".into(),
                engine: DbEngine::PostgreSql,
                host: Some("db.crm.internal".into()),
                port: Some(5432),
                database: "crm".into(),
                username: Some("crm_admin".into()),
                ssl: true,
                is_active: true,
            },
            DbConnection {
                meta: fixture_meta("conn-replica", now),
                name: "Réplica de lectura".into(),
                engine: DbEngine::PostgreSql,
                host: Some("replica.crm.internal".into()),
                port: Some(5432),
                database: "crm".into(),
                username: Some("readonly".into()),
                ssl: true,
                is_active: true,
            },
            DbConnection {
                meta: fixture_meta("conn-local", now),
                name: "Desarrollo local".into(),
                engine: DbEngine::Sqlite,
                host: None,
                port: None,
                database: "crm.sqlite".into(),
                username: None,
                ssl: false,
                is_active: false,
            },
        ];

        let queries = vec![
            SavedQuery {
                meta: fixture_meta("qry-open-deals", now),
                name: "Negocios abiertos".into(),
                connection_id: RecordId::new("conn-replica"),
                sql: "SELECT id, title, amount\nFROM deals\nWHERE stage <> 'closed';".into(),
                description: Some("Pipeline actual".into()),
                is_active: true,
            },
            SavedQuery {
                meta: fixture_meta("qry-stale-contacts", now),
                name: "Contactos sin actividad".into(),
                connection_id: RecordId::new("conn-primary"),
                sql: "SELECT c.id FROM contacts c\nLEFT JOIN activities a ON a.contact_id = c.id\nWHERE a.id IS NULL;".into(),
                description: None,
                is_active: true,
            },
        ];

        let schemas = vec![
            DbSchema {
                meta: fixture_meta("sch-public", now),
                name: "public".into(),
                owner: Some("crm_admin".into()),
                description: Some("Esquema principal".into()),
                is_active: true,
            },
            DbSchema {
                meta: fixture_meta("sch-audit", now),
                name: "audit".into(),
                owner: Some("crm_admin".into()),
                description: None,
                is_active: true,
            },
        ];

        let tables = ["contacts", "companies", "deals", "activities"]
            .into_iter()
            .map(|name| DbTable {
                meta: fixture_meta(&format!("tbl-{name}"), now),
                name: name.into(),
                schema_id: RecordId::new("sch-public"),
                description: None,
                is_active: true,
            })
            .chain(std::iter::once(DbTable {
                meta: fixture_meta("tbl-events", now),
                name: "events".into(),
                schema_id: RecordId::new("sch-audit"),
                description: Some("Registro de cambios".into()),
                is_active: true,
            }))
            .collect();

        let migrations = vec![
            Migration {
                meta: fixture_meta("mig-001", now),
                version: "20240101000000".into(),
                name: "Crear tablas base".into(),
                up_sql: "CREATE TABLE contacts (id BIGSERIAL PRIMARY KEY, email TEXT NOT NULL);".into(),
                down_sql: Some("DROP TABLE contacts;".into()),
                is_active: true,
            },
            Migration {
                meta: fixture_meta("mig-002", now),
                version: "20240315093000".into(),
                name: "Índice por correo".into(),
                up_sql: "CREATE UNIQUE INDEX contacts_email_idx ON contacts (email);".into(),
                down_sql: None,
                is_active: true,
            },
        ];

        Self {
            connections: Collection::from_records(connections),
            queries: Collection::from_records(queries),
            schemas: Collection::from_records(schemas),
            tables: Collection::from_records(tables),
            migrations: Collection::from_records(migrations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{CollectionEditor, Entity};
    use crate::model::record::ManualClock;

    #[test]
    fn removing_a_connection_leaves_queries_dangling_but_renderable() {
        let config = DatabaseAdminConfig::fixtures(&ManualClock::default());
        let mut editor = CollectionEditor::new(CONNECTIONS.view(&config).clone());

        assert!(editor.remove(&RecordId::new("conn-replica")));
        let next = editor.publish(&CONNECTIONS, &config);

        assert_eq!(next.queries, config.queries);
        let query = next.queries.get(&RecordId::new("qry-open-deals")).unwrap();
        assert_eq!(query.cell("connection", &next.references()), "Conexión desconocida");
    }

    #[test]
    fn latest_migration_stat() {
        let config = DatabaseAdminConfig::fixtures(&ManualClock::default());
        let stats = config.stats(Utc::now());
        assert_eq!(stats[3].value, "20240315093000");
        assert_eq!(stats[2].value, "5");
    }
}
