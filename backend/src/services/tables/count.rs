//! # Row Count Service
//!
//! Backend side of the `GET /api/tables/{table}/count` endpoint.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the table name from the URL path.
//!
//! 2.  **Allow-list**: the name must look like an SQL identifier *and* be one of the
//!     monitored tables. It is interpolated into the query only after both checks,
//!     so nothing user-controlled reaches SQLite unvetted.
//!
//! 3.  **Database Query**: `SqliteCounter::count_rows` opens the database read-only
//!     and runs `SELECT COUNT(*)`. The blocking call runs on actix's blocking pool.
//!
//! 4.  **HTTP Response**: `200 OK` with a [`CountResponse`], or the status chosen by
//!     [`CountError`]'s `ResponseError` implementation.
//!
//! The same counter also implements the shared [`RecordCounter`] capability, so the
//! bootstrap loader can run against a local database directly.

use std::path::PathBuf;
use std::sync::LazyLock;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use admin_common::api::{ApiError, CountResponse};
use admin_common::bootstrap::{BackendError, RecordCounter};
use async_trait::async_trait;
use log::{debug, warn};
use regex::Regex;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

static TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("table name pattern is valid"));

#[derive(Debug, Error)]
pub enum CountError {
    #[error("table `{0}` is not monitored")]
    UnknownTable(String),
    #[error("database unavailable: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("count task failed: {0}")]
    Task(String),
}

impl ResponseError for CountError {
    fn status_code(&self) -> StatusCode {
        match self {
            CountError::UnknownTable(_) => StatusCode::NOT_FOUND,
            CountError::Database(_) | CountError::Task(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError {
            error: self.to_string(),
        })
    }
}

impl From<CountError> for BackendError {
    fn from(err: CountError) -> Self {
        match err {
            CountError::UnknownTable(table) => BackendError::UnknownTable(table),
            other => BackendError::Status {
                status: other.status_code().as_u16(),
                message: other.to_string(),
            },
        }
    }
}

/// Counts rows of an allow-listed set of tables in one SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteCounter {
    database: PathBuf,
    tables: Vec<String>,
}

impl SqliteCounter {
    pub fn new(database: impl Into<PathBuf>, tables: Vec<String>) -> Self {
        Self {
            database: database.into(),
            tables,
        }
    }

    pub fn is_monitored(&self, table: &str) -> bool {
        TABLE_NAME_RE.is_match(table) && self.tables.iter().any(|t| t == table)
    }

    /// Blocking. A missing database file is an error, never created on the fly.
    pub fn count_rows(&self, table: &str) -> Result<u64, CountError> {
        if !self.is_monitored(table) {
            return Err(CountError::UnknownTable(table.to_string()));
        }
        let conn = Connection::open_with_flags(
            &self.database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let rows: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
            row.get(0)
        })?;
        Ok(u64::try_from(rows).unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl RecordCounter for SqliteCounter {
    async fn count(&self, table: &str) -> Result<u64, BackendError> {
        self.count_rows(table).map_err(BackendError::from)
    }
}

/// Actix web handler for `GET /api/tables/{table}/count`.
pub async fn process(
    counter: web::Data<SqliteCounter>,
    table: web::Path<String>,
) -> Result<HttpResponse, CountError> {
    let table = table.into_inner();
    let counter = counter.into_inner();
    let name = table.clone();

    let rows = web::block(move || counter.count_rows(&name))
        .await
        .map_err(|e| CountError::Task(e.to_string()))?
        .inspect_err(|e| warn!("count of {table} failed: {e}"))?;

    debug!("count of {table}: {rows}");
    Ok(HttpResponse::Ok().json(CountResponse { table, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tables::configure_routes;
    use actix_web::{test as atest, App};
    use admin_common::bootstrap::load_metrics;
    use admin_common::model::metrics::DataOrigin;
    use tempfile::TempDir;

    /// Database with three contacts, an empty deals table and no companies table.
    fn seeded_database() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE contacts (id INTEGER PRIMARY KEY, email TEXT);
             INSERT INTO contacts (email) VALUES ('ana@example.com'), ('luis@example.com'), ('eva@example.com');
             CREATE TABLE deals (id INTEGER PRIMARY KEY, amount REAL);",
        )
        .unwrap();
        (dir, path)
    }

    fn counter(path: &PathBuf) -> SqliteCounter {
        SqliteCounter::new(
            path.clone(),
            vec!["contacts".into(), "deals".into(), "companies".into()],
        )
    }

    #[test]
    fn counts_rows_of_monitored_tables() {
        let (_dir, path) = seeded_database();
        let counter = counter(&path);
        assert_eq!(counter.count_rows("contacts").unwrap(), 3);
        assert_eq!(counter.count_rows("deals").unwrap(), 0);
    }

    #[test]
    fn refuses_names_outside_the_allow_list() {
        let (_dir, path) = seeded_database();
        let counter = counter(&path);
        for name in ["sqlite_master", "contacts; DROP TABLE deals", "contacts\"", ""] {
            assert!(
                matches!(counter.count_rows(name), Err(CountError::UnknownTable(_))),
                "{name:?}"
            );
        }
    }

    #[test]
    fn missing_table_or_file_is_a_database_error() {
        let (dir, path) = seeded_database();
        assert!(matches!(
            counter(&path).count_rows("companies"),
            Err(CountError::Database(_))
        ));

        let absent = counter(&dir.path().join("absent.sqlite"));
        assert!(matches!(absent.count_rows("contacts"), Err(CountError::Database(_))));
        assert!(!dir.path().join("absent.sqlite").exists());
    }

    #[actix_web::test]
    async fn endpoint_answers_with_count_body() {
        let (_dir, path) = seeded_database();
        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(counter(&path)))
                .service(configure_routes()),
        )
        .await;

        let req = atest::TestRequest::get().uri("/api/tables/contacts/count").to_request();
        let body: CountResponse = atest::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            CountResponse {
                table: "contacts".into(),
                rows: 3
            }
        );
    }

    #[actix_web::test]
    async fn endpoint_maps_errors_to_statuses() {
        let (_dir, path) = seeded_database();
        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(counter(&path)))
                .service(configure_routes()),
        )
        .await;

        let req = atest::TestRequest::get().uri("/api/tables/payroll/count").to_request();
        let resp = atest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ApiError = serde_json::from_slice(&atest::read_body(resp).await).unwrap();
        assert!(body.error.contains("payroll"));

        let req = atest::TestRequest::get().uri("/api/tables/companies/count").to_request();
        let resp = atest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn bootstrap_against_a_local_database_is_live() {
        let (_dir, path) = seeded_database();
        let counter = counter(&path);
        let snapshot = load_metrics(
            &counter,
            &["contacts", "deals", "companies"],
            || 0.5,
            chrono::Utc::now(),
        )
        .await;

        assert_eq!(snapshot.origin, DataOrigin::Live);
        assert_eq!(snapshot.total_rows, 3);
        assert_eq!(snapshot.failed_tables().count(), 1);
    }
}
