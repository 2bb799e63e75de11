//! # Table Service Module
//!
//! Read-only access to the CRM tables. The console only ever needs row counts,
//! so this is the whole surface:
//!
//! ## Sub-modules:
//! - `count`: the SQLite-backed [`SqliteCounter`] and its HTTP handler.

mod count;

use actix_web::web::{get, scope};
use actix_web::Scope;

pub use count::SqliteCounter;

/// The base path for all table endpoints.
const API_PATH: &str = "/api/tables";

/// Configures and returns the Actix `Scope` for the table routes.
///
/// # Registered Routes:
///
/// *   **`GET /{table}/count`**:
///     - **Handler**: `count::process`
///     - **Description**: Exact row count of one monitored table as
///       `{"table": "...", "rows": n}`. Tables outside the monitored list answer
///       `404`; database failures answer `503`. Both carry `{"error": "..."}`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{table}/count", get().to(count::process))
}
