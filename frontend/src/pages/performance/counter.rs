//! Browser implementation of the shared [`RecordCounter`] capability.

use admin_common::api::{ApiError, CountResponse};
use admin_common::bootstrap::{BackendError, RecordCounter};
use admin_common::config::ConsoleConfig;
use async_trait::async_trait;
use gloo_net::http::Request;

/// Asks the console backend for row counts over `GET {api_base}/tables/{table}/count`.
pub struct HttpRecordCounter {
    config: ConsoleConfig,
}

impl HttpRecordCounter {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    async fn fetch_count(&self, table: &str) -> Result<u64, BackendError> {
        let response = Request::get(&self.config.count_url(table))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        match response.status() {
            200 => response
                .json::<CountResponse>()
                .await
                .map(|body| body.rows)
                .map_err(|e| BackendError::Decode(e.to_string())),
            404 => Err(BackendError::UnknownTable(table.to_string())),
            status => {
                let message = match response.json::<ApiError>().await {
                    Ok(body) => body.error,
                    Err(_) => response.status_text(),
                };
                Err(BackendError::Status { status, message })
            }
        }
    }
}

#[async_trait(?Send)]
impl RecordCounter for HttpRecordCounter {
    async fn count(&self, table: &str) -> Result<u64, BackendError> {
        self.fetch_count(table).await.inspect_err(|err| {
            gloo_console::warn!(format!("conteo de {table} fallido: {err}"));
        })
    }
}
