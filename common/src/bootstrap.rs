//! Mount-time population of a screen's aggregate configuration.
//!
//! Most screens load fixtures. The performance screen counts rows in the
//! monitored tables through a [`RecordCounter`], issuing every count at once and
//! keeping whatever succeeded. When not a single count succeeds the backend is
//! treated as unreachable and placeholder metrics are produced instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use thiserror::Error;

use crate::model::metrics::{DemoMetrics, LiveMetrics, MetricsSnapshot, TableCount};
use crate::model::record::Clock;
use crate::shell::Fixtures;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("table `{0}` is not available")]
    UnknownTable(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Read-only row counting capability of the backend.
#[async_trait(?Send)]
pub trait RecordCounter {
    async fn count(&self, table: &str) -> Result<u64, BackendError>;
}

/// Fixture load. Async only so every screen goes through the same loading state.
pub async fn load_fixtures<C: Fixtures>(clock: &dyn Clock) -> C {
    C::fixtures(clock)
}

/// Counts every table concurrently; a failed count never affects the others.
pub async fn load_table_counts<R>(counter: &R, tables: &[&str]) -> Vec<TableCount>
where
    R: RecordCounter + ?Sized,
{
    let queries = tables.iter().map(|&table| async move {
        match counter.count(table).await {
            Ok(rows) => TableCount::ok(table, rows),
            Err(err) => {
                warn!("count of {table} failed: {err}");
                TableCount::failed(table)
            }
        }
    });
    join_all(queries).await
}

/// Live snapshot when at least one count succeeded, placeholder numbers otherwise.
pub async fn load_metrics<R>(
    counter: &R,
    tables: &[&str],
    jitter: impl FnMut() -> f64,
    now: DateTime<Utc>,
) -> MetricsSnapshot
where
    R: RecordCounter + ?Sized,
{
    let counts = load_table_counts(counter, tables).await;
    let reachable = counts.iter().any(|count| count.rows.is_some());

    if reachable {
        let snapshot = LiveMetrics::from_counts(&counts, now);
        info!(
            "collected live metrics: {} rows across {} tables",
            snapshot.total_rows,
            snapshot.tables.len()
        );
        snapshot
    } else {
        warn!("backend unreachable, showing simulated metrics");
        DemoMetrics::generate(tables, jitter, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::DataOrigin;

    struct Fixed;

    #[async_trait(?Send)]
    impl RecordCounter for Fixed {
        async fn count(&self, table: &str) -> Result<u64, BackendError> {
            match table {
                "contacts" => Ok(12),
                other => Err(BackendError::UnknownTable(other.to_string())),
            }
        }
    }

    #[test]
    fn partial_failure_stays_live() {
        let snapshot = futures::executor::block_on(load_metrics(
            &Fixed,
            &["contacts", "ghosts"],
            || 0.0,
            Utc::now(),
        ));
        assert_eq!(snapshot.origin, DataOrigin::Live);
        assert_eq!(snapshot.total_rows, 12);
        assert_eq!(snapshot.failed_tables().collect::<Vec<_>>(), vec!["ghosts"]);
    }
}
