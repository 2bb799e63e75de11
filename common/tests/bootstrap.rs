use std::cell::RefCell;
use std::collections::HashMap;

use admin_common::bootstrap::{
    BackendError, RecordCounter, load_fixtures, load_metrics, load_table_counts,
};
use admin_common::config::MONITORED_TABLES;
use admin_common::model::metrics::DataOrigin;
use admin_common::model::record::ManualClock;
use admin_common::screens::maintenance::MaintenanceConfig;
use admin_common::shell::{Aggregate, ShellState};
use async_trait::async_trait;
use chrono::Utc;

/// Counter answering from a table of canned results, remembering what it was asked.
#[derive(Default)]
struct ScriptedCounter {
    answers: HashMap<&'static str, Result<u64, BackendError>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedCounter {
    fn answer(mut self, table: &'static str, result: Result<u64, BackendError>) -> Self {
        self.answers.insert(table, result);
        self
    }
}

#[async_trait(?Send)]
impl RecordCounter for ScriptedCounter {
    async fn count(&self, table: &str) -> Result<u64, BackendError> {
        self.asked.borrow_mut().push(table.to_string());
        self.answers
            .get(table)
            .cloned()
            .unwrap_or_else(|| Err(BackendError::Transport("connection refused".into())))
    }
}

#[tokio::test]
async fn every_table_is_counted_and_failures_stay_isolated() {
    let counter = ScriptedCounter::default()
        .answer("contacts", Ok(1_200))
        .answer("deals", Ok(80))
        .answer(
            "companies",
            Err(BackendError::Status {
                status: 503,
                message: "database locked".into(),
            }),
        );

    let counts = load_table_counts(&counter, &MONITORED_TABLES).await;

    assert_eq!(counts.len(), MONITORED_TABLES.len());
    assert_eq!(counter.asked.borrow().len(), MONITORED_TABLES.len());
    for (count, table) in counts.iter().zip(MONITORED_TABLES) {
        assert_eq!(count.table, table);
    }
    assert_eq!(counts[0].rows, Some(1_200));
    assert_eq!(counts[1].rows, None);
    assert_eq!(counts[2].rows, Some(80));
}

#[tokio::test]
async fn partial_failure_yields_live_metrics_with_zeroes() {
    let counter = ScriptedCounter::default().answer("contacts", Ok(1_000));
    let snapshot = load_metrics(&counter, &MONITORED_TABLES, || 0.5, Utc::now()).await;

    assert_eq!(snapshot.origin, DataOrigin::Live);
    assert_eq!(snapshot.total_rows, 1_000);
    assert_eq!(snapshot.failed_tables().count(), MONITORED_TABLES.len() - 1);
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_simulated_metrics() {
    let counter = ScriptedCounter::default();
    let mut draws = 0;
    let snapshot = load_metrics(
        &counter,
        &MONITORED_TABLES,
        || {
            draws += 1;
            0.25
        },
        Utc::now(),
    )
    .await;

    assert_eq!(snapshot.origin, DataOrigin::Simulated);
    assert_eq!(draws, MONITORED_TABLES.len());
    assert!(snapshot.total_rows > 0);
    assert_eq!(snapshot.failed_tables().count(), 0);
}

#[tokio::test]
async fn fixture_bootstrap_clears_the_loading_flag() {
    let clock = ManualClock::default();
    let mut shell = ShellState::<MaintenanceConfig>::new();
    assert!(shell.is_loading());

    let config: MaintenanceConfig = load_fixtures(&clock).await;
    shell.finish_loading(config);

    assert!(!shell.is_loading());
    assert_eq!(shell.config().windows.len(), 2);
    assert_eq!(shell.stats(Utc::now()).len(), 4);
    assert_eq!(MaintenanceConfig::tabs().len(), 2);
}
