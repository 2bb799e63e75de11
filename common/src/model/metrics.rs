//! Performance monitoring snapshot.
//!
//! Two sources produce a [`MetricsSnapshot`]: [`LiveMetrics`] derives estimates
//! from real per-table row counts, [`DemoMetrics`] fabricates placeholder numbers.
//! They never share a code path, and every snapshot records which one built it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estimated index footprint as a share of table data.
pub const INDEX_RATIO: f64 = 0.30;
pub const CACHE_HIT_CEILING: f64 = 0.99;
pub const CACHE_HIT_FLOOR: f64 = 0.80;
/// Row count at which the estimated cache-hit ratio has dropped by the full range.
const CACHE_PRESSURE_ROWS: f64 = 1_000_000.0;
const DEFAULT_ROW_BYTES: u64 = 512;

/// Rough average row width per monitored table, in bytes.
pub fn average_row_bytes(table: &str) -> u64 {
    match table {
        "contacts" => 1024,
        "companies" => 768,
        "deals" => 640,
        "activities" => 384,
        "email_templates" => 4096,
        "campaigns" => 512,
        "custom_fields" => 256,
        _ => DEFAULT_ROW_BYTES,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Simulated,
}

/// Outcome of one count query. `rows` is `None` when the query failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub rows: Option<u64>,
}

impl TableCount {
    pub fn ok(table: &str, rows: u64) -> Self {
        Self {
            table: table.to_string(),
            rows: Some(rows),
        }
    }

    pub fn failed(table: &str) -> Self {
        Self {
            table: table.to_string(),
            rows: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetric {
    pub table: String,
    pub rows: u64,
    pub estimated_bytes: u64,
    pub index_bytes: u64,
    /// The count query for this table failed; `rows` is a stand-in zero.
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub origin: DataOrigin,
    pub tables: Vec<TableMetric>,
    pub total_rows: u64,
    pub total_bytes: u64,
    pub cache_hit_ratio: f64,
    pub collected_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub fn is_live(&self) -> bool {
        self.origin == DataOrigin::Live
    }

    pub fn failed_tables(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().filter(|t| t.failed).map(|t| t.table.as_str())
    }

    pub fn total_index_bytes(&self) -> u64 {
        self.tables.iter().map(|t| t.index_bytes).sum()
    }
}

fn estimate(table: &str, rows: u64, failed: bool) -> TableMetric {
    let estimated_bytes = rows.saturating_mul(average_row_bytes(table));
    TableMetric {
        table: table.to_string(),
        rows,
        estimated_bytes,
        index_bytes: (estimated_bytes as f64 * INDEX_RATIO).round() as u64,
        failed,
    }
}

/// Cache hit ratio that degrades linearly with data volume.
pub fn estimated_cache_hit_ratio(total_rows: u64) -> f64 {
    let pressure = total_rows as f64 / CACHE_PRESSURE_ROWS;
    (CACHE_HIT_CEILING - pressure * (CACHE_HIT_CEILING - CACHE_HIT_FLOOR))
        .clamp(CACHE_HIT_FLOOR, CACHE_HIT_CEILING)
}

fn summarize(origin: DataOrigin, tables: Vec<TableMetric>, now: DateTime<Utc>) -> MetricsSnapshot {
    let total_rows = tables.iter().map(|t| t.rows).sum();
    let total_bytes = tables.iter().map(|t| t.estimated_bytes).sum();
    MetricsSnapshot {
        origin,
        cache_hit_ratio: estimated_cache_hit_ratio(total_rows),
        tables,
        total_rows,
        total_bytes,
        collected_at: now,
    }
}

/// Deterministic estimates from real row counts.
pub struct LiveMetrics;

impl LiveMetrics {
    /// Failed tables contribute zero rows and are flagged.
    pub fn from_counts(counts: &[TableCount], now: DateTime<Utc>) -> MetricsSnapshot {
        let tables = counts
            .iter()
            .map(|count| estimate(&count.table, count.rows.unwrap_or(0), count.rows.is_none()))
            .collect();
        summarize(DataOrigin::Live, tables, now)
    }
}

/// Placeholder numbers for when no backend is reachable.
pub struct DemoMetrics;

impl DemoMetrics {
    /// `jitter` yields values in `[0, 1)`; one draw per table.
    pub fn generate(
        tables: &[&str],
        mut jitter: impl FnMut() -> f64,
        now: DateTime<Utc>,
    ) -> MetricsSnapshot {
        let tables = tables
            .iter()
            .map(|table| {
                let rows = (100.0 + jitter().clamp(0.0, 1.0) * 9_900.0).round() as u64;
                estimate(table, rows, false)
            })
            .collect();
        summarize(DataOrigin::Simulated, tables, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_metrics_zero_failed_tables() {
        let counts = vec![
            TableCount::ok("contacts", 1_000),
            TableCount::failed("deals"),
            TableCount::ok("unknown_table", 10),
        ];
        let snapshot = LiveMetrics::from_counts(&counts, Utc::now());

        assert!(snapshot.is_live());
        assert_eq!(snapshot.total_rows, 1_010);
        assert_eq!(snapshot.tables[0].estimated_bytes, 1_024_000);
        assert_eq!(snapshot.tables[0].index_bytes, 307_200);
        assert_eq!(snapshot.tables[1].rows, 0);
        assert_eq!(snapshot.failed_tables().collect::<Vec<_>>(), vec!["deals"]);
        assert_eq!(snapshot.tables[2].estimated_bytes, 5_120);
    }

    #[test]
    fn cache_ratio_is_clamped() {
        assert_eq!(estimated_cache_hit_ratio(0), CACHE_HIT_CEILING);
        assert_eq!(estimated_cache_hit_ratio(50_000_000), CACHE_HIT_FLOOR);
        let mid = estimated_cache_hit_ratio(500_000);
        assert!((mid - 0.895).abs() < 1e-9);
    }

    #[test]
    fn demo_metrics_are_marked_simulated() {
        let snapshot = DemoMetrics::generate(&["contacts", "deals"], || 0.5, Utc::now());
        assert_eq!(snapshot.origin, DataOrigin::Simulated);
        assert_eq!(snapshot.tables.len(), 2);
        assert!(snapshot.tables.iter().all(|t| t.rows == 5_050 && !t.failed));
    }
}
