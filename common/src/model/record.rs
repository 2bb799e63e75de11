//! Identity and timestamps shared by every record managed in the console.
//!
//! Each concrete entity embeds a [`RecordMeta`] (flattened on the wire) holding its
//! opaque id and the creation/update instants. Time is read through the [`Clock`]
//! trait so the editor logic can be driven deterministically in tests.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier. Only uniqueness within a collection is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Draws a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identity block carried by every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub id: RecordId,
    /// Set once at creation, never rewritten.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation (create, edit, toggle).
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    pub fn new(id: RecordId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances `updated_at`, never letting it stand still or move backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = if now > self.updated_at { now } else { floor };
    }
}

/// Source of "now" for record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Drives fixtures and deterministic previews.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        if let Ok(mut now) = self.now.lock() {
            *now += Duration::seconds(secs);
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_723))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn touch_moves_forward_even_when_clock_stalls() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut meta = RecordMeta::new(RecordId::new("a"), t0);

        meta.touch(t0);
        assert!(meta.updated_at > t0);
        assert_eq!(meta.created_at, t0);

        let later = t0 + Duration::hours(1);
        meta.touch(later);
        assert_eq!(meta.updated_at, later);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::default();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        clock.advance_secs(90);
        assert_eq!(clock.now() - start, Duration::seconds(90));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn meta_serializes_camel_case() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(RecordMeta::new(RecordId::new("x1"), t0)).unwrap();
        assert_eq!(json["id"], "x1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
