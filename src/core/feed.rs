//! Rolling signal feed shared across scans

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::signal::SignalRecord;

pub const DEFAULT_STALENESS_HOURS: i64 = 12;

/// Evict records older than `now - staleness`, prepend `incoming`, then keep the first
/// record seen for each symbol.
pub fn merge_feed(
    existing: &[SignalRecord],
    incoming: &[SignalRecord],
    now: DateTime<Utc>,
    staleness: Duration,
) -> Vec<SignalRecord> {
    let cutoff = now - staleness;
    let fresh = existing.iter().filter(|r| r.time >= cutoff);
    dedup_by_symbol(incoming.iter().chain(fresh))
}

fn dedup_by_symbol<'a>(records: impl Iterator<Item = &'a SignalRecord>) -> Vec<SignalRecord> {
    let mut seen = HashSet::new();
    records
        .filter(|r| seen.insert(r.symbol.as_str()))
        .cloned()
        .collect()
}

pub struct FeedStore {
    records: RwLock<Arc<Vec<SignalRecord>>>,
    staleness: Duration,
}

impl FeedStore {
    pub fn new(staleness: Duration) -> Self {
        Self {
            records: RwLock::new(Arc::new(Vec::new())),
            staleness,
        }
    }

    /// Current feed, newest first
    pub async fn snapshot(&self) -> Arc<Vec<SignalRecord>> {
        self.records.read().await.clone()
    }

    pub async fn merge(&self, incoming: &[SignalRecord], now: DateTime<Utc>) -> Arc<Vec<SignalRecord>> {
        let mut guard = self.records.write().await;
        let merged = Arc::new(merge_feed(&guard, incoming, now, self.staleness));
        debug!(
            incoming = incoming.len(),
            before = guard.len(),
            after = merged.len(),
            "Feed: merged {} records, size {} -> {}",
            incoming.len(),
            guard.len(),
            merged.len()
        );
        *guard = merged.clone();
        merged
    }

    /// Prepend one record without evicting stale entries
    pub async fn inject(&self, record: SignalRecord) -> Arc<Vec<SignalRecord>> {
        let mut guard = self.records.write().await;
        let merged = Arc::new(dedup_by_symbol(std::iter::once(&record).chain(guard.iter())));
        *guard = merged.clone();
        merged
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_STALENESS_HOURS))
    }
}
