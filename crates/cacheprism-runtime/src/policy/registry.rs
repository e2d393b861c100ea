//! Memoizing policy resolver.
//!
//! The table is built at most once, on first use, even when the first
//! lookups race. Per-entity answers are then memoized so repeat lookups are a
//! single map hit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use cacheprism_core::error::{CachePrismError, Result};
use cacheprism_core::{EntityId, ResolvedPolicy};

use super::table::PolicyTable;
use crate::config::PolicySettings;
use crate::obs::metrics::CacheMetrics;

pub struct PolicyRegistry {
    settings: PolicySettings,
    table: OnceLock<Arc<PolicyTable>>,
    // serializes the first build; never held on the read path
    build_lock: Mutex<()>,
    builds: AtomicU64,
    memo: DashMap<EntityId, Option<Arc<ResolvedPolicy>>>,
    metrics: Arc<CacheMetrics>,
}

impl PolicyRegistry {
    pub fn new(settings: PolicySettings, metrics: Arc<CacheMetrics>) -> Self {
        Self {
            settings,
            table: OnceLock::new(),
            build_lock: Mutex::new(()),
            builds: AtomicU64::new(0),
            memo: DashMap::new(),
            metrics,
        }
    }

    /// The compiled table, building it on first call.
    /// A failed build is not cached; the error surfaces to every caller.
    pub fn table(&self) -> Result<Arc<PolicyTable>> {
        if let Some(t) = self.table.get() {
            return Ok(Arc::clone(t));
        }

        let _guard = self
            .build_lock
            .lock()
            .map_err(|_| CachePrismError::Internal("policy table build lock poisoned".into()))?;
        if let Some(t) = self.table.get() {
            return Ok(Arc::clone(t));
        }

        let started = Instant::now();
        let table = Arc::new(PolicyTable::build(&self.settings)?);
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.metrics.table_builds.inc(&[]);
        tracing::info!(
            patterns = table.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "cache policy table built"
        );

        let _ = self.table.set(Arc::clone(&table));
        Ok(table)
    }

    /// Policy for `id`, or `None` when nothing matches or the match is disabled.
    pub fn resolve(&self, id: &EntityId) -> Result<Option<Arc<ResolvedPolicy>>> {
        if let Some(hit) = self.memo.get(id) {
            self.metrics.resolutions.inc(&[("source", "memo")]);
            return Ok(hit.value().clone());
        }

        let table = self.table()?;
        let resolved = match self.memo.entry(id.clone()) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(v) => {
                let policy = table.lookup(id);
                tracing::debug!(entity = %id, cached = policy.is_some(), "cache policy resolved");
                self.metrics.memoized_entities.inc(&[]);
                v.insert(policy.clone());
                policy
            }
        };
        self.metrics.resolutions.inc(&[("source", "table")]);
        Ok(resolved)
    }

    /// Number of successful table builds (0 or 1).
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}
