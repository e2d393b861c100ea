//! Process-wide cache policy runtime.
//!
//! Bundles the resolver, guard, and metrics built from one `CacheConfig`.
//! `install` publishes a single global instance; configuration offered after
//! that has no effect.

use std::sync::{Arc, OnceLock};

use cacheprism_core::error::{CachePrismError, Result};
use cacheprism_core::{EntityId, ResolvedPolicy};

use crate::backend::{BackendClient, ConnectionFactory};
use crate::config::CacheConfig;
use crate::guard::DegradationGuard;
use crate::obs::metrics::CacheMetrics;
use crate::policy::PolicyRegistry;

static GLOBAL: OnceLock<CacheRuntime> = OnceLock::new();

#[derive(Clone)]
pub struct CacheRuntime {
    inner: Arc<RuntimeInner>,
}

struct RuntimeInner {
    cfg: CacheConfig,
    registry: PolicyRegistry,
    guard: DegradationGuard,
    metrics: Arc<CacheMetrics>,
}

impl CacheRuntime {
    /// Build the runtime. The policy table itself is built lazily (see `warm`).
    pub fn new(cfg: CacheConfig) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(CacheMetrics::default());
        let registry = PolicyRegistry::new(cfg.policy_settings(), Arc::clone(&metrics));
        let guard = DegradationGuard::new(cfg.degrade_on_failure, Arc::clone(&metrics));

        if cfg.degrade_on_failure {
            tracing::info!("cache degrade-on-failure enabled");
        }

        Ok(Self {
            inner: Arc::new(RuntimeInner {
                cfg,
                registry,
                guard,
                metrics,
            }),
        })
    }

    /// Build the policy table now so configuration errors stop startup.
    pub fn warm(&self) -> Result<()> {
        self.inner.registry.table().map(|_| ())
    }

    pub fn resolve(&self, id: &EntityId) -> Result<Option<Arc<ResolvedPolicy>>> {
        self.inner.registry.resolve(id)
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.inner.registry
    }

    pub fn guard(&self) -> &DegradationGuard {
        &self.inner.guard
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn lru(&self) -> bool {
        self.inner.cfg.lru
    }

    pub fn backend<F: ConnectionFactory>(&self, factory: F) -> BackendClient<F> {
        BackendClient::new(&self.inner.cfg.backend, factory)
    }
}

/// Install the process-global runtime. Only the first call takes effect;
/// later calls log a warning and return the installed instance.
pub fn install(cfg: CacheConfig) -> Result<&'static CacheRuntime> {
    if let Some(rt) = GLOBAL.get() {
        tracing::warn!("cache runtime already installed; ignoring new config");
        return Ok(rt);
    }
    let rt = CacheRuntime::new(cfg)?;
    if GLOBAL.set(rt).is_err() {
        tracing::warn!("cache runtime installed concurrently; ignoring new config");
    }
    GLOBAL
        .get()
        .ok_or_else(|| CachePrismError::Internal("cache runtime missing after install".into()))
}

pub fn global() -> Option<&'static CacheRuntime> {
    GLOBAL.get()
}
