//! Degrade-on-failure execution guard.
//!
//! Wraps backend-calling operations. In strict mode every failure propagates
//! unchanged. In degrade mode the two transient kinds (connection failure,
//! timeout) are logged as a warning and the call yields no result, which the
//! caching engine treats as a cache miss. Everything else still propagates.

use std::future::Future;
use std::sync::Arc;

use cacheprism_core::error::{CachePrismError, Result};

use crate::obs::metrics::CacheMetrics;

#[derive(Clone)]
pub struct DegradationGuard {
    degrade_on_failure: bool,
    metrics: Arc<CacheMetrics>,
}

impl DegradationGuard {
    pub fn new(degrade_on_failure: bool, metrics: Arc<CacheMetrics>) -> Self {
        Self {
            degrade_on_failure,
            metrics,
        }
    }

    /// Guard with its own metrics sink.
    pub fn standalone(degrade_on_failure: bool) -> Self {
        Self::new(degrade_on_failure, Arc::new(CacheMetrics::default()))
    }

    pub fn degrades(&self) -> bool {
        self.degrade_on_failure
    }

    /// Run `op` under the guard. `Ok(None)` means a transient failure was
    /// absorbed.
    pub fn call<T, F>(&self, op: F) -> Result<Option<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        match op() {
            Ok(v) => Ok(Some(v)),
            Err(e) => self.absorb(e),
        }
    }

    /// Same policy for an async backend call.
    pub async fn call_async<T, Fut>(&self, fut: Fut) -> Result<Option<T>>
    where
        Fut: Future<Output = Result<T>>,
    {
        match fut.await {
            Ok(v) => Ok(Some(v)),
            Err(e) => self.absorb(e),
        }
    }

    /// Wrap `op` into a reusable guarded callable.
    pub fn wrap<T, F>(&self, op: F) -> impl Fn() -> Result<Option<T>>
    where
        F: Fn() -> Result<T>,
    {
        let guard = self.clone();
        move || guard.call(&op)
    }

    fn absorb<T>(&self, err: CachePrismError) -> Result<Option<T>> {
        if !self.degrade_on_failure {
            return Err(err);
        }
        match &err {
            CachePrismError::BackendConnection(_) => {
                self.metrics.degraded_failures.inc(&[("kind", "connection")]);
                tracing::warn!(kind = "connection", error = %err, "cache backend is unreachable");
                Ok(None)
            }
            CachePrismError::BackendTimeout(_) => {
                self.metrics.degraded_failures.inc(&[("kind", "timeout")]);
                tracing::warn!(kind = "timeout", error = %err, "cache backend timed out");
                Ok(None)
            }
            _ => Err(err),
        }
    }
}
