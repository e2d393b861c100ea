//! Backend connection facade.
//!
//! The connection itself comes from a caller-supplied factory. This layer
//! only insists that a cache alias is configured before asking for one, so a
//! missing alias surfaces as a configuration error and is never degraded.

use cacheprism_core::error::{CachePrismError, Result};

use crate::config::BackendSection;

/// Opens backend connections. Transient failures should be reported as
/// `BackendConnection` / `BackendTimeout` so the guard can classify them.
pub trait ConnectionFactory: Send + Sync {
    type Connection;

    fn connect(&self, alias: &str, write: bool) -> Result<Self::Connection>;
}

pub struct BackendClient<F> {
    alias: Option<String>,
    factory: F,
}

impl<F: ConnectionFactory> BackendClient<F> {
    pub fn new(section: &BackendSection, factory: F) -> Self {
        Self {
            alias: section.cache_alias.clone(),
            factory,
        }
    }

    /// Connection for reads (`write = false`) or writes.
    pub fn connection(&self, write: bool) -> Result<F::Connection> {
        let alias = match self.alias.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => {
                return Err(CachePrismError::BackendMisconfigured(
                    "you must specify backend.cache_alias to use cacheprism".into(),
                ))
            }
        };
        self.factory.connect(alias, write)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}
