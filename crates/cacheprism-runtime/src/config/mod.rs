//! Cache config loader (strict parsing).

pub mod schema;

use std::fs;

use cacheprism_core::error::{CachePrismError, Result};

pub use schema::{BackendSection, CacheConfig, PolicySettings};

pub fn load_from_file(path: &str) -> Result<CacheConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CachePrismError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CacheConfig> {
    let cfg: CacheConfig = serde_yaml::from_str(s)
        .map_err(|e| CachePrismError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
