//! cacheprism-inspect
//!
//! Usage: `cacheprism-inspect <config.yaml> <namespace.entity>...`
//! - Loads and validates the config, builds the policy table
//! - Prints each entity's resolved policy as JSON (`null` when uncached)
//! - Dumps metrics at the end

use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use cacheprism_core::error::{CachePrismError, Result};
use cacheprism_core::EntityId;
use cacheprism_runtime::{config, runtime};

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: cacheprism-inspect <config.yaml> <namespace.entity>...");
        return ExitCode::from(2);
    };

    match run(&path, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(class = e.error_class().as_str(), error = %e, "cacheprism failed");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, entities: impl Iterator<Item = String>) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let rt = runtime::install(cfg)?;
    rt.warm()?;

    for raw in entities {
        let id = EntityId::parse(&raw)?;
        let policy = rt.resolve(&id)?;
        let json = serde_json::to_string(&policy.as_deref())
            .map_err(|e| CachePrismError::Internal(format!("encode policy failed: {e}")))?;
        println!("{id}\t{json}");
    }

    print!("{}", rt.metrics().render());
    Ok(())
}
