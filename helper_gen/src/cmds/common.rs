/* Common utilities shared between analyze and generate commands */

use anyhow::Context;
use helper_gen::config::SchemaConventions;
use helper_gen::registry::{self, Registry};
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/* Logs go to stderr; RUST_LOG overrides the --verbose default */
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub fn load_conventions(path: Option<&Path>) -> anyhow::Result<SchemaConventions> {
    match path {
        Some(path) => SchemaConventions::load(path)
            .with_context(|| format!("loading conventions from {}", path.display())),
        None => Ok(SchemaConventions::default()),
    }
}

/* Progress lines go to stderr */
pub fn load_registry(
    path: &Path,
    conventions: &SchemaConventions,
    verbose: bool,
) -> anyhow::Result<Registry> {
    if verbose {
        eprintln!("[~] Loading registry {}...", path.display());
    }
    let registry = registry::load(path, conventions)
        .with_context(|| format!("building catalogue from {}", path.display()))?;
    if verbose {
        eprintln!(
            "[~] Catalogued {} struct/union types and {} enum groups",
            registry.catalogue.len(),
            registry.enums.len()
        );
    }
    Ok(registry)
}
