//! Loading the dependency version pool that ships with the templates.

use std::path::Path;

use tracing::{debug, warn};

use crane_core::{
    application::ports::Filesystem,
    domain::{DependencyPool, Manifest},
    error::CraneResult,
};

/// File in the template root holding `dependencies` / `devDependencies`.
pub const VERSIONS_FILE: &str = "versions.json";

/// Read `<template_root>/versions.json`.
///
/// A missing file yields an empty pool, so every curated name falls under the
/// missing-version policy. A malformed file is an error.
pub fn load_pool(fs: &dyn Filesystem, template_root: &Path) -> CraneResult<DependencyPool> {
    let path = template_root.join(VERSIONS_FILE);
    if !fs.exists(&path) {
        warn!(path = %path.display(), "No version pool found, curated groups will be empty");
        return Ok(DependencyPool::default());
    }

    let manifest = Manifest::parse(&fs.read_file(&path)?, path.display())?;
    let pool = DependencyPool::from_manifest(&manifest);
    debug!(path = %path.display(), "Version pool loaded");
    Ok(pool)
}
