// SPDX-License-Identifier: BUSL-1.1
//! # State File
//!
//! Batch state is stored as a JSON array of batch snapshots in a local
//! file. A missing file is an empty registry; the file is rewritten in
//! full after every mutating command, in registration order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use trace_core::Batch;
use trace_registry::BatchRegistry;

/// Hydrate a registry from the state file. A missing file yields an
/// empty registry.
pub fn load_registry(path: &Path) -> Result<BatchRegistry> {
    let registry = BatchRegistry::new();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(store = %path.display(), "no state file, starting empty");
            return Ok(registry);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading state file {}", path.display()))
        }
    };
    let batches: Vec<Batch> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    for batch in batches {
        registry.insert(batch);
    }
    tracing::debug!(store = %path.display(), batches = registry.len(), "state file loaded");
    Ok(registry)
}

/// Write the registry back to the state file.
pub fn save_registry(path: &Path, registry: &BatchRegistry) -> Result<()> {
    let batches = registry.list();
    let raw = serde_json::to_string_pretty(&batches).context("serializing batch state")?;
    fs::write(path, raw).with_context(|| format!("writing state file {}", path.display()))?;
    Ok(())
}
