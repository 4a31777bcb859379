// SPDX-License-Identifier: BUSL-1.1
//! # Batch Subcommands
//!
//! Handlers for the `trace` subcommands. Each handler hydrates the
//! registry from the state file, applies one operation, persists the
//! file when the operation mutated state, and returns a process exit
//! code.
//!
//! Guard rejections are expected outcomes, not faults: they are printed
//! with their machine-stable code (`E001`–`E004`) on stderr and mapped
//! to exit code 1, while IO and parse problems propagate as errors.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use trace_core::{Role, State, TraceError};
use trace_registry::leaderboard;

use crate::store;

/// Arguments for `trace create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Batch identifier (e.g., "BATCH-2026-002").
    #[arg(long)]
    pub id: String,
    /// Descriptive product name.
    #[arg(long)]
    pub product: Option<String>,
    /// Item identifiers, split on commas/semicolons/whitespace and
    /// their full-width variants.
    #[arg(long)]
    pub items: Option<String>,
}

/// Arguments for `trace advance`.
#[derive(Args, Debug)]
pub struct AdvanceArgs {
    /// Batch identifier.
    #[arg(long)]
    pub id: String,
    /// Target custody state.
    #[arg(long)]
    pub to: State,
    /// Acting role.
    #[arg(long)]
    pub role: Role,
    /// Free-form note recorded on the transition.
    #[arg(long)]
    pub note: Option<String>,
}

/// Arguments for subcommands addressing a single batch.
#[derive(Args, Debug)]
pub struct BatchRefArgs {
    /// Batch identifier.
    #[arg(long)]
    pub id: String,
}

fn report_rejection(err: &TraceError) -> u8 {
    eprintln!("{} {}", err.code(), err);
    1
}

/// Register a new batch at `Init`.
pub fn run_create(args: &CreateArgs, store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    match registry.create(&args.id, args.product.as_deref(), args.items.as_deref()) {
        Ok(batch) => {
            store::save_registry(store_path, &registry)?;
            println!(
                "registered {} at {} ({} items)",
                batch.id,
                batch.status,
                batch.items.len()
            );
            Ok(0)
        }
        Err(err) => Ok(report_rejection(&err)),
    }
}

/// Attempt a custody transition.
pub fn run_advance(args: &AdvanceArgs, store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    match registry.transition(&args.id, args.to, args.role, args.note.clone()) {
        Ok(batch) => {
            store::save_registry(store_path, &registry)?;
            println!(
                "{}: {} ({}%)",
                batch.id,
                batch.status,
                batch.progress()
            );
            Ok(0)
        }
        Err(err) => Ok(report_rejection(&err)),
    }
}

/// Show a batch's current state, progress, and next allowed action.
pub fn run_status(args: &BatchRefArgs, store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    let Some(batch) = registry.get(&args.id) else {
        return Ok(report_rejection(&TraceError::NotFound {
            id: args.id.clone(),
        }));
    };
    println!("{}  {}  {}%", batch.id, batch.status, batch.progress());
    if let Some(product) = &batch.product {
        println!("product: {product}");
    }
    println!("items: {}  steps: {}", batch.items.len(), batch.history.len());
    match registry.next_action(&args.id)? {
        Some((next, role)) => println!("next: advance to {next} (as {role})"),
        None => println!("next: custody chain complete"),
    }
    Ok(0)
}

/// Print a batch's transition history in commit order.
pub fn run_history(args: &BatchRefArgs, json: bool, store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    let history = match registry.history(&args.id) {
        Ok(history) => history,
        Err(err) => return Ok(report_rejection(&err)),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(0);
    }
    if history.is_empty() {
        println!("no transitions recorded");
        return Ok(0);
    }
    for record in &history {
        match &record.note {
            Some(note) => println!(
                "{}  {} -> {}  by {}  ({note})",
                record.at.to_rfc3339(),
                record.from,
                record.to,
                record.by
            ),
            None => println!(
                "{}  {} -> {}  by {}",
                record.at.to_rfc3339(),
                record.from,
                record.to,
                record.by
            ),
        }
    }
    Ok(0)
}

/// List all registered batches, oldest first.
pub fn run_list(store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    if registry.is_empty() {
        println!("no batches registered");
        return Ok(0);
    }
    for batch in registry.list() {
        println!(
            "{}  {}  {}%  items={}  steps={}",
            batch.id,
            batch.status,
            batch.progress(),
            batch.items.len(),
            batch.history.len()
        );
    }
    Ok(0)
}

/// Print the completion-time leaderboard.
pub fn run_leaderboard(json: bool, store_path: &Path) -> Result<u8> {
    let registry = store::load_registry(store_path)?;
    let rows = leaderboard(&registry);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(0);
    }
    if rows.is_empty() {
        println!("no completed batches");
        return Ok(0);
    }
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "#{:<2} {}  {:.1}s  {} items",
            rank + 1,
            row.batch_id,
            row.duration_seconds,
            row.item_count
        );
    }
    Ok(0)
}
