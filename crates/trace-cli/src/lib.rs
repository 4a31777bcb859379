//! # trace-cli library
//!
//! Subcommand handlers and state-file plumbing for the `trace` binary.
//!
//! The engine itself is purely in-memory; the CLI is a boundary layer
//! that hydrates a [`trace_registry::BatchRegistry`] from a local JSON
//! state file, applies one operation, and writes the file back. Guard
//! rejections are rendered with their machine-stable code and reported
//! through the process exit code, not as process faults.

pub mod ops;
pub mod store;
