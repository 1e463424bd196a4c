//! Subcommand implementations.

pub mod completion;
pub mod extract;
pub mod probe;

use arcx_core::ContainerKind;
use arcx_core::ExtractionEngine;
use std::path::Path;

use crate::error::add_source_context;

/// Uses the explicit `--format` when given, otherwise sniffs the file.
fn resolve_kind(
    engine: &ExtractionEngine,
    format: Option<ContainerKind>,
    source: &Path,
) -> anyhow::Result<ContainerKind> {
    match format {
        Some(kind) => Ok(kind),
        None => add_source_context(engine.detect(source), source),
    }
}
