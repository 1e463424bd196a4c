//! Probe command implementation.

use crate::cli::ProbeArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcx_core::ExtractConfig;
use arcx_core::ExtractionEngine;
use std::path::Path;

pub fn execute(
    args: &ProbeArgs,
    pdfium_lib: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let engine = ExtractionEngine::new(ExtractConfig {
        pdfium_library: pdfium_lib.map(Path::to_path_buf),
        ..ExtractConfig::default()
    });

    let kind = super::resolve_kind(&engine, args.format, &args.source)?;
    let protected = add_source_context(engine.is_protected(kind, &args.source), &args.source)?;

    formatter.format_probe_result(&args.source, kind, protected)
}
