//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_source_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use arcx_core::ContainerKind;
use arcx_core::Credential;
use arcx_core::ExtractConfig;
use arcx_core::ExtractionEngine;
use arcx_core::Quality;
use std::env;
use std::path::Path;

pub fn execute(
    args: &ExtractArgs,
    pdfium_lib: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let quality = match args.quality {
        Some(value) => Quality::new(value).context("quality must be between 1 and 100")?,
        None => Quality::MAX,
    };

    let config = ExtractConfig {
        preserve_permissions: !args.no_preserve_permissions,
        pdf_quality: quality,
        pdfium_library: pdfium_lib.map(Path::to_path_buf),
    };
    let engine = ExtractionEngine::new(config);

    let kind = super::resolve_kind(&engine, args.format, &args.source)?;
    if args.quality.is_some() && kind != ContainerKind::Pdf {
        formatter.format_warning("--quality only applies to PDF documents");
    }

    let credential = args.password.as_deref().map(Credential::new);
    let report = add_source_context(
        engine.extract(kind, &args.source, &output_dir, credential.as_ref()),
        &args.source,
    )?;

    formatter.format_extraction_result(kind, &output_dir, &report)?;

    Ok(())
}
