//! High-level convenience functions with automatic format detection.

use std::path::Path;

use crate::Credential;
use crate::ExtractConfig;
use crate::ExtractionEngine;
use crate::ExtractionReport;
use crate::Result;

/// Extracts a container into `output_dir`, detecting its format.
///
/// PDFs are rasterized to `{page}.jpg` files at `config.pdf_quality`.
///
/// # Errors
///
/// Returns an error if the format cannot be detected or extraction fails.
///
/// # Examples
///
/// ```no_run
/// use arcx_core::ExtractConfig;
/// use arcx_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("archive.zip", "/tmp/output", None, &ExtractConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    credential: Option<&Credential>,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    let engine = ExtractionEngine::new(config.clone());
    let kind = engine.detect(archive_path.as_ref())?;
    engine.extract(kind, archive_path, output_dir, credential)
}

/// Reports whether a container needs a credential, detecting its format.
///
/// # Errors
///
/// Returns an error if the format cannot be detected or the container
/// cannot be read. 7z containers report `Unsupported`.
pub fn is_protected<P: AsRef<Path>>(archive_path: P, config: &ExtractConfig) -> Result<bool> {
    let engine = ExtractionEngine::new(config.clone());
    let kind = engine.detect(archive_path.as_ref())?;
    engine.is_protected(kind, archive_path)
}
