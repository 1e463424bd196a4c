//! Error conversion utilities for CLI.
//!
//! Converts arcx-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcx_core::ExtractError;
use arcx_core::FailureCause;
use std::path::Path;

/// Converts `ExtractError` to a user-friendly anyhow error with context.
pub fn convert_extract_error(err: ExtractError, source: &Path) -> anyhow::Error {
    match err {
        ExtractError::ExtractFailed {
            cause: FailureCause::Credential,
            ..
        } => {
            anyhow!(
                "Cannot read '{}': {err}\n\
                 HINT: The container is password protected. Supply the correct password with --password.",
                source.display()
            )
        }
        ExtractError::ExtractFailed {
            reason,
            cause: FailureCause::Overwrite,
        } => {
            anyhow!(
                "Extraction of '{}' stopped: {reason}\n\
                 HINT: Existing files are never overwritten. Extract into an empty directory.",
                source.display()
            )
        }
        ExtractError::ExtractFailed {
            cause: FailureCause::UnrecognizedFormat,
            ..
        } => {
            anyhow!(
                "Container format not recognized: {}\n\
                 HINT: Supported formats: zip, rar, 7z, pdf. Use --format to choose one explicitly.",
                source.display()
            )
        }
        ExtractError::SourceNotFound { path } => {
            anyhow!(
                "Source not found or unreadable: {}\n\
                 HINT: Check the path, and for PDFs that the file is a valid document.",
                path.display()
            )
        }
        ExtractError::DestinationNotFound { path } => {
            anyhow!(
                "Cannot use output directory: {}\n\
                 HINT: The path must be a directory, or a location where one can be created.",
                path.display()
            )
        }
        ExtractError::DestinationExists { path } => {
            anyhow!(
                "Output file already exists: {}\n\
                 HINT: Nothing was written. Remove existing page images or choose another output directory.",
                path.display()
            )
        }
        ExtractError::InvalidPath { path, reason } => {
            anyhow!("Invalid path '{path}': {reason}")
        }
        ExtractError::Unsupported { operation, format } => {
            anyhow!(
                "{operation} is not supported for {format} containers\n\
                 HINT: Try extracting directly; encrypted archives fail without --password."
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing '{}'", source.display())),
    }
}

/// Adds source context to an engine result.
pub fn add_source_context<T>(
    result: Result<T, ExtractError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extract_error(e, source))
}
