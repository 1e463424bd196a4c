//! RAR archive driver backed by the unrar library.
//!
//! The archive handle is opened once per call, with the credential attached
//! before listing or processing begins.

use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::trace;
use unrar::Archive;
use unrar::error::Code;
use unrar::error::UnrarError;

use crate::Credential;
use crate::ExtractError;
use crate::ExtractionReport;
use crate::Result;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

use super::common;
use super::traits::Extractor;

/// RAR archive driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct RarExtractor;

impl RarExtractor {
    /// Creates a RAR driver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn handle<'a>(path: &'a Path, credential: Option<&'a Credential>) -> Archive<'a> {
        match credential {
            Some(credential) => Archive::with_password(path, credential.expose()),
            None => Archive::new(path),
        }
    }
}

/// RAR 4 stores no password check value, so a wrong password on encrypted
/// data or headers surfaces as a checksum failure.
fn classify(err: UnrarError, encrypted: bool) -> ExtractError {
    if encrypted && matches!(err.code, Code::BadData) {
        ExtractError::credential("wrong password or damaged data in encrypted rar archive")
    } else {
        err.into()
    }
}

impl Extractor for RarExtractor {
    fn format_name(&self) -> &'static str {
        "rar"
    }

    fn is_protected(&self, source: &ContainerSource) -> Result<bool> {
        let listing = match Self::handle(source.as_path(), None).open_for_listing() {
            Ok(listing) => listing,
            Err(err) if matches!(err.code, Code::MissingPassword) => return Ok(true),
            Err(err) => return Err(err.into()),
        };

        if listing.has_encrypted_headers() {
            return Ok(true);
        }

        for header in listing {
            match header {
                Ok(header) if header.is_encrypted() => return Ok(true),
                Ok(_) => {}
                Err(err) if matches!(err.code, Code::MissingPassword) => return Ok(true),
                Err(err) => return Err(err.into()),
            }
        }
        Ok(false)
    }

    fn extract(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut archive = Self::handle(source.as_path(), credential).open_for_processing()?;
        let encrypted_headers = archive.has_encrypted_headers();
        debug!(
            source = source.encoded(),
            format = "rar",
            encrypted_headers,
            "opened container"
        );

        let mut report = ExtractionReport::new();

        while let Some(header) = archive
            .read_header()
            .map_err(|err| classify(err, encrypted_headers))?
        {
            let (name, is_directory, is_encrypted) = {
                let entry = header.entry();
                (
                    entry.filename.to_string_lossy().into_owned(),
                    entry.is_directory(),
                    entry.is_encrypted(),
                )
            };
            let output_path = target.member_path(&name)?;
            trace!(member = %name, "extracting member");

            archive = if is_directory {
                common::create_directory(&output_path, &mut report)?;
                header.skip()?
            } else {
                common::ensure_absent(&output_path)?;
                if let Some(parent) = output_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let next = header
                    .extract_to(&output_path)
                    .map_err(|err| classify(err, is_encrypted))?;
                report.files_extracted += 1;
                report.bytes_written += std::fs::metadata(&output_path).map_or(0, |m| m.len());
                next
            };
        }

        report.duration = start.elapsed();
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_name() {
        assert_eq!(RarExtractor::new().format_name(), "rar");
    }

    #[test]
    fn test_checksum_failure_on_encrypted_data_is_a_credential_error() {
        use unrar::error::When;

        let err = classify(UnrarError::from(Code::BadData, When::Process), true);
        assert!(err.is_credential_error());

        let err = classify(UnrarError::from(Code::BadData, When::Process), false);
        assert!(!err.is_credential_error());
        assert!(matches!(err, ExtractError::ExtractFailed { .. }));
    }

    #[test]
    fn test_not_a_rar_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fake.rar");
        std::fs::write(&path, b"this is not a rar archive").unwrap();
        let source = ContainerSource::resolve(&path).unwrap();
        let target = ExtractionTarget::prepare(temp.path().join("out")).unwrap();

        assert!(RarExtractor::new().is_protected(&source).is_err());
        assert!(RarExtractor::new().extract(&source, &target, None).is_err());
    }
}
