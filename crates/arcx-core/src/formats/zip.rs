//! ZIP archive driver.
//!
//! Supports stored and deflated members, protected either with legacy
//! `ZipCrypto` or with AES. Unix permission bits recorded in the archive are
//! applied to extracted files when enabled.

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use tracing::debug;
use tracing::trace;
use zip::ZipArchive;

use crate::Credential;
use crate::ExtractionReport;
use crate::Result;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

use super::common;
use super::traits::Extractor;

/// ZIP archive driver.
#[derive(Debug, Clone, Copy)]
pub struct ZipExtractor {
    preserve_permissions: bool,
}

impl ZipExtractor {
    /// Creates a ZIP driver.
    ///
    /// When `preserve_permissions` is set, regular-file unix modes stored in
    /// the archive are applied on unix targets.
    #[must_use]
    pub const fn new(preserve_permissions: bool) -> Self {
        Self {
            preserve_permissions,
        }
    }

    fn open(source: &ContainerSource) -> Result<ZipArchive<BufReader<File>>> {
        let file = File::open(source.as_path())?;
        Ok(ZipArchive::new(BufReader::new(file))?)
    }
}

impl Default for ZipExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Extractor for ZipExtractor {
    fn format_name(&self) -> &'static str {
        "zip"
    }

    /// Reads only the central directory; no member data is decoded.
    fn is_protected(&self, source: &ContainerSource) -> Result<bool> {
        let mut archive = Self::open(source)?;
        for index in 0..archive.len() {
            if archive.by_index_raw(index)?.encrypted() {
                return Ok(true);
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
        let mut archive = Self::open(source)?;
        debug!(
            source = source.encoded(),
            format = "zip",
            members = archive.len(),
            "opened container"
        );

        let mut report = ExtractionReport::new();
        let mut any_encrypted = false;

        for index in 0..archive.len() {
            let encrypted = archive.by_index_raw(index)?.encrypted();
            any_encrypted |= encrypted;

            let mut member = match credential {
                Some(credential) if encrypted => {
                    archive.by_index_decrypt(index, credential.expose().as_bytes())?
                }
                _ => archive.by_index(index)?,
            };

            let output_path = target.member_path(member.name())?;
            trace!(member = member.name(), encrypted, "extracting member");

            if member.is_dir() {
                common::create_directory(&output_path, &mut report)?;
                continue;
            }

            let mode = if self.preserve_permissions {
                member.unix_mode()
            } else {
                None
            };
            common::write_member(&mut member, &output_path, mode, &mut report)?;
        }

        if credential.is_some() && !any_encrypted {
            debug!(source = source.encoded(), "credential supplied but not needed");
        }

        report.duration = start.elapsed();
        Ok(report)
    }
}
