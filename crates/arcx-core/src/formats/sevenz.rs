//! 7z archive driver.
//!
//! The password is attached to the decode session before the archive header
//! is read. An absent credential is passed to the decoder as an empty
//! password, which the decoder treats as "not encrypted"; a supplied
//! credential is passed through unchanged even if it is empty.
//!
//! The whole archive is decoded in one pass through a per-entry callback.
//! There is no protection probe for this format.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use sevenz_rust2::Password;
use tracing::debug;
use tracing::trace;

use crate::Credential;
use crate::ExtractError;
use crate::ExtractionReport;
use crate::Result;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

use super::common;
use super::traits::Extractor;

/// 7z archive driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SevenZipExtractor;

impl SevenZipExtractor {
    /// Creates a 7z driver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn session_password(credential: Option<&Credential>) -> Password {
    credential.map_or_else(Password::empty, |c| Password::from(c.expose()))
}

/// Writers record the archived directory itself under an empty name.
fn is_root_entry(name: &str) -> bool {
    name.trim_matches(['/', '\\', '.']).is_empty()
}

impl Extractor for SevenZipExtractor {
    fn format_name(&self) -> &'static str {
        "7z"
    }

    fn is_protected(&self, _source: &ContainerSource) -> Result<bool> {
        Err(ExtractError::Unsupported {
            operation: "is_protected",
            format: "7z",
        })
    }

    fn extract(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let archive = BufReader::new(File::open(source.as_path())?);
        debug!(source = source.encoded(), format = "7z", "opened container");

        let report = RefCell::new(ExtractionReport::new());
        // The decoder only carries its own error type out of the callback,
        // so the first driver error is parked here and returned afterwards.
        let failure: RefCell<Option<ExtractError>> = RefCell::new(None);

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest_dir: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            if entry.is_directory() && is_root_entry(&entry.name) {
                return Ok(true);
            }
            trace!(member = %entry.name, "extracting member");
            let outcome = target.member_path(&entry.name).and_then(|output_path| {
                let mut report = report.borrow_mut();
                if entry.is_directory() {
                    common::create_directory(&output_path, &mut report)
                } else {
                    common::write_member(reader, &output_path, None, &mut report)
                }
            });

            match outcome {
                Ok(()) => Ok(true),
                Err(err) => {
                    let message = err.to_string();
                    let mut slot = failure.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(err);
                    }
                    Err(sevenz_rust2::Error::Other(message.into()))
                }
            }
        };

        let decoded = sevenz_rust2::decompress_with_extract_fn_and_password(
            archive,
            target.as_path(),
            session_password(credential),
            extract_fn,
        );

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        decoded?;

        let mut report = report.into_inner();
        report.duration = start.elapsed();
        Ok(report)
    }
}
