//! Write helpers shared by the archive drivers.
//!
//! All member writes go through [`write_member`], which opens the output with
//! create-new semantics, so an existing file is never overwritten.

use std::fs::File;
use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractError;
use crate::ExtractionReport;
use crate::Result;

#[cfg(unix)]
const S_IFMT: u32 = 0o170_000;
#[cfg(unix)]
const S_IFREG: u32 = 0o100_000;

/// Fails if anything (including a dangling symlink) exists at `path`.
pub fn ensure_absent(path: &Path) -> Result<()> {
    if std::fs::symlink_metadata(path).is_ok() {
        return Err(ExtractError::would_overwrite(path));
    }
    Ok(())
}

/// Copies one member's data into a newly created file at `output_path`.
///
/// Parent directories are created as needed. `mode` carries unix permission
/// bits from the archive; only the permission bits of regular-file modes are
/// applied, and only on unix.
///
/// # Errors
///
/// Returns `ExtractFailed` if a file already exists at `output_path`, or on
/// any I/O failure.
pub fn write_member<R: Read + ?Sized>(
    reader: &mut R,
    output_path: &Path,
    mode: Option<u32>,
    report: &mut ExtractionReport,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output_file = create_new(output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(64 * 1024, output_file);
    let bytes_written = std::io::copy(reader, &mut buffered_writer)?;
    buffered_writer.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = mode.filter(|m| m & S_IFMT == 0 || m & S_IFMT == S_IFREG) {
            let permissions = std::fs::Permissions::from_mode(mode & 0o777);
            std::fs::set_permissions(output_path, permissions)?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    report.files_extracted += 1;
    report.bytes_written = report.bytes_written.saturating_add(bytes_written);

    Ok(())
}

/// Creates a directory member. Existing directories are not a conflict.
pub fn create_directory(path: &Path, report: &mut ExtractionReport) -> Result<()> {
    if path.is_file() {
        return Err(ExtractError::would_overwrite(path));
    }
    create_dir_all(path)?;
    report.directories_created += 1;
    Ok(())
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| {
            if err.kind() == ErrorKind::AlreadyExists {
                ExtractError::would_overwrite(path)
            } else {
                err.into()
            }
        })
}
